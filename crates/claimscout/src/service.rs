//! Service composing the catalog, matching engine, eligibility detector,
//! law-firm directory, and the user repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::accounts::{
    EarningsSummary, RepositoryError, SubscriptionTier, TierFeatures, TierListing, UserRecord,
    UserRepository,
};
use crate::catalog::{Settlement, SettlementCatalog};
use crate::claims::{self, AutofillData, ClaimPreview};
use crate::eligibility::{self, EligibilityReport, Receipt};
use crate::firms::{ContactReceipt, ContactRequest, LawFirm, LawFirmDirectory, LawFirmUpdate};
use crate::matching::{MatchResult, MatchingEngine, QuestionnaireAnswers};

pub struct SettlementDeskService<R> {
    catalog: SettlementCatalog,
    firms: LawFirmDirectory,
    engine: MatchingEngine,
    repository: Arc<R>,
}

/// Response payload for a questionnaire submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireOutcome {
    pub matches: Vec<MatchResult>,
    pub total_matches: usize,
    pub answers: QuestionnaireAnswers,
    pub timestamp: DateTime<Utc>,
}

/// Stored matches from the user's most recent questionnaire run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistory {
    pub matches: Vec<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub tier: SubscriptionTier,
    pub features: TierFeatures,
}

/// Partnership lookup available to every tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipCheck {
    pub has_partnered_law_firm: bool,
    pub law_firm_id: Option<u32>,
    pub has_access: bool,
}

impl<R> SettlementDeskService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(
        catalog: SettlementCatalog,
        firms: LawFirmDirectory,
        engine: MatchingEngine,
        repository: Arc<R>,
    ) -> Self {
        Self {
            catalog,
            firms,
            engine,
            repository,
        }
    }

    /// Standard catalog and directory over the given repository, with the
    /// consumer-facing floor policy.
    pub fn standard(repository: Arc<R>) -> Self {
        Self::new(
            SettlementCatalog::standard(),
            LawFirmDirectory::standard(),
            MatchingEngine::default(),
            repository,
        )
    }

    pub fn settlements(&self) -> &[Settlement] {
        self.catalog.settlements()
    }

    pub fn settlement(&self, id: u32) -> Result<&Settlement, ServiceError> {
        self.catalog.find(id).ok_or(ServiceError::SettlementNotFound)
    }

    fn user(&self, id: u32) -> Result<UserRecord, ServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(ServiceError::UserNotFound)
    }

    fn premium_user(&self, id: u32) -> Result<UserRecord, ServiceError> {
        let user = self.user(id)?;
        if user.subscription_tier != SubscriptionTier::Premium {
            return Err(ServiceError::PremiumRequired);
        }
        Ok(user)
    }

    /// Rank the catalog against the answers and store the run as the user's
    /// latest match history.
    pub fn submit_questionnaire(
        &self,
        user_id: u32,
        answers: QuestionnaireAnswers,
    ) -> Result<QuestionnaireOutcome, ServiceError> {
        self.user(user_id)?;

        let matches = self.engine.rank(&answers, self.catalog.settlements());
        self.repository.record_matches(user_id, matches.clone())?;

        Ok(QuestionnaireOutcome {
            total_matches: matches.len(),
            matches,
            answers,
            timestamp: Utc::now(),
        })
    }

    pub fn previous_matches(&self, user_id: u32) -> Result<MatchHistory, ServiceError> {
        self.user(user_id)?;
        let matches = self.repository.fetch_matches(user_id)?;
        let message = matches.is_empty().then(|| {
            "No previous matches found. Please complete the questionnaire.".to_string()
        });
        Ok(MatchHistory { matches, message })
    }

    /// Run the eligibility detector. `receipts` overrides the user's stored
    /// purchase history (e.g. a freshly imported CSV export).
    pub fn detect_eligibility(
        &self,
        user_id: u32,
        settlement_id: u32,
        receipts: Option<Vec<Receipt>>,
    ) -> Result<EligibilityReport, ServiceError> {
        let user = self.user(user_id)?;
        let settlement = self.settlement(settlement_id)?;
        let receipts = receipts.unwrap_or(user.receipts);
        Ok(eligibility::detect(settlement, &receipts))
    }

    pub fn autofill(&self, user_id: u32, settlement_id: u32) -> Result<AutofillData, ServiceError> {
        let user = self.user(user_id)?;
        let settlement = self.settlement(settlement_id)?;
        Ok(claims::build_autofill(&user, settlement, &user.receipts))
    }

    pub fn preview_claim(&self, confirmed: AutofillData) -> ClaimPreview {
        claims::preview(confirmed)
    }

    pub fn law_firms(&self, user_id: u32) -> Result<&[LawFirm], ServiceError> {
        self.premium_user(user_id)?;
        Ok(self.firms.firms())
    }

    pub fn law_firm(&self, user_id: u32, firm_id: u32) -> Result<&LawFirm, ServiceError> {
        self.premium_user(user_id)?;
        self.firms.find(firm_id).ok_or(ServiceError::LawFirmNotFound)
    }

    pub fn firm_updates(
        &self,
        user_id: u32,
        firm_id: u32,
    ) -> Result<&[LawFirmUpdate], ServiceError> {
        self.law_firm(user_id, firm_id)?;
        Ok(self.firms.updates_for(firm_id))
    }

    pub fn firm_for_settlement(
        &self,
        user_id: u32,
        settlement_id: u32,
    ) -> Result<&LawFirm, ServiceError> {
        self.premium_user(user_id)?;
        let settlement = self.settlement(settlement_id)?;
        if settlement.partnered_law_firm.is_none() {
            return Err(ServiceError::NoPartneredFirm);
        }
        self.firms
            .firm_for_settlement(settlement)
            .ok_or(ServiceError::LawFirmNotFound)
    }

    /// Available to every tier; `has_access` reflects the premium gate.
    pub fn partnership_check(
        &self,
        user_id: u32,
        settlement_id: u32,
    ) -> Result<PartnershipCheck, ServiceError> {
        let user = self.user(user_id)?;
        let settlement = self.settlement(settlement_id)?;
        let has_premium = user.subscription_tier == SubscriptionTier::Premium;

        Ok(PartnershipCheck {
            has_partnered_law_firm: settlement.partnered_law_firm.is_some(),
            law_firm_id: settlement.partnered_law_firm,
            has_access: has_premium && settlement.partnered_law_firm.is_some(),
        })
    }

    pub fn contact_firm(
        &self,
        user_id: u32,
        firm_id: u32,
        request: ContactRequest,
    ) -> Result<ContactReceipt, ServiceError> {
        let firm = self.law_firm(user_id, firm_id)?;

        if request.subject.trim().is_empty() || request.message.trim().is_empty() {
            return Err(ServiceError::MissingContactFields);
        }

        // No outbound transport yet; acknowledge so the UI can confirm.
        Ok(ContactReceipt {
            success: true,
            message: "Your message has been sent to the law firm. They will contact you shortly."
                .to_string(),
            law_firm_name: firm.name.clone(),
            contact_email: firm.email.clone(),
        })
    }

    /// Public tier pricing; needs no account.
    pub fn subscription_tiers(&self) -> Vec<TierListing> {
        SubscriptionTier::listings()
    }

    pub fn subscription_status(&self, user_id: u32) -> Result<SubscriptionStatus, ServiceError> {
        let user = self.user(user_id)?;
        Ok(SubscriptionStatus {
            tier: user.subscription_tier,
            features: user.subscription_tier.features(),
        })
    }

    pub fn subscribe(&self, user_id: u32, tier: &str) -> Result<SubscriptionStatus, ServiceError> {
        let tier = SubscriptionTier::parse(tier).ok_or(ServiceError::InvalidTier)?;
        let updated = self.repository.update_tier(user_id, tier)?;
        Ok(SubscriptionStatus {
            tier: updated.subscription_tier,
            features: updated.subscription_tier.features(),
        })
    }

    pub fn earnings(&self, user_id: u32) -> Result<EarningsSummary, ServiceError> {
        self.user(user_id)?;
        Ok(EarningsSummary::showcase())
    }
}

/// Error raised by the settlement desk service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Settlement not found")]
    SettlementNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Law firm not found")]
    LawFirmNotFound,
    #[error("No partnered law firm for this settlement")]
    NoPartneredFirm,
    #[error("Premium subscription required")]
    PremiumRequired,
    #[error("Valid tier required (free or premium)")]
    InvalidTier,
    #[error("Subject and message are required")]
    MissingContactFields,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

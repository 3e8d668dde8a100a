//! HTTP surface for the settlement desk.
//!
//! There is no session layer; user-scoped routes carry an explicit user id,
//! and submission-style endpoints default to the showcase account when the
//! caller omits one.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::accounts::{RepositoryError, UserRepository};
use crate::claims::{AutofillData, ReceiptCsvImporter};
use crate::firms::ContactRequest;
use crate::matching::QuestionnaireAnswers;
use crate::service::{ServiceError, SettlementDeskService};

const DEMO_USER_ID: u32 = 1;

fn default_user_id() -> u32 {
    DEMO_USER_ID
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitRequest {
    #[serde(default = "default_user_id")]
    pub(crate) user_id: u32,
    pub(crate) answers: QuestionnaireAnswers,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetectRequest {
    #[serde(default = "default_user_id")]
    pub(crate) user_id: u32,
    pub(crate) settlement_id: u32,
    /// Inline purchase-history export; overrides the stored receipts.
    #[serde(default)]
    pub(crate) receipts_csv: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AutofillRequest {
    #[serde(default = "default_user_id")]
    pub(crate) user_id: u32,
    pub(crate) settlement_id: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewRequest {
    pub(crate) confirmed_data: AutofillData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscribeRequest {
    pub(crate) tier: String,
}

/// Router builder exposing the settlement desk endpoints.
pub fn api_router<R>(service: Arc<SettlementDeskService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/v1/settlements", get(list_settlements::<R>))
        .route(
            "/api/v1/settlements/:settlement_id",
            get(get_settlement::<R>),
        )
        .route(
            "/api/v1/questionnaire/submit",
            post(submit_questionnaire::<R>),
        )
        .route(
            "/api/v1/questionnaire/matches/:user_id",
            get(previous_matches::<R>),
        )
        .route("/api/v1/claims/detect", post(detect_eligibility::<R>))
        .route("/api/v1/claims/autofill", post(autofill::<R>))
        .route("/api/v1/claims/preview", post(preview_claim::<R>))
        .route("/api/v1/users/:user_id/lawfirms", get(list_law_firms::<R>))
        .route(
            "/api/v1/users/:user_id/lawfirms/:firm_id",
            get(get_law_firm::<R>),
        )
        .route(
            "/api/v1/users/:user_id/lawfirms/:firm_id/updates",
            get(firm_updates::<R>),
        )
        .route(
            "/api/v1/users/:user_id/lawfirms/:firm_id/contact",
            post(contact_firm::<R>),
        )
        .route(
            "/api/v1/users/:user_id/settlements/:settlement_id/lawfirm",
            get(firm_for_settlement::<R>),
        )
        .route(
            "/api/v1/users/:user_id/settlements/:settlement_id/lawfirm/check",
            get(partnership_check::<R>),
        )
        .route(
            "/api/v1/subscription/tiers",
            get(subscription_tiers::<R>),
        )
        .route(
            "/api/v1/users/:user_id/subscription",
            get(subscription_status::<R>).post(subscribe::<R>),
        )
        .route("/api/v1/users/:user_id/earnings", get(earnings::<R>))
        .with_state(service)
}

pub(crate) async fn list_settlements<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
) -> Response
where
    R: UserRepository + 'static,
{
    (StatusCode::OK, Json(service.settlements().to_vec())).into_response()
}

pub(crate) async fn get_settlement<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(settlement_id): Path<u32>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.settlement(settlement_id) {
        Ok(settlement) => (StatusCode::OK, Json(settlement.clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_questionnaire<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Json(payload): Json<SubmitRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.submit_questionnaire(payload.user_id, payload.answers) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn previous_matches<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(user_id): Path<u32>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.previous_matches(user_id) {
        Ok(history) => (StatusCode::OK, Json(history)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detect_eligibility<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Json(payload): Json<DetectRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    let receipts = match payload.receipts_csv {
        Some(csv) => match ReceiptCsvImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Ok(receipts) => Some(receipts),
            Err(error) => {
                let body = json!({ "error": error.to_string() });
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        },
        None => None,
    };

    match service.detect_eligibility(payload.user_id, payload.settlement_id, receipts) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn autofill<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Json(payload): Json<AutofillRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.autofill(payload.user_id, payload.settlement_id) {
        Ok(data) => {
            let body = json!({
                "autofillData": data,
                "requiresConfirmation": true,
                "message": "Auto-fill suggestions generated. Please review and confirm each field.",
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_claim<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Json(payload): Json<PreviewRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    let preview = service.preview_claim(payload.confirmed_data);
    (StatusCode::OK, Json(preview)).into_response()
}

pub(crate) async fn list_law_firms<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(user_id): Path<u32>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.law_firms(user_id) {
        Ok(firms) => (StatusCode::OK, Json(firms.to_vec())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_law_firm<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path((user_id, firm_id)): Path<(u32, u32)>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.law_firm(user_id, firm_id) {
        Ok(firm) => (StatusCode::OK, Json(firm.clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn firm_updates<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path((user_id, firm_id)): Path<(u32, u32)>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.firm_updates(user_id, firm_id) {
        Ok(updates) => (StatusCode::OK, Json(updates.to_vec())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contact_firm<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path((user_id, firm_id)): Path<(u32, u32)>,
    Json(request): Json<ContactRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.contact_firm(user_id, firm_id, request) {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn firm_for_settlement<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path((user_id, settlement_id)): Path<(u32, u32)>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.firm_for_settlement(user_id, settlement_id) {
        Ok(firm) => (StatusCode::OK, Json(firm.clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn partnership_check<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path((user_id, settlement_id)): Path<(u32, u32)>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.partnership_check(user_id, settlement_id) {
        Ok(check) => (StatusCode::OK, Json(check)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn subscription_tiers<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
) -> Response
where
    R: UserRepository + 'static,
{
    (StatusCode::OK, Json(service.subscription_tiers())).into_response()
}

pub(crate) async fn subscription_status<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(user_id): Path<u32>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.subscription_status(user_id) {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn subscribe<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(user_id): Path<u32>,
    Json(request): Json<SubscribeRequest>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.subscribe(user_id, &request.tier) {
        Ok(status) => {
            let body = json!({
                "message": "Subscription updated successfully",
                "tier": status.tier,
                "features": status.features,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn earnings<R>(
    State(service): State<Arc<SettlementDeskService<R>>>,
    Path(user_id): Path<u32>,
) -> Response
where
    R: UserRepository + 'static,
{
    match service.earnings(user_id) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::SettlementNotFound
        | ServiceError::UserNotFound
        | ServiceError::LawFirmNotFound
        | ServiceError::NoPartneredFirm
        | ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::PremiumRequired => StatusCode::FORBIDDEN,
        ServiceError::InvalidTier | ServiceError::MissingContactFields => StatusCode::BAD_REQUEST,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = if matches!(error, ServiceError::PremiumRequired) {
        json!({ "error": error.to_string(), "requiresPremium": true })
    } else {
        json!({ "error": error.to_string() })
    };

    (status, Json(body)).into_response()
}

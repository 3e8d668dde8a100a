use clap::Args;
use claimscout::accounts::UserRecord;
use claimscout::catalog::SettlementCatalog;
use claimscout::claims::ReceiptCsvImporter;
use claimscout::eligibility::{self, Receipt};
use claimscout::error::AppError;
use claimscout::matching::{AnswerValue, FloorPolicy, MatchingEngine, QuestionnaireAnswers};
use claimscout::service::ServiceError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct MatchReportArgs {
    /// Purchase categories to answer with (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) purchase_categories: Vec<String>,
    /// Whether data breach notifications were received (Yes / No / Not sure)
    #[arg(long)]
    pub(crate) data_breach: Option<String>,
    /// Purchase period answer, e.g. "2020-2022"
    #[arg(long)]
    pub(crate) purchase_period: Option<String>,
    /// Companies purchased from (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) companies: Vec<String>,
    /// Issues experienced (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) issues: Vec<String>,
    /// Settlement notification answer (Yes / No / Not sure)
    #[arg(long)]
    pub(crate) notifications: Option<String>,
    /// Drop unmatched settlements instead of listing them at the floor score
    #[arg(long)]
    pub(crate) omit_unmatched: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Settlement to check purchases against
    #[arg(long)]
    pub(crate) settlement_id: u32,
    /// Receipt CSV export to scan instead of the demo purchase history
    #[arg(long)]
    pub(crate) receipts_csv: Option<PathBuf>,
}

pub(crate) fn run_match_report(args: MatchReportArgs) -> Result<(), AppError> {
    let MatchReportArgs {
        purchase_categories,
        data_breach,
        purchase_period,
        companies,
        issues,
        notifications,
        omit_unmatched,
    } = args;

    let answers = QuestionnaireAnswers {
        purchase_categories: non_empty(purchase_categories),
        data_breach,
        purchase_period: purchase_period.map(|value| AnswerValue::from(value.as_str())),
        companies: non_empty(companies),
        issues: non_empty(issues),
        notifications: notifications.map(|value| AnswerValue::from(value.as_str())),
        ..QuestionnaireAnswers::default()
    };

    let policy = if omit_unmatched {
        FloorPolicy::OmitUnmatched
    } else {
        FloorPolicy::AlwaysInclude
    };
    let engine = MatchingEngine::new(policy);
    let catalog = SettlementCatalog::standard();
    let matches = engine.rank(&answers, catalog.settlements());

    println!("Settlement match report");
    println!("- {} settlements evaluated", catalog.len());
    println!("- {} matches returned", matches.len());

    for result in &matches {
        println!(
            "\n{} (score {}, {} confidence)",
            result.settlement.name,
            result.match_score,
            result.confidence.label()
        );
        println!(
            "  {} | deadline {} | ${}-${}",
            result.settlement.company,
            result.settlement.deadline,
            result.settlement.potential_amount.min,
            result.settlement.potential_amount.max
        );
        for reason in &result.match_reasons {
            println!("  - {}", reason);
        }
    }

    Ok(())
}

pub(crate) fn run_eligibility_check(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs {
        settlement_id,
        receipts_csv,
    } = args;

    let catalog = SettlementCatalog::standard();
    let settlement = catalog
        .find(settlement_id)
        .ok_or(ServiceError::SettlementNotFound)?;

    let (receipts, source) = load_receipts(receipts_csv)?;
    let report = eligibility::detect(settlement, &receipts);

    println!("Eligibility check for {}", report.settlement_name);
    println!("- {} receipts scanned ({source})", receipts.len());
    println!(
        "- may qualify: {} ({} confidence)",
        report.may_qualify,
        report.confidence.label()
    );
    println!("- {}", report.message);

    if !report.detected_purchases.is_empty() {
        println!("Detected purchases:");
        for receipt in &report.detected_purchases {
            println!(
                "  - {} | {} | {} (${:.2})",
                receipt.date, receipt.merchant, receipt.product, receipt.amount
            );
        }
    }

    Ok(())
}

fn load_receipts(path: Option<PathBuf>) -> Result<(Vec<Receipt>, &'static str), AppError> {
    match path {
        Some(path) => ReceiptCsvImporter::from_path(path)
            .map(|receipts| (receipts, "imported CSV"))
            .map_err(AppError::from),
        None => Ok((UserRecord::demo().receipts, "demo purchase history")),
    }
}

fn non_empty(values: Vec<String>) -> Option<AnswerValue> {
    if values.is_empty() {
        None
    } else {
        Some(AnswerValue::from(values))
    }
}

//! HTTP surface specifications driven through the router with tower's
//! `oneshot`, asserting the documented JSON wire shapes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use claimscout::accounts::{RepositoryError, SubscriptionTier, UserRecord, UserRepository};
use claimscout::matching::MatchResult;
use claimscout::router::api_router;
use claimscout::service::SettlementDeskService;

#[derive(Default)]
struct MemoryUserRepository {
    users: Mutex<HashMap<u32, UserRecord>>,
    matches: Mutex<HashMap<u32, Vec<MatchResult>>>,
}

impl UserRepository for MemoryUserRepository {
    fn fetch(&self, id: u32) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .expect("user mutex poisoned")
            .get(&id)
            .cloned())
    }

    fn update_tier(&self, id: u32, tier: SubscriptionTier) -> Result<UserRecord, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        let user = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.subscription_tier = tier;
        Ok(user.clone())
    }

    fn record_matches(&self, id: u32, matches: Vec<MatchResult>) -> Result<(), RepositoryError> {
        self.matches
            .lock()
            .expect("match mutex poisoned")
            .insert(id, matches);
        Ok(())
    }

    fn fetch_matches(&self, id: u32) -> Result<Vec<MatchResult>, RepositoryError> {
        Ok(self
            .matches
            .lock()
            .expect("match mutex poisoned")
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }
}

fn build_router() -> axum::Router {
    let repository = Arc::new(MemoryUserRepository::default());
    let demo = UserRecord::demo();
    repository
        .users
        .lock()
        .expect("user mutex poisoned")
        .insert(demo.id, demo);

    let mut free_user = UserRecord::demo();
    free_user.id = 2;
    free_user.subscription_tier = SubscriptionTier::Free;
    repository
        .users
        .lock()
        .expect("user mutex poisoned")
        .insert(free_user.id, free_user);

    api_router(Arc::new(SettlementDeskService::standard(repository)))
}

async fn get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    (status, payload)
}

async fn post(router: &axum::Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&payload).expect("serialize payload"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload: Value = serde_json::from_slice(&body).expect("json body");
    (status, payload)
}

#[tokio::test]
async fn settlements_listing_returns_the_catalog() {
    let router = build_router();
    let (status, payload) = get(&router, "/api/v1/settlements").await;

    assert_eq!(status, StatusCode::OK);
    let settlements = payload.as_array().expect("array body");
    assert_eq!(settlements.len(), 4);
    assert_eq!(settlements[0]["name"], "TechCorp Data Breach Settlement");
    assert_eq!(settlements[0]["potentialAmount"]["max"], 500);

    let (status, payload) = get(&router, "/api/v1/settlements/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["error"], "Settlement not found");
}

#[tokio::test]
async fn questionnaire_submit_returns_matches_with_timestamp() {
    let router = build_router();
    let (status, payload) = post(
        &router,
        "/api/v1/questionnaire/submit",
        json!({
            "answers": {
                "dataBreach": "Yes",
                "purchaseCategories": "Electronics"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["totalMatches"], 4);
    assert_eq!(payload["matches"][0]["matchScore"], 70);
    assert_eq!(payload["matches"][0]["confidence"], "high");
    assert_eq!(payload["answers"]["dataBreach"], "Yes");
    assert!(payload["timestamp"].as_str().is_some());

    // The run is stored as the user's latest history.
    let (status, history) = get(&router, "/api/v1/questionnaire/matches/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["matches"].as_array().expect("array").len(), 4);
}

#[tokio::test]
async fn claims_detect_accepts_inline_receipts_csv() {
    let router = build_router();
    let (status, payload) = post(
        &router,
        "/api/v1/claims/detect",
        json!({
            "settlementId": 2,
            "receiptsCsv": "Date,Merchant,Amount,Product,Category\n2023-05-01,RetailGiant,129.99,Monitor,Electronics\n"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["mayQualify"], true);
    assert_eq!(payload["confidence"], "medium");
    assert_eq!(payload["detectedPurchases"][0]["merchant"], "RetailGiant");

    let (status, payload) = post(
        &router,
        "/api/v1/claims/detect",
        json!({
            "settlementId": 2,
            "receiptsCsv": "Date,Merchant,Amount,Product,Category\nnot-a-date,RetailGiant,129.99,Monitor,Electronics\n"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"].as_str().expect("message").contains("not a YYYY-MM-DD date"));
}

#[tokio::test]
async fn claims_autofill_and_preview_round_trip() {
    let router = build_router();
    let (status, payload) = post(
        &router,
        "/api/v1/claims/autofill",
        json!({ "settlementId": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["requiresConfirmation"], true);
    let autofill = payload["autofillData"].clone();
    assert_eq!(autofill["personalInfo"]["fullName"], "Kennedy");
    assert_eq!(autofill["settlementInfo"]["settlementId"], 1);

    let (status, payload) = post(
        &router,
        "/api/v1/claims/preview",
        json!({ "confirmedData": autofill }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["readyForSubmission"], true);
    assert_eq!(payload["officialSite"], "https://techcorpsettlement.com");
}

#[tokio::test]
async fn law_firm_surfaces_enforce_the_premium_gate() {
    let router = build_router();

    let (status, payload) = get(&router, "/api/v1/users/2/lawfirms").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(payload["requiresPremium"], true);

    let (status, payload) = get(&router, "/api/v1/users/1/lawfirms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.as_array().expect("array").len(), 2);

    let (status, payload) = get(&router, "/api/v1/users/1/lawfirms/1/updates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload[0]["type"], "deadline");

    // The partnership check is open to free-tier users.
    let (status, payload) =
        get(&router, "/api/v1/users/2/settlements/1/lawfirm/check").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["hasPartneredLawFirm"], true);
    assert_eq!(payload["hasAccess"], false);
}

#[tokio::test]
async fn subscription_tiers_listing_is_public_pricing() {
    let router = build_router();
    let (status, payload) = get(&router, "/api/v1/subscription/tiers").await;

    assert_eq!(status, StatusCode::OK);
    let tiers = payload.as_array().expect("array body");
    assert_eq!(tiers.len(), 2);
    assert_eq!(tiers[0]["id"], "free");
    assert_eq!(tiers[0]["price"], 0.0);
    assert_eq!(
        tiers[0]["limitations"]
            .as_array()
            .expect("limitations")
            .len(),
        4
    );
    assert_eq!(tiers[1]["id"], "premium");
    assert_eq!(tiers[1]["price"], 9.99);
    assert!(tiers[1]["limitations"]
        .as_array()
        .expect("limitations")
        .is_empty());
}

#[tokio::test]
async fn subscription_endpoints_round_trip_a_tier_change() {
    let router = build_router();

    let (status, payload) = get(&router, "/api/v1/users/2/subscription").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["tier"], "free");
    assert_eq!(payload["features"]["lawFirmAccess"], false);

    let (status, payload) = post(
        &router,
        "/api/v1/users/2/subscription",
        json!({ "tier": "premium" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "Subscription updated successfully");
    assert_eq!(payload["tier"], "premium");

    let (status, payload) = post(
        &router,
        "/api/v1/users/2/subscription",
        json!({ "tier": "platinum" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "Valid tier required (free or premium)");
}

#[tokio::test]
async fn earnings_summary_matches_the_showcase_figures() {
    let router = build_router();
    let (status, payload) = get(&router, "/api/v1/users/1/earnings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["totalEarnings"], 275.5);
    assert_eq!(payload["pendingClaims"], 2);
    assert_eq!(payload["completedClaims"], 3);
    assert_eq!(
        payload["recentEarnings"]
            .as_array()
            .expect("recent entries")
            .len(),
        3
    );
}

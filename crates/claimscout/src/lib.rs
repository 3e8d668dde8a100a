//! Settlement discovery core.
//!
//! The crate ranks class-action settlements against a user's questionnaire
//! answers, flags likely eligibility from purchase-history receipts, and
//! pre-fills claim forms before the user is handed off to the official
//! claims site. HTTP wiring lives in the `claimscout-api` service crate.

pub mod accounts;
pub mod catalog;
pub mod claims;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod firms;
pub mod matching;
pub mod router;
pub mod service;

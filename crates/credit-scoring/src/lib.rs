//! Creditworthiness scoring: applicant feature engineering, classifier
//! integration, and the HTTP surface that exposes a single-submission
//! prediction flow.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

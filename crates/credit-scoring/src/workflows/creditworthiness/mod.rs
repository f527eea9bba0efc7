//! Creditworthiness intake: label encoding, engineered features, classifier
//! scoring, and the HTTP routes that expose them.

pub mod classifier;
pub mod encoder;
pub mod features;
pub mod options;
pub mod record;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{
    ClassProbabilities, ClassifierError, CreditClass, CreditClassifier, LogisticPipeline,
};
pub use encoder::{encode, ApplicantForm, EncodeError, NumericField, RawApplicant};
pub use features::{AgeGroup, DerivedFeatures, DurationBucket, InstallmentCategory};
pub use options::{category_catalog, CategoryField, CategoryFieldView};
pub use record::{ApplicantRecord, ColumnKind, FeatureValue, RECORD_SCHEMA};
pub use report::{PredictionOutcome, PredictionView};
pub use router::credit_router;
pub use service::{CreditScoringService, ScoringError};

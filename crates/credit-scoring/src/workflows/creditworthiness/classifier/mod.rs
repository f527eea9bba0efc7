mod logistic;

pub use logistic::LogisticPipeline;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::record::ApplicantRecord;

/// Predicted class. Discriminants are the labels the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditClass {
    Bad = 0,
    Good = 1,
}

impl CreditClass {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(CreditClass::Bad),
            1 => Some(CreditClass::Good),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditClass::Bad => "Bad",
            CreditClass::Good => "Good",
        }
    }
}

/// Class probabilities; always finite, within `[0, 1]`, and summing to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    bad: f64,
    good: f64,
}

const PROBABILITY_TOLERANCE: f64 = 1e-6;

impl ClassProbabilities {
    pub fn new(bad: f64, good: f64) -> Result<Self, ClassifierError> {
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_unit(bad) || !in_unit(good) || ((bad + good) - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ClassifierError::InvalidOutput(format!(
                "probabilities bad={bad} good={good} do not form a distribution"
            )));
        }
        Ok(Self { bad, good })
    }

    /// Build from the positive-class probability alone.
    pub fn from_good(good: f64) -> Result<Self, ClassifierError> {
        Self::new(1.0 - good, good)
    }

    pub fn bad(&self) -> f64 {
        self.bad
    }

    pub fn good(&self) -> f64 {
        self.good
    }

    /// `[p_bad, p_good]`, indexed by class value.
    pub fn as_array(&self) -> [f64; 2] {
        [self.bad, self.good]
    }

    pub fn of(&self, class: CreditClass) -> f64 {
        match class {
            CreditClass::Bad => self.bad,
            CreditClass::Good => self.good,
        }
    }

    /// Highest-probability class; ties resolve to the lower class index.
    pub fn most_likely(&self) -> CreditClass {
        if self.good > self.bad {
            CreditClass::Good
        } else {
            CreditClass::Bad
        }
    }
}

/// Narrow view of a trained binary classifier.
///
/// Implementations are loaded once and shared across submissions, so
/// prediction must not mutate shared state.
pub trait CreditClassifier: Send + Sync {
    fn predict_proba(&self, record: &ApplicantRecord) -> Result<ClassProbabilities, ClassifierError>;

    fn predict(&self, record: &ApplicantRecord) -> Result<CreditClass, ClassifierError> {
        self.predict_proba(record)
            .map(|probabilities| probabilities.most_likely())
    }
}

/// The classifier could not be loaded or invoked.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to read classifier artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("classifier artifact is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("classifier artifact does not match the applicant schema: {0}")]
    Schema(String),
    #[error("classifier returned an invalid result: {0}")]
    InvalidOutput(String),
}

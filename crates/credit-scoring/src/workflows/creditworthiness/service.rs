use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::classifier::{ClassifierError, CreditClassifier};
use super::encoder::{ApplicantForm, EncodeError};
use super::record::ApplicantRecord;
use super::report::PredictionOutcome;

/// Service running the encode, derive, and predict steps for one submission.
///
/// The classifier is shared read-only, so one service instance can serve
/// concurrent submissions without locking.
pub struct CreditScoringService<C: ?Sized> {
    classifier: Arc<C>,
}

impl<C> CreditScoringService<C>
where
    C: CreditClassifier + ?Sized + 'static,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Build the classifier-ready record without scoring it.
    pub fn engineer(&self, form: &ApplicantForm) -> Result<ApplicantRecord, ScoringError> {
        ApplicantRecord::from_form(form).map_err(|err| {
            warn!(column = err.column(), error = %err, "applicant form rejected");
            ScoringError::Encode(err)
        })
    }

    /// Score a submission. Nothing reaches the classifier unless the whole
    /// record was built.
    pub fn submit(&self, form: &ApplicantForm) -> Result<PredictionOutcome, ScoringError> {
        let record = self.engineer(form)?;
        self.score(record)
    }

    /// Score an already-built record, consuming it.
    pub fn score(&self, record: ApplicantRecord) -> Result<PredictionOutcome, ScoringError> {
        let class = self.classifier.predict(&record).map_err(classifier_failure)?;
        let probabilities = self
            .classifier
            .predict_proba(&record)
            .map_err(classifier_failure)?;

        info!(
            class = class.label(),
            p_good = probabilities.good(),
            p_bad = probabilities.bad(),
            "applicant scored"
        );

        Ok(PredictionOutcome {
            record,
            class,
            probabilities,
            scored_at: Utc::now(),
        })
    }
}

fn classifier_failure(err: ClassifierError) -> ScoringError {
    error!(error = %err, "classifier invocation failed");
    ScoringError::ClassifierUnavailable(err)
}

/// Error raised while scoring a submission.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(#[from] ClassifierError),
}

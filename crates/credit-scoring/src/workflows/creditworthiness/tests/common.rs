use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::creditworthiness::{
    ApplicantForm, ApplicantRecord, ClassProbabilities, ClassifierError, CreditClassifier,
    CreditScoringService, LogisticPipeline,
};

/// Submission used throughout: the worked example of a 12 month new-car loan.
pub(super) fn scenario_form() -> ApplicantForm {
    ApplicantForm {
        status_checking_account: "No checking account".to_string(),
        duration_months: 12,
        credit_history: "Existing paid back till now".to_string(),
        purpose: "Car (new)".to_string(),
        credit_amount: 1000,
        savings_account: "< 100 DM".to_string(),
        employment_since: "1 <= ... < 4 years".to_string(),
        installment_rate: 2,
        personal_status_sex: "Male : single".to_string(),
        other_debtors: "None".to_string(),
        residence_since: 2,
        property: "Real estate".to_string(),
        age: 35,
        other_installment_plans: "None".to_string(),
        housing: "Own".to_string(),
        existing_credits: 1,
        job: "Skilled employee / official".to_string(),
        liable_people: 1,
        telephone: "None".to_string(),
        foreign_worker: "Yes".to_string(),
    }
}

pub(super) fn scenario_record() -> ApplicantRecord {
    ApplicantRecord::from_form(&scenario_form()).expect("scenario encodes")
}

pub(super) fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/credit_model_pipeline.json")
}

pub(super) fn sample_pipeline() -> LogisticPipeline {
    LogisticPipeline::from_path(model_path()).expect("sample artifact loads")
}

/// Classifier returning fixed probabilities and counting invocations.
pub(super) struct FixedClassifier {
    good: f64,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub(super) fn new(good: f64) -> Self {
        Self {
            good,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CreditClassifier for FixedClassifier {
    fn predict_proba(&self, _record: &ApplicantRecord) -> Result<ClassProbabilities, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ClassProbabilities::from_good(self.good)
    }
}

pub(super) struct UnavailableClassifier;

impl CreditClassifier for UnavailableClassifier {
    fn predict_proba(&self, _record: &ApplicantRecord) -> Result<ClassProbabilities, ClassifierError> {
        Err(ClassifierError::InvalidOutput("model process crashed".to_string()))
    }
}

pub(super) fn fixed_service(good: f64) -> (CreditScoringService<FixedClassifier>, Arc<FixedClassifier>) {
    let classifier = Arc::new(FixedClassifier::new(good));
    (CreditScoringService::new(classifier.clone()), classifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

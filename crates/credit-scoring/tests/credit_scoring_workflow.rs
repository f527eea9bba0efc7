//! End-to-end scenarios for the creditworthiness workflow, driven through the
//! public service facade and HTTP router with the bundled model artifact.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use credit_scoring::workflows::creditworthiness::{
    credit_router, ApplicantForm, CreditClass, CreditScoringService, LogisticPipeline,
    ScoringError,
};

fn pipeline() -> LogisticPipeline {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/credit_model_pipeline.json");
    LogisticPipeline::from_path(path).expect("bundled artifact loads")
}

fn new_car_loan() -> ApplicantForm {
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

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[test]
fn scenario_produces_documented_record_and_a_prediction() {
    let service = CreditScoringService::new(Arc::new(pipeline()));

    let outcome = service.submit(&new_car_loan()).expect("scored");
    let record = serde_json::to_value(&outcome.record).expect("record serializes");

    assert_eq!(
        record,
        json!({
            "Status_Checking_Acc": "A14",
            "Duration": 12,
            "Credit_History": "A32",
            "Purpose": "A40",
            "Credit_Amount": 1000,
            "Savings_Account": "A61",
            "Employment_Since": "A73",
            "Installment_Rate": 2,
            "Personal_Status_Sex": "A93",
            "Other_Debtors": "A101",
            "Residence_Since": 2,
            "Property": "A121",
            "Age": 35,
            "Other_Installment_Plans": "A143",
            "Housing": "A152",
            "Existing_Credits": 1,
            "Job": "A173",
            "Liable_People": 1,
            "Telephone": "A191",
            "Foreign_Worker": "A201",
            "Credit_to_Duration_Ratio": 1000.0 / 12.0,
            "Age_Group": "26-35",
            "Installment_Category": "Low",
            "Duration_Bucket": "Short"
        })
    );
    assert_eq!(outcome.class, CreditClass::Good);
    let total = outcome.probabilities.good() + outcome.probabilities.bad();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn every_valid_age_and_duration_scores() {
    let service = CreditScoringService::new(Arc::new(pipeline()));
    let mut form = new_car_loan();

    for age in 18..=100 {
        form.age = age;
        assert!(service.submit(&form).is_ok(), "age {age}");
    }
    for duration in 1..=72 {
        form.duration_months = duration;
        assert!(service.submit(&form).is_ok(), "duration {duration}");
    }
}

#[test]
fn invalid_submission_is_rejected_before_scoring() {
    let service = CreditScoringService::new(Arc::new(pipeline()));
    let mut form = new_car_loan();
    form.existing_credits = 5;

    let err = service.submit(&form).expect_err("existing credits capped at 4");
    assert!(matches!(err, ScoringError::Encode(_)));
    assert_eq!(
        err.to_string(),
        "Existing_Credits must be between 1 and 4, got 5"
    );
}

#[tokio::test]
async fn prediction_route_serves_the_bundled_model() {
    let service = Arc::new(CreditScoringService::new(Arc::new(pipeline())));
    let router = credit_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/credit/predictions")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&new_car_loan()).expect("form serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["label"], json!("Good"));
    let confidence = payload["confidence"].as_str().expect("confidence line");
    assert!(confidence.starts_with("Good: "));
    assert!(confidence.contains("%, Bad: "));
}

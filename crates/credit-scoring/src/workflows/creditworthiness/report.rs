use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{ClassProbabilities, CreditClass};
use super::record::ApplicantRecord;

/// Result of one scored submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    pub record: ApplicantRecord,
    pub class: CreditClass,
    pub probabilities: ClassProbabilities,
    pub scored_at: DateTime<Utc>,
}

impl PredictionOutcome {
    pub fn verdict(&self) -> &'static str {
        verdict_line(self.class)
    }

    pub fn confidence(&self) -> String {
        confidence_line(&self.probabilities)
    }

    pub fn view(&self) -> PredictionView {
        PredictionView {
            class: self.class.value(),
            label: self.class.label(),
            verdict: self.verdict(),
            probabilities: ProbabilityView {
                good: self.probabilities.good(),
                bad: self.probabilities.bad(),
                good_percent: format_percentage(self.probabilities.good()),
                bad_percent: format_percentage(self.probabilities.bad()),
            },
            confidence: self.confidence(),
            record: self.record.clone(),
            scored_at: self.scored_at,
        }
    }
}

/// Serialized prediction as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub class: u8,
    pub label: &'static str,
    pub verdict: &'static str,
    pub probabilities: ProbabilityView,
    pub confidence: String,
    pub record: ApplicantRecord,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbabilityView {
    pub good: f64,
    pub bad: f64,
    pub good_percent: String,
    pub bad_percent: String,
}

/// Probability as a percentage with two decimals, e.g. `71.23%`.
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn confidence_line(probabilities: &ClassProbabilities) -> String {
    format!(
        "Good: {}, Bad: {}",
        format_percentage(probabilities.good()),
        format_percentage(probabilities.bad())
    )
}

pub fn verdict_line(class: CreditClass) -> &'static str {
    match class {
        CreditClass::Good => "The person is likely creditworthy (Good).",
        CreditClass::Bad => "The person is likely not creditworthy (Bad).",
    }
}

//! Engineered features appended to every applicant record.
//!
//! Thresholds are inclusive exactly as the classifier saw them at training
//! time; shifting a boundary by one changes which one-hot column fires.

use serde::{Deserialize, Serialize};

/// Age band used by the classifier instead of raw age alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-25")]
    UpTo25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-50")]
    From36To50,
    #[serde(rename = "50+")]
    Over50,
}

impl AgeGroup {
    pub const fn label(self) -> &'static str {
        match self {
            AgeGroup::UpTo25 => "18-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To50 => "36-50",
            AgeGroup::Over50 => "50+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentCategory {
    Low,
    Medium,
    High,
}

impl InstallmentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            InstallmentCategory::Low => "Low",
            InstallmentCategory::Medium => "Medium",
            InstallmentCategory::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
    #[serde(rename = "Very Long")]
    VeryLong,
}

impl DurationBucket {
    pub const fn label(self) -> &'static str {
        match self {
            DurationBucket::Short => "Short",
            DurationBucket::Medium => "Medium",
            DurationBucket::Long => "Long",
            DurationBucket::VeryLong => "Very Long",
        }
    }
}

/// Derived portion of an applicant record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub credit_to_duration_ratio: f64,
    pub age_group: AgeGroup,
    pub installment_category: InstallmentCategory,
    pub duration_bucket: DurationBucket,
}

impl DerivedFeatures {
    pub fn derive(credit_amount: u32, duration_months: u32, age: u32, installment_rate: u32) -> Self {
        Self {
            credit_to_duration_ratio: credit_to_duration_ratio(credit_amount, duration_months),
            age_group: age_group(age),
            installment_category: installment_category(installment_rate),
            duration_bucket: duration_bucket(duration_months),
        }
    }
}

/// Plain floating point division; callers guarantee `duration_months >= 1`.
pub fn credit_to_duration_ratio(credit_amount: u32, duration_months: u32) -> f64 {
    f64::from(credit_amount) / f64::from(duration_months)
}

pub fn age_group(age: u32) -> AgeGroup {
    if age < 26 {
        AgeGroup::UpTo25
    } else if age < 36 {
        AgeGroup::From26To35
    } else if age < 51 {
        AgeGroup::From36To50
    } else {
        AgeGroup::Over50
    }
}

pub fn installment_category(rate: u32) -> InstallmentCategory {
    if rate <= 2 {
        InstallmentCategory::Low
    } else if rate == 3 {
        InstallmentCategory::Medium
    } else {
        InstallmentCategory::High
    }
}

pub fn duration_bucket(months: u32) -> DurationBucket {
    if months <= 12 {
        DurationBucket::Short
    } else if months <= 24 {
        DurationBucket::Medium
    } else if months <= 36 {
        DurationBucket::Long
    } else {
        DurationBucket::VeryLong
    }
}

use std::io::Write;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::encoder::{encode, ApplicantForm, EncodeError, RawApplicant};
use super::features::DerivedFeatures;

/// How the classifier consumes a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Training-time schema, in column order.
pub const RECORD_SCHEMA: [(&str, ColumnKind); 24] = [
    ("Status_Checking_Acc", ColumnKind::Categorical),
    ("Duration", ColumnKind::Numeric),
    ("Credit_History", ColumnKind::Categorical),
    ("Purpose", ColumnKind::Categorical),
    ("Credit_Amount", ColumnKind::Numeric),
    ("Savings_Account", ColumnKind::Categorical),
    ("Employment_Since", ColumnKind::Categorical),
    ("Installment_Rate", ColumnKind::Numeric),
    ("Personal_Status_Sex", ColumnKind::Categorical),
    ("Other_Debtors", ColumnKind::Categorical),
    ("Residence_Since", ColumnKind::Numeric),
    ("Property", ColumnKind::Categorical),
    ("Age", ColumnKind::Numeric),
    ("Other_Installment_Plans", ColumnKind::Categorical),
    ("Housing", ColumnKind::Categorical),
    ("Existing_Credits", ColumnKind::Numeric),
    ("Job", ColumnKind::Categorical),
    ("Liable_People", ColumnKind::Numeric),
    ("Telephone", ColumnKind::Categorical),
    ("Foreign_Worker", ColumnKind::Categorical),
    ("Credit_to_Duration_Ratio", ColumnKind::Numeric),
    ("Age_Group", ColumnKind::Categorical),
    ("Installment_Category", ColumnKind::Categorical),
    ("Duration_Bucket", ColumnKind::Categorical),
];

/// Single cell of an applicant record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(u32),
    Real(f64),
    Category(&'static str),
}

impl FeatureValue {
    pub fn kind(self) -> ColumnKind {
        match self {
            FeatureValue::Integer(_) | FeatureValue::Real(_) => ColumnKind::Numeric,
            FeatureValue::Category(_) => ColumnKind::Categorical,
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            FeatureValue::Integer(value) => Some(f64::from(value)),
            FeatureValue::Real(value) => Some(value),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(self) -> Option<&'static str> {
        match self {
            FeatureValue::Category(code) => Some(code),
            _ => None,
        }
    }

    fn render(self) -> String {
        match self {
            FeatureValue::Integer(value) => value.to_string(),
            FeatureValue::Real(value) => format!("{value:?}"),
            FeatureValue::Category(code) => code.to_string(),
        }
    }
}

/// Complete feature vector handed to the classifier.
///
/// Built once per submission and never mutated afterwards; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRecord {
    raw: RawApplicant,
    derived: DerivedFeatures,
}

impl ApplicantRecord {
    pub fn new(raw: RawApplicant) -> Self {
        let derived = DerivedFeatures::derive(
            raw.credit_amount,
            raw.duration_months,
            raw.age,
            raw.installment_rate,
        );
        Self { raw, derived }
    }

    /// Encode and derive in one pass.
    pub fn from_form(form: &ApplicantForm) -> Result<Self, EncodeError> {
        encode(form).map(Self::new)
    }

    pub fn raw(&self) -> &RawApplicant {
        &self.raw
    }

    pub fn derived(&self) -> &DerivedFeatures {
        &self.derived
    }

    /// Values in [`RECORD_SCHEMA`] order.
    pub fn values(&self) -> [FeatureValue; 24] {
        let raw = &self.raw;
        let derived = &self.derived;
        [
            FeatureValue::Category(raw.status_checking_account.code()),
            FeatureValue::Integer(raw.duration_months),
            FeatureValue::Category(raw.credit_history.code()),
            FeatureValue::Category(raw.purpose.code()),
            FeatureValue::Integer(raw.credit_amount),
            FeatureValue::Category(raw.savings_account.code()),
            FeatureValue::Category(raw.employment_since.code()),
            FeatureValue::Integer(raw.installment_rate),
            FeatureValue::Category(raw.personal_status_sex.code()),
            FeatureValue::Category(raw.other_debtors.code()),
            FeatureValue::Integer(raw.residence_since),
            FeatureValue::Category(raw.property.code()),
            FeatureValue::Integer(raw.age),
            FeatureValue::Category(raw.other_installment_plans.code()),
            FeatureValue::Category(raw.housing.code()),
            FeatureValue::Integer(raw.existing_credits),
            FeatureValue::Category(raw.job.code()),
            FeatureValue::Integer(raw.liable_people),
            FeatureValue::Category(raw.telephone.code()),
            FeatureValue::Category(raw.foreign_worker.code()),
            FeatureValue::Real(derived.credit_to_duration_ratio),
            FeatureValue::Category(derived.age_group.label()),
            FeatureValue::Category(derived.installment_category.label()),
            FeatureValue::Category(derived.duration_bucket.label()),
        ]
    }

    /// `(column, value)` pairs in schema order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> {
        RECORD_SCHEMA
            .iter()
            .map(|(column, _)| *column)
            .zip(self.values())
    }

    pub fn get(&self, column: &str) -> Option<FeatureValue> {
        self.columns()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// One-row CSV frame with a header of column names.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(RECORD_SCHEMA.iter().map(|(column, _)| *column))?;
        csv_writer.write_record(self.values().iter().map(|value| value.render()))?;
        csv_writer.flush()?;
        Ok(())
    }
}

impl Serialize for ApplicantRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(RECORD_SCHEMA.len()))?;
        for (column, value) in self.columns() {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}

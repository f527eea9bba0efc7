use serde::{Deserialize, Serialize};

use super::options::{
    CategoryField, CheckingAccountStatus, CreditHistory, EmploymentSince, ForeignWorker, Housing,
    Job, OtherDebtors, OtherInstallmentPlans, PersonalStatusSex, Property, Purpose,
    SavingsAccount, Telephone,
};

/// Applicant intake as submitted: human-readable labels plus raw numbers.
///
/// Numbers are kept wide so an out-of-range value is reported against its
/// bounds instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantForm {
    pub status_checking_account: String,
    pub duration_months: i64,
    pub credit_history: String,
    pub purpose: String,
    pub credit_amount: i64,
    pub savings_account: String,
    pub employment_since: String,
    pub installment_rate: i64,
    pub personal_status_sex: String,
    pub other_debtors: String,
    pub residence_since: i64,
    pub property: String,
    pub age: i64,
    pub other_installment_plans: String,
    pub housing: String,
    pub existing_credits: i64,
    pub job: String,
    pub liable_people: i64,
    pub telephone: String,
    pub foreign_worker: String,
}

impl Default for ApplicantForm {
    /// The values the intake form is preloaded with.
    fn default() -> Self {
        Self {
            status_checking_account: default_label::<CheckingAccountStatus>(),
            duration_months: i64::from(NumericField::Duration.default_value()),
            credit_history: default_label::<CreditHistory>(),
            purpose: default_label::<Purpose>(),
            credit_amount: i64::from(NumericField::CreditAmount.default_value()),
            savings_account: default_label::<SavingsAccount>(),
            employment_since: default_label::<EmploymentSince>(),
            installment_rate: i64::from(NumericField::InstallmentRate.default_value()),
            personal_status_sex: default_label::<PersonalStatusSex>(),
            other_debtors: default_label::<OtherDebtors>(),
            residence_since: i64::from(NumericField::ResidenceSince.default_value()),
            property: default_label::<Property>(),
            age: i64::from(NumericField::Age.default_value()),
            other_installment_plans: default_label::<OtherInstallmentPlans>(),
            housing: default_label::<Housing>(),
            existing_credits: i64::from(NumericField::ExistingCredits.default_value()),
            job: default_label::<Job>(),
            liable_people: i64::from(NumericField::LiablePeople.default_value()),
            telephone: default_label::<Telephone>(),
            foreign_worker: default_label::<ForeignWorker>(),
        }
    }
}

fn default_label<T: CategoryField>() -> String {
    T::default_option().label().to_string()
}

/// Numeric inputs and their fixed inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericField {
    Duration,
    CreditAmount,
    InstallmentRate,
    ResidenceSince,
    Age,
    ExistingCredits,
    LiablePeople,
}

impl NumericField {
    pub const ALL: [NumericField; 7] = [
        NumericField::Duration,
        NumericField::CreditAmount,
        NumericField::InstallmentRate,
        NumericField::ResidenceSince,
        NumericField::Age,
        NumericField::ExistingCredits,
        NumericField::LiablePeople,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            NumericField::Duration => "Duration",
            NumericField::CreditAmount => "Credit_Amount",
            NumericField::InstallmentRate => "Installment_Rate",
            NumericField::ResidenceSince => "Residence_Since",
            NumericField::Age => "Age",
            NumericField::ExistingCredits => "Existing_Credits",
            NumericField::LiablePeople => "Liable_People",
        }
    }

    /// Inclusive `(min, max)`.
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            NumericField::Duration => (1, 72),
            NumericField::CreditAmount => (100, 10_000),
            NumericField::InstallmentRate => (1, 10),
            NumericField::ResidenceSince => (1, 10),
            NumericField::Age => (18, 100),
            NumericField::ExistingCredits => (1, 4),
            NumericField::LiablePeople => (1, 2),
        }
    }

    pub const fn default_value(self) -> u32 {
        match self {
            NumericField::Duration => 12,
            NumericField::CreditAmount => 1000,
            NumericField::InstallmentRate => 2,
            NumericField::ResidenceSince => 2,
            NumericField::Age => 35,
            NumericField::ExistingCredits => 1,
            NumericField::LiablePeople => 1,
        }
    }

    pub fn check(self, value: i64) -> Result<u32, EncodeError> {
        let (min, max) = self.bounds();
        if value < i64::from(min) || value > i64::from(max) {
            return Err(EncodeError::OutOfRange {
                column: self.column(),
                value,
                min,
                max,
            });
        }
        // Bounds fit in u32, so the conversion cannot truncate.
        Ok(value as u32)
    }
}

/// Failure to turn a form submission into a classifier-ready record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("'{label}' is not a valid option for {column}")]
    InvalidCategory { column: &'static str, label: String },
    #[error("{column} must be between {min} and {max}, got {value}")]
    OutOfRange {
        column: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },
}

impl EncodeError {
    pub fn column(&self) -> &'static str {
        match self {
            EncodeError::InvalidCategory { column, .. } | EncodeError::OutOfRange { column, .. } => {
                column
            }
        }
    }
}

/// Encoded raw attributes, before feature derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApplicant {
    pub status_checking_account: CheckingAccountStatus,
    pub duration_months: u32,
    pub credit_history: CreditHistory,
    pub purpose: Purpose,
    pub credit_amount: u32,
    pub savings_account: SavingsAccount,
    pub employment_since: EmploymentSince,
    pub installment_rate: u32,
    pub personal_status_sex: PersonalStatusSex,
    pub other_debtors: OtherDebtors,
    pub residence_since: u32,
    pub property: Property,
    pub age: u32,
    pub other_installment_plans: OtherInstallmentPlans,
    pub housing: Housing,
    pub existing_credits: u32,
    pub job: Job,
    pub liable_people: u32,
    pub telephone: Telephone,
    pub foreign_worker: ForeignWorker,
}

fn category<T: CategoryField>(label: &str) -> Result<T, EncodeError> {
    T::from_label(label).ok_or_else(|| EncodeError::InvalidCategory {
        column: T::COLUMN,
        label: label.to_string(),
    })
}

/// Validate every field in column order, failing on the first violation.
pub fn encode(form: &ApplicantForm) -> Result<RawApplicant, EncodeError> {
    Ok(RawApplicant {
        status_checking_account: category(&form.status_checking_account)?,
        duration_months: NumericField::Duration.check(form.duration_months)?,
        credit_history: category(&form.credit_history)?,
        purpose: category(&form.purpose)?,
        credit_amount: NumericField::CreditAmount.check(form.credit_amount)?,
        savings_account: category(&form.savings_account)?,
        employment_since: category(&form.employment_since)?,
        installment_rate: NumericField::InstallmentRate.check(form.installment_rate)?,
        personal_status_sex: category(&form.personal_status_sex)?,
        other_debtors: category(&form.other_debtors)?,
        residence_since: NumericField::ResidenceSince.check(form.residence_since)?,
        property: category(&form.property)?,
        age: NumericField::Age.check(form.age)?,
        other_installment_plans: category(&form.other_installment_plans)?,
        housing: category(&form.housing)?,
        existing_credits: NumericField::ExistingCredits.check(form.existing_credits)?,
        job: category(&form.job)?,
        liable_people: NumericField::LiablePeople.check(form.liable_people)?,
        telephone: category(&form.telephone)?,
        foreign_worker: category(&form.foreign_worker)?,
    })
}

/// Range metadata for the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericFieldView {
    pub column: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

pub fn numeric_catalog() -> Vec<NumericFieldView> {
    NumericField::ALL
        .iter()
        .map(|field| {
            let (min, max) = field.bounds();
            NumericFieldView {
                column: field.column(),
                min,
                max,
                default: field.default_value(),
            }
        })
        .collect()
}

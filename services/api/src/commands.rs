use crate::infra::{load_classifier, resolve_model_path};
use clap::Args;
use credit_scoring::error::AppError;
use credit_scoring::workflows::creditworthiness::encoder::numeric_catalog;
use credit_scoring::workflows::creditworthiness::{
    category_catalog, ApplicantForm, ApplicantRecord, CreditScoringService, PredictionOutcome,
    ScoringError,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Applicant inputs. Flags left unset fall back to `--form`, then to the
/// intake defaults.
#[derive(Args, Debug, Default)]
pub(crate) struct ApplicantArgs {
    /// JSON file holding a full applicant form
    #[arg(long)]
    pub(crate) form: Option<PathBuf>,
    #[arg(long)]
    pub(crate) status_checking_account: Option<String>,
    /// Loan duration in months (1-72)
    #[arg(long)]
    pub(crate) duration: Option<i64>,
    #[arg(long)]
    pub(crate) credit_history: Option<String>,
    #[arg(long)]
    pub(crate) purpose: Option<String>,
    /// Requested amount (100-10000)
    #[arg(long)]
    pub(crate) credit_amount: Option<i64>,
    #[arg(long)]
    pub(crate) savings_account: Option<String>,
    #[arg(long)]
    pub(crate) employment_since: Option<String>,
    /// Installment rate in percent of disposable income (1-10)
    #[arg(long)]
    pub(crate) installment_rate: Option<i64>,
    #[arg(long)]
    pub(crate) personal_status_sex: Option<String>,
    #[arg(long)]
    pub(crate) other_debtors: Option<String>,
    /// Years at current residence (1-10)
    #[arg(long)]
    pub(crate) residence_since: Option<i64>,
    #[arg(long)]
    pub(crate) property: Option<String>,
    /// Age in years (18-100)
    #[arg(long)]
    pub(crate) age: Option<i64>,
    #[arg(long)]
    pub(crate) other_installment_plans: Option<String>,
    #[arg(long)]
    pub(crate) housing: Option<String>,
    /// Existing credits at this bank (1-4)
    #[arg(long)]
    pub(crate) existing_credits: Option<i64>,
    #[arg(long)]
    pub(crate) job: Option<String>,
    /// People liable to provide maintenance for (1-2)
    #[arg(long)]
    pub(crate) liable_people: Option<i64>,
    #[arg(long)]
    pub(crate) telephone: Option<String>,
    #[arg(long)]
    pub(crate) foreign_worker: Option<String>,
}

impl ApplicantArgs {
    pub(crate) fn into_form(self) -> Result<ApplicantForm, AppError> {
        let mut form = match &self.form {
            Some(path) => {
                let reader = BufReader::new(File::open(path)?);
                serde_json::from_reader(reader).map_err(std::io::Error::from)?
            }
            None => ApplicantForm::default(),
        };

        fn apply<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        apply(&mut form.status_checking_account, self.status_checking_account);
        apply(&mut form.duration_months, self.duration);
        apply(&mut form.credit_history, self.credit_history);
        apply(&mut form.purpose, self.purpose);
        apply(&mut form.credit_amount, self.credit_amount);
        apply(&mut form.savings_account, self.savings_account);
        apply(&mut form.employment_since, self.employment_since);
        apply(&mut form.installment_rate, self.installment_rate);
        apply(&mut form.personal_status_sex, self.personal_status_sex);
        apply(&mut form.other_debtors, self.other_debtors);
        apply(&mut form.residence_since, self.residence_since);
        apply(&mut form.property, self.property);
        apply(&mut form.age, self.age);
        apply(&mut form.other_installment_plans, self.other_installment_plans);
        apply(&mut form.housing, self.housing);
        apply(&mut form.existing_credits, self.existing_credits);
        apply(&mut form.job, self.job);
        apply(&mut form.liable_people, self.liable_people);
        apply(&mut form.telephone, self.telephone);
        apply(&mut form.foreign_worker, self.foreign_worker);

        Ok(form)
    }
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[command(flatten)]
    pub(crate) applicant: ApplicantArgs,
    /// Classifier artifact to score with (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct FeaturesArgs {
    #[command(flatten)]
    pub(crate) applicant: ApplicantArgs,
    /// Emit the record as a one-row CSV frame
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs { applicant, model } = args;
    let form = applicant.into_form()?;

    let classifier = load_classifier(&resolve_model_path(model)?)?;
    let service = CreditScoringService::new(classifier);

    let record = service.engineer(&form)?;
    render_record(&record);

    let outcome = service.score(record)?;
    render_prediction(&outcome);
    Ok(())
}

pub(crate) fn run_features(args: FeaturesArgs) -> Result<(), AppError> {
    let FeaturesArgs { applicant, csv } = args;
    let form = applicant.into_form()?;
    let record = ApplicantRecord::from_form(&form).map_err(ScoringError::from)?;

    if csv {
        record.write_csv(std::io::stdout().lock())?;
    } else {
        render_record(&record);
    }
    Ok(())
}

pub(crate) fn run_options() {
    println!("Categorical fields");
    for field in category_catalog() {
        println!("\n{}", field.column);
        for option in &field.options {
            println!("  {:<6} {}", option.code, option.label);
        }
    }

    println!("\nNumeric fields");
    for field in numeric_catalog() {
        println!(
            "  {}: {}..={} (default {})",
            field.column, field.min, field.max, field.default
        );
    }
}

fn render_record(record: &ApplicantRecord) {
    println!("Final input record with engineered features");
    for (column, value) in record.columns() {
        let rendered = match value.as_category() {
            Some(code) => code.to_string(),
            None => value
                .as_f64()
                .map(|number| number.to_string())
                .unwrap_or_default(),
        };
        println!("  {column:<26} {rendered}");
    }
}

fn render_prediction(outcome: &PredictionOutcome) {
    println!("\nPrediction result");
    println!("{}", outcome.verdict());
    println!("Confidence: {}", outcome.confidence());
    println!(
        "Scored at {}",
        outcome.scored_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_the_intake_form() {
        let form = ApplicantArgs::default().into_form().expect("form builds");
        assert_eq!(form, ApplicantForm::default());
    }

    #[test]
    fn flags_override_form_file() {
        let path = std::env::temp_dir().join(format!(
            "credit-scoring-form-{}.json",
            std::process::id()
        ));
        let mut base = ApplicantForm::default();
        base.housing = "Own".to_string();
        base.age = 61;
        std::fs::write(&path, serde_json::to_vec(&base).expect("serializes")).expect("written");

        let args = ApplicantArgs {
            form: Some(path.clone()),
            age: Some(30),
            ..ApplicantArgs::default()
        };
        let form = args.into_form().expect("form builds");
        std::fs::remove_file(&path).ok();

        assert_eq!(form.housing, "Own");
        assert_eq!(form.age, 30);
    }

    #[test]
    fn malformed_form_file_is_an_io_error() {
        let path = std::env::temp_dir().join(format!(
            "credit-scoring-bad-form-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, b"{\"age\": ").expect("written");

        let args = ApplicantArgs {
            form: Some(path.clone()),
            ..ApplicantArgs::default()
        };
        let result = args.into_form();
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}

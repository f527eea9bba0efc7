use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{ClassProbabilities, ClassifierError, CreditClass, CreditClassifier};
use crate::workflows::creditworthiness::record::{ApplicantRecord, ColumnKind, RECORD_SCHEMA};

/// On-disk layout of an exported logistic-regression pipeline: standard
/// scaling for numeric columns, one-hot weights for categorical columns.
#[derive(Debug, Deserialize)]
struct PipelineArtifact {
    name: String,
    #[serde(default)]
    version: Option<String>,
    /// Class label for each probability index, as fitted.
    classes: Vec<u8>,
    intercept: f64,
    numeric: Vec<NumericTerm>,
    categorical: Vec<CategoricalTerm>,
}

#[derive(Debug, Deserialize)]
struct NumericTerm {
    column: String,
    mean: f64,
    scale: f64,
    coefficient: f64,
}

#[derive(Debug, Deserialize)]
struct CategoricalTerm {
    column: String,
    coefficients: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
enum Term {
    Numeric {
        mean: f64,
        scale: f64,
        coefficient: f64,
    },
    Categorical {
        coefficients: HashMap<String, f64>,
    },
}

/// Logistic-regression classifier compiled against the applicant schema.
#[derive(Debug, Clone)]
pub struct LogisticPipeline {
    name: String,
    version: Option<String>,
    intercept: f64,
    /// One term per schema column, in schema order.
    terms: Vec<Term>,
    /// Class whose probability the sigmoid yields.
    positive_class: CreditClass,
}

impl LogisticPipeline {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pipeline = Self::from_reader(file)?;
        info!(
            model = %pipeline.name,
            version = pipeline.version.as_deref().unwrap_or("unversioned"),
            path = %path.display(),
            "classifier artifact loaded"
        );
        Ok(pipeline)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ClassifierError> {
        let artifact: PipelineArtifact = serde_json::from_reader(reader)?;
        Self::compile(artifact)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: PipelineArtifact = serde_json::from_str(raw)?;
        Self::compile(artifact)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn compile(artifact: PipelineArtifact) -> Result<Self, ClassifierError> {
        let positive_class = positive_class(&artifact.classes)?;

        if !artifact.intercept.is_finite() {
            return Err(schema_error("intercept must be finite"));
        }

        let mut by_column: HashMap<String, Term> = HashMap::new();
        for term in artifact.numeric {
            if !(term.scale.is_finite() && term.scale > 0.0) {
                return Err(schema_error(format!(
                    "{} has non-positive scale {}",
                    term.column, term.scale
                )));
            }
            if !(term.mean.is_finite() && term.coefficient.is_finite()) {
                return Err(schema_error(format!("{} has non-finite weights", term.column)));
            }
            insert_term(
                &mut by_column,
                term.column,
                Term::Numeric {
                    mean: term.mean,
                    scale: term.scale,
                    coefficient: term.coefficient,
                },
            )?;
        }
        for term in artifact.categorical {
            if term.coefficients.values().any(|weight| !weight.is_finite()) {
                return Err(schema_error(format!("{} has non-finite weights", term.column)));
            }
            insert_term(
                &mut by_column,
                term.column,
                Term::Categorical {
                    coefficients: term.coefficients.into_iter().collect(),
                },
            )?;
        }

        let mut terms = Vec::with_capacity(RECORD_SCHEMA.len());
        for (column, kind) in RECORD_SCHEMA {
            let term = by_column
                .remove(column)
                .ok_or_else(|| schema_error(format!("missing column {column}")))?;
            let term_kind = match term {
                Term::Numeric { .. } => ColumnKind::Numeric,
                Term::Categorical { .. } => ColumnKind::Categorical,
            };
            if term_kind != kind {
                return Err(schema_error(format!(
                    "{column} is {kind:?} but the artifact treats it as {term_kind:?}"
                )));
            }
            terms.push(term);
        }

        if !by_column.is_empty() {
            let mut unknown: Vec<_> = by_column.into_keys().collect();
            unknown.sort();
            return Err(schema_error(format!(
                "unexpected columns {}",
                unknown.join(", ")
            )));
        }

        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            intercept: artifact.intercept,
            terms,
            positive_class,
        })
    }

    /// Linear score before the logistic link.
    fn decision_function(&self, record: &ApplicantRecord) -> Result<f64, ClassifierError> {
        let mut score = self.intercept;
        for ((column, value), term) in record.columns().zip(&self.terms) {
            score += match term {
                Term::Numeric {
                    mean,
                    scale,
                    coefficient,
                } => {
                    let raw = value.as_f64().ok_or_else(|| {
                        ClassifierError::InvalidOutput(format!("{column} is not numeric"))
                    })?;
                    coefficient * (raw - mean) / scale
                }
                // Categories unseen during fitting contribute nothing.
                Term::Categorical { coefficients } => value
                    .as_category()
                    .and_then(|code| coefficients.get(code))
                    .copied()
                    .unwrap_or(0.0),
            };
        }
        Ok(score)
    }
}

impl CreditClassifier for LogisticPipeline {
    fn predict_proba(&self, record: &ApplicantRecord) -> Result<ClassProbabilities, ClassifierError> {
        let positive = sigmoid(self.decision_function(record)?);
        match self.positive_class {
            CreditClass::Good => ClassProbabilities::from_good(positive),
            CreditClass::Bad => ClassProbabilities::from_good(1.0 - positive),
        }
    }
}

fn positive_class(classes: &[u8]) -> Result<CreditClass, ClassifierError> {
    let declared: HashSet<u8> = classes.iter().copied().collect();
    if classes.len() != 2 || declared != HashSet::from([0, 1]) {
        return Err(schema_error(format!(
            "classes must be a permutation of [0, 1], got {classes:?}"
        )));
    }
    CreditClass::from_value(classes[1])
        .ok_or_else(|| schema_error(format!("unknown class label {}", classes[1])))
}

fn insert_term(
    by_column: &mut HashMap<String, Term>,
    column: String,
    term: Term,
) -> Result<(), ClassifierError> {
    if by_column.contains_key(&column) {
        return Err(schema_error(format!("column {column} declared twice")));
    }
    by_column.insert(column, term);
    Ok(())
}

fn schema_error(detail: impl Into<String>) -> ClassifierError {
    ClassifierError::Schema(detail.into())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_symmetric_and_bounded() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
    }

    #[test]
    fn positive_class_follows_declared_order() {
        assert_eq!(positive_class(&[0, 1]).expect("valid"), CreditClass::Good);
        assert_eq!(positive_class(&[1, 0]).expect("valid"), CreditClass::Bad);
        assert!(positive_class(&[1, 1]).is_err());
        assert!(positive_class(&[0, 1, 2]).is_err());
    }
}

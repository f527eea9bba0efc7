use credit_scoring::config::{AppConfig, ModelConfig};
use credit_scoring::error::AppError;
use credit_scoring::workflows::creditworthiness::LogisticPipeline;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Explicit path wins; otherwise fall back to `APP_MODEL_PATH`.
pub(crate) fn resolve_model_path(explicit: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match explicit {
        Some(path) => {
            let config = ModelConfig::new(path.to_string_lossy())?;
            Ok(config.artifact_path)
        }
        None => Ok(AppConfig::load()?.model.artifact_path),
    }
}

/// Load the classifier once; failure is fatal for the whole process.
pub(crate) fn load_classifier(path: &Path) -> Result<Arc<LogisticPipeline>, AppError> {
    let pipeline = LogisticPipeline::from_path(path)?;
    Ok(Arc::new(pipeline))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_model() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/credit_model_pipeline.json")
    }

    #[test]
    fn explicit_model_path_is_used_verbatim() {
        let path = resolve_model_path(Some(PathBuf::from("/srv/model.json"))).expect("resolves");
        assert_eq!(path, PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn bundled_model_loads() {
        let classifier = load_classifier(&bundled_model()).expect("bundled artifact loads");
        assert_eq!(classifier.name(), "german-credit-logistic");
    }

    #[test]
    fn missing_model_is_fatal() {
        let err = load_classifier(Path::new("/nonexistent/model.json")).expect_err("missing");
        assert!(matches!(err, AppError::Classifier(_)));
    }
}

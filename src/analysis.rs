//! Producers of [`AnalysisResult`]s for the upload widget.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::api::{ApiClient, ApiError, Prediction, Reply};
use crate::config::{AnalyzerKind, Config};
use crate::upload::{ImageFile, UploadError, UploadWidget};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub name: String,
    /// Percentage, nominally 0 to 100.
    pub confidence: f64,
    pub description: String,
    pub prescription: String,
    pub actions: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Backend rejected the image: {0}")]
    Rejected(String),

    #[error("Backend returned an unusable prediction")]
    Malformed,
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, image: &ImageFile) -> Result<AnalysisResult, AnalysisError>;
}

pub fn from_config(config: &Config, api: &ApiClient) -> Arc<dyn Analyzer> {
    match config.upload.analyzer {
        AnalyzerKind::Simulated => Arc::new(SimulatedAnalyzer::new(Duration::from_millis(
            config.upload.analysis_delay_ms,
        ))),
        AnalyzerKind::Backend => Arc::new(BackendAnalyzer::new(api.clone())),
    }
}

/// Waits a fixed delay, then picks one of two canned diagnoses.
pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn samples() -> [AnalysisResult; 2] {
        [
            AnalysisResult {
                name: "Leaf Blight".to_string(),
                confidence: 92.0,
                description: "A common fungal disease affecting crop leaves".to_string(),
                prescription: "Apply copper-based fungicide spray".to_string(),
                actions: vec![
                    "Remove affected leaves".to_string(),
                    "Improve air circulation".to_string(),
                    "Apply fungicide".to_string(),
                ],
            },
            AnalysisResult {
                name: "Bacterial Spot".to_string(),
                confidence: 87.0,
                description: "Bacterial infection causing dark spots on leaves".to_string(),
                prescription: "Use bactericide spray and improve drainage".to_string(),
                actions: vec![
                    "Remove infected leaves".to_string(),
                    "Apply bactericide".to_string(),
                    "Ensure proper drainage".to_string(),
                ],
            },
        ]
    }
}

#[async_trait]
impl Analyzer for SimulatedAnalyzer {
    async fn analyze(&self, image: &ImageFile) -> Result<AnalysisResult, AnalysisError> {
        tokio::time::sleep(self.delay).await;
        let [first, second] = Self::samples();
        let result = if rand::thread_rng().gen_bool(0.5) {
            first
        } else {
            second
        };
        tracing::info!(file = %image.name, disease = %result.name, "Simulated analysis finished");
        Ok(result)
    }
}

/// Sends the image to `POST /predict/predict`.
pub struct BackendAnalyzer {
    api: ApiClient,
}

impl BackendAnalyzer {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Analyzer for BackendAnalyzer {
    async fn analyze(&self, image: &ImageFile) -> Result<AnalysisResult, AnalysisError> {
        let body = self.api.predict(image).await?;
        if let Some(detail) = Reply::new(&body).detail() {
            return Err(AnalysisError::Rejected(detail));
        }
        let prediction: Prediction =
            serde_json::from_value(body).map_err(|_| AnalysisError::Malformed)?;
        if prediction.prediction.trim().is_empty() {
            return Err(AnalysisError::Malformed);
        }
        tracing::info!(file = %image.name, class = %prediction.prediction, "Backend analysis finished");

        Ok(AnalysisResult {
            name: display_class_name(&prediction.prediction),
            confidence: prediction.confidence,
            description: String::new(),
            prescription: prediction.remedy,
            actions: Vec::new(),
        })
    }
}

/// `Corn_(maize)___Common_rust_` becomes `Corn (maize): Common rust`.
pub fn display_class_name(class: &str) -> String {
    let tidy = |part: &str| part.replace('_', " ").trim().to_string();
    match class.split_once("___") {
        Some((crop, disease)) => format!("{}: {}", tidy(crop), tidy(disease)),
        None => tidy(class),
    }
}

#[derive(Debug)]
pub enum AnalysisOutcome {
    Ready(AnalysisResult),
    Refused(UploadError),
    Failed(AnalysisError),
    /// The file was removed or replaced while the analysis ran.
    Superseded,
}

/// Runs one analysis for the widget's current file.
///
/// The widget lock is only held to start and to finish; the analysis itself
/// runs unlocked so removal can cancel it. If the caller drops this future
/// mid-analysis, the widget goes back to its preview.
pub async fn run(widget: &Arc<Mutex<UploadWidget>>, analyzer: &dyn Analyzer) -> AnalysisOutcome {
    let ticket = match widget.lock().await.begin_analysis() {
        Ok(ticket) => ticket,
        Err(e) => return AnalysisOutcome::Refused(e),
    };
    let mut pending = PendingAnalysis {
        widget: Arc::clone(widget),
        generation: ticket.generation,
        settled: false,
    };

    let outcome = tokio::select! {
        _ = ticket.cancel.cancelled() => None,
        result = analyzer.analyze(&ticket.image) => Some(result),
    };

    let mut widget = widget.lock().await;
    pending.settled = true;
    match outcome {
        None => AnalysisOutcome::Superseded,
        Some(Ok(result)) => {
            if widget.finish_analysis(ticket.generation, result.clone()) {
                AnalysisOutcome::Ready(result)
            } else {
                AnalysisOutcome::Superseded
            }
        }
        Some(Err(e)) => {
            tracing::warn!("Analysis failed: {}", e);
            widget.abandon_analysis(ticket.generation);
            AnalysisOutcome::Failed(e)
        }
    }
}

/// Releases the widget's `Analyzing` stage when a [`run`] is dropped before
/// it settles, e.g. when the browser goes away mid-request.
struct PendingAnalysis {
    widget: Arc<Mutex<UploadWidget>>,
    generation: u64,
    settled: bool,
}

impl Drop for PendingAnalysis {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.generation;
        tracing::debug!(generation, "Analysis dropped before it finished");
        if let Ok(mut widget) = self.widget.try_lock() {
            widget.abandon_analysis(generation);
        } else if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let widget = Arc::clone(&self.widget);
            handle.spawn(async move {
                widget.lock().await.abandon_analysis(generation);
            });
        }
    }
}

//! Turns an analysis result into what the result card shows.

use crate::analysis::AnalysisResult;
use crate::i18n::Translations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 85.0 {
            Severity::High
        } else if confidence >= 70.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn label(self, t: &Translations) -> &'static str {
        match self {
            Severity::High => t.result.severity_high,
            Severity::Medium => t.result.severity_medium,
            Severity::Low => t.result.severity_low,
        }
    }

    /// Badge variant used by the stylesheet.
    pub fn emphasis(self) -> &'static str {
        match self {
            Severity::High => "destructive",
            Severity::Medium => "default",
            Severity::Low => "secondary",
        }
    }
}

/// Everything the result card template needs, already localized.
#[derive(Debug, Clone)]
pub struct DiagnosisView {
    pub name: String,
    pub confidence: String,
    pub bar_width: u8,
    pub severity_label: &'static str,
    pub emphasis: &'static str,
    pub description: String,
    pub prescription: String,
    pub actions: Vec<String>,
}

impl DiagnosisView {
    pub fn new(result: &AnalysisResult, t: &Translations) -> Self {
        let severity = Severity::from_confidence(result.confidence);
        let clamped = if result.confidence.is_finite() {
            result.confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            name: result.name.clone(),
            confidence: format_confidence(result.confidence),
            bar_width: clamped.round() as u8,
            severity_label: severity.label(t),
            emphasis: severity.emphasis(),
            description: result.description.clone(),
            prescription: result.prescription.clone(),
            actions: result.actions.clone(),
        }
    }
}

/// Up to two decimals, without trailing zeros or a dangling point.
fn format_confidence(confidence: f64) -> String {
    format!("{confidence:.2}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

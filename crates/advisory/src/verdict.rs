//! Verdict Rendering

use clinical_features::Disease;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shown under every negative result
pub const HEALTHY_LIFESTYLE_NOTE: &str = "Continue maintaining a healthy lifestyle and regular check-ups";

/// Outcome of a screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Label 1: risk detected
    Risk,
    /// Label 0: no risk detected
    Clear,
}

impl VerdictKind {
    /// Map a model label
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            VerdictKind::Risk
        } else {
            VerdictKind::Clear
        }
    }
}

/// Banner style a client should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerStyle {
    Error,
    Warning,
    Success,
    Info,
}

/// Everything needed to render one result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub disease: Disease,
    pub kind: VerdictKind,
    /// Style of the headline banner
    pub banner: BannerStyle,
    /// e.g. "Risk of Diabetes Detected (Confidence: 87.23%)"
    pub headline: String,
    /// Style of the follow-up block
    pub detail_banner: BannerStyle,
    /// Three numbered steps, only for risk verdicts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<&'static str>,
    /// Lifestyle note, only for clear verdicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl Verdict {
    /// Render the verdict for a label and the probability of that label.
    /// The advice depends only on disease and label.
    pub fn new(disease: Disease, label: u8, confidence: f64) -> Self {
        let kind = VerdictKind::from_label(label);
        let confidence = format_confidence(confidence);
        debug!("Rendering {:?} verdict for {}", kind, disease);

        match kind {
            VerdictKind::Risk => Self {
                disease,
                kind,
                banner: BannerStyle::Error,
                headline: format!(
                    "Risk of {} Detected (Confidence: {})",
                    disease.display_name(),
                    confidence
                ),
                detail_banner: BannerStyle::Warning,
                next_steps: next_steps(disease).to_vec(),
                note: None,
            },
            VerdictKind::Clear => Self {
                disease,
                kind,
                banner: BannerStyle::Success,
                headline: format!(
                    "No Risk of {} Detected (Confidence: {})",
                    disease.display_name(),
                    confidence
                ),
                detail_banner: BannerStyle::Info,
                next_steps: Vec::new(),
                note: Some(HEALTHY_LIFESTYLE_NOTE),
            },
        }
    }

    /// Markdown block for the follow-up banner
    pub fn detail_markdown(&self) -> String {
        match self.kind {
            VerdictKind::Risk => {
                let mut out = String::from("**Recommended Next Steps:**\n");
                for (i, step) in self.next_steps.iter().enumerate() {
                    out.push_str(&format!("{}. {}\n", i + 1, step));
                }
                out
            }
            VerdictKind::Clear => self.note.unwrap_or(HEALTHY_LIFESTYLE_NOTE).to_string(),
        }
    }
}

/// Recommended next steps after a positive screening
fn next_steps(disease: Disease) -> [&'static str; 3] {
    match disease {
        Disease::Heart => [
            "Consult a cardiologist",
            "Get a complete cardiac evaluation",
            "Review your lifestyle factors",
        ],
        Disease::Diabetes => [
            "Consult a diabetes specialist",
            "Get a complete diabetes evaluation",
            "Review your lifestyle factors",
        ],
        Disease::Parkinsons => [
            "Consult a neurologist",
            "Get a complete neurological evaluation",
            "Review your lifestyle factors",
        ],
    }
}

/// Percentage with two decimals, e.g. `0.8723 -> "87.23%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

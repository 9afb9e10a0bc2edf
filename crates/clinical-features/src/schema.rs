//! Form Field Schemas
//!
//! One table per disease. The table order is the order the scalers and
//! classifiers were fitted with, so it must never be reordered.

use serde::Serialize;

const MDVP_HELP: &str = "Multiple Diagnostic Voice Program measurements";
const JITTER_SHIMMER_HELP: &str = "Variations in fundamental frequency/amplitude";
const NHR_HNR_HELP: &str = "Noise to Harmonic Ratio/Harmonics to Noise Ratio";
const SPREAD_HELP: &str = "Nonlinear measures of fundamental frequency variation";

/// Description of one form input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Key used in named submissions
    pub key: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    /// Tooltip text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    /// Lower bound enforced by the widget
    pub min: f64,
    /// Upper bound enforced by the widget, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Input step
    pub step: f64,
    /// Allowed values for select boxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [f64]>,
}

impl FieldSpec {
    const fn number(key: &'static str, label: &'static str, min: f64, step: f64) -> Self {
        Self {
            key,
            label,
            help: None,
            min,
            max: None,
            step,
            choices: None,
        }
    }

    const fn select(key: &'static str, label: &'static str, choices: &'static [f64]) -> Self {
        Self {
            key,
            label,
            help: None,
            min: choices[0],
            max: Some(choices[choices.len() - 1]),
            step: 1.0,
            choices: Some(choices),
        }
    }

    const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    const fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Whether this field is rendered as a select box
    pub fn is_select(&self) -> bool {
        self.choices.is_some()
    }
}

const BINARY: &[f64] = &[0.0, 1.0];
const ZERO_TO_TWO: &[f64] = &[0.0, 1.0, 2.0];
const ZERO_TO_THREE: &[f64] = &[0.0, 1.0, 2.0, 3.0];
const ONE_TO_THREE: &[f64] = &[1.0, 2.0, 3.0];

/// Heart disease form, 13 fields
pub const HEART_FIELDS: [FieldSpec; 13] = [
    FieldSpec::number("age", "Age", 0.0, 1.0)
        .max(100.0)
        .help("Patient's age in years"),
    FieldSpec::select("sex", "Sex", BINARY).help("0 = Female, 1 = Male"),
    FieldSpec::select("cp", "Chest Pain Type", ZERO_TO_THREE).help(
        "0 = Typical angina, 1 = Atypical angina, 2 = Non-anginal pain, 3 = Asymptomatic",
    ),
    FieldSpec::number("trestbps", "Resting Blood Pressure", 0.0, 1.0),
    FieldSpec::number("chol", "Serum Cholesterol", 0.0, 1.0),
    FieldSpec::select("fbs", "Fasting Blood Sugar", BINARY)
        .help("0 = False (< 120 mg/dl), 1 = True (> 120 mg/dl)"),
    FieldSpec::select("restecg", "Resting Electrocardiographic Results", ZERO_TO_TWO).help(
        "0 = Normal, 1 = ST-T wave abnormality, 2 = Left ventricular hypertrophy",
    ),
    FieldSpec::number("thalach", "Maximum Heart Rate Achieved", 0.0, 1.0),
    FieldSpec::select("exang", "Exercise Induced Angina", BINARY).help("0 = No, 1 = Yes"),
    FieldSpec::number("oldpeak", "Depression Induced by Exercise", 0.0, 0.1),
    FieldSpec::select("slope", "Slope of the Peak Exercise ST Segment", ZERO_TO_TWO)
        .help("0 = Upsloping, 1 = Flat, 2 = Downsloping"),
    FieldSpec::select("ca", "Number of Major Vessels Colored by Fluoroscopy", ZERO_TO_THREE),
    FieldSpec::select("thal", "Thalassemia", ONE_TO_THREE)
        .help("1 = Normal, 2 = Fixed defect, 3 = Reversible defect"),
];

/// Diabetes form, 8 fields
pub const DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::number("pregnancies", "Pregnancies", 0.0, 1.0).help("Number of times pregnant"),
    FieldSpec::number("glucose", "Glucose", 0.0, 1.0).help(
        "Plasma glucose concentration (2 hours in an oral glucose tolerance test)",
    ),
    FieldSpec::number("blood_pressure", "Blood Pressure", 0.0, 1.0)
        .help("Diastolic blood pressure (mm Hg)"),
    FieldSpec::number("skin_thickness", "Skin Thickness", 0.0, 1.0)
        .help("Triceps skin fold thickness (mm)"),
    FieldSpec::number("insulin", "Insulin", 0.0, 1.0).help("2-Hour serum insulin (mu U/ml)"),
    FieldSpec::number("bmi", "BMI", 0.0, 0.1)
        .help("Body mass index (weight in kg/(height in m)²)"),
    FieldSpec::number("diabetes_pedigree", "Diabetes Pedigree Function", 0.0, 0.1).help(
        "Diabetes pedigree function (a function which scores likelihood of diabetes based on family history)",
    ),
    FieldSpec::number("age", "Age", 0.0, 1.0).max(100.0),
];

/// Parkinson's voice measurement form, 22 fields
pub const PARKINSONS_FIELDS: [FieldSpec; 22] = [
    FieldSpec::number("mdvp_fo_hz", "MDVP:Fo(Hz)", 0.0, 0.1).help(MDVP_HELP),
    FieldSpec::number("mdvp_fhi_hz", "MDVP:Fhi(Hz)", 0.0, 0.1).help(MDVP_HELP),
    FieldSpec::number("mdvp_flo_hz", "MDVP:Flo(Hz)", 0.0, 0.1).help(MDVP_HELP),
    FieldSpec::number("mdvp_jitter_percent", "MDVP:Jitter(%)", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("mdvp_jitter_abs", "MDVP:Jitter(Abs)", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("mdvp_rap", "MDVP:RAP", 0.0, 0.001).help(MDVP_HELP),
    FieldSpec::number("mdvp_ppq", "MDVP:PPQ", 0.0, 0.001).help(MDVP_HELP),
    FieldSpec::number("jitter_ddp", "Jitter:DDP", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("mdvp_shimmer", "MDVP:Shimmer", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("mdvp_shimmer_db", "MDVP:Shimmer(dB)", 0.0, 0.1).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("shimmer_apq3", "Shimmer:APQ3", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("shimmer_apq5", "Shimmer:APQ5", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("mdvp_apq", "MDVP:APQ", 0.0, 0.001).help(MDVP_HELP),
    FieldSpec::number("shimmer_dda", "Shimmer:DDA", 0.0, 0.001).help(JITTER_SHIMMER_HELP),
    FieldSpec::number("nhr", "NHR", 0.0, 0.001).help(NHR_HNR_HELP),
    FieldSpec::number("hnr", "HNR", 0.0, 0.1).help(NHR_HNR_HELP),
    FieldSpec::number("rpde", "RPDE", 0.0, 0.001)
        .max(1.0)
        .help("Recurrence Period Density Entropy"),
    FieldSpec::number("dfa", "DFA", 0.0, 0.001)
        .max(1.0)
        .help("Detrended Fluctuation Analysis"),
    FieldSpec::number("spread1", "Spread1", -10.0, 0.001)
        .max(1.0)
        .help(SPREAD_HELP),
    FieldSpec::number("spread2", "Spread2", -1.0, 0.001)
        .max(1.0)
        .help(SPREAD_HELP),
    FieldSpec::number("d2", "D2", 0.0, 0.001).help("Correlation dimension"),
    FieldSpec::number("ppe", "PPE", 0.0, 0.001).help("Pitch Period Entropy"),
];

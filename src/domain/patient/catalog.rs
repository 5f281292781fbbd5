//! Fixed catalog of simulated conditions.
//!
//! The data here is flavor text for the simulation, not clinical guidance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display names a simulated patient can be given.
pub const PATIENT_NAMES: [&str; 20] = [
    "Sarah Johnson",
    "Michael Chen",
    "Emily Rodriguez",
    "David Kim",
    "Jessica Williams",
    "James Martinez",
    "Amanda Taylor",
    "Robert Brown",
    "Lisa Anderson",
    "Christopher Lee",
    "Maria Garcia",
    "Daniel Wilson",
    "Jennifer Thomas",
    "Matthew Jackson",
    "Patricia White",
    "Andrew Harris",
    "Linda Martin",
    "Joseph Thompson",
    "Barbara Moore",
    "William Davis",
];

/// Inclusive body temperature range in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// Checks whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Everything the generator needs to know about one condition.
#[derive(Debug)]
pub struct ConditionTraits {
    pub symptoms: &'static [&'static str],
    pub pain_locations: &'static [&'static str],
    pub typical_temperature: Option<TemperatureRange>,
    pub typical_durations: &'static [&'static str],
    pub respiratory: bool,
}

/// Condition a simulated patient presents with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Upper Respiratory Infection")]
    UpperRespiratoryInfection,
    #[serde(rename = "Gastroenteritis")]
    Gastroenteritis,
    #[serde(rename = "Migraine")]
    Migraine,
    #[serde(rename = "Urinary Tract Infection")]
    UrinaryTractInfection,
    #[serde(rename = "Bronchitis")]
    Bronchitis,
    #[serde(rename = "Sinusitis")]
    Sinusitis,
    #[serde(rename = "Arthritis Flare-up")]
    ArthritisFlareUp,
    #[serde(rename = "Hypertension Symptoms")]
    HypertensionSymptoms,
}

impl Condition {
    /// Every condition in catalog order.
    pub const ALL: [Condition; 8] = [
        Condition::UpperRespiratoryInfection,
        Condition::Gastroenteritis,
        Condition::Migraine,
        Condition::UrinaryTractInfection,
        Condition::Bronchitis,
        Condition::Sinusitis,
        Condition::ArthritisFlareUp,
        Condition::HypertensionSymptoms,
    ];

    /// Human-readable condition name.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::UpperRespiratoryInfection => "Upper Respiratory Infection",
            Condition::Gastroenteritis => "Gastroenteritis",
            Condition::Migraine => "Migraine",
            Condition::UrinaryTractInfection => "Urinary Tract Infection",
            Condition::Bronchitis => "Bronchitis",
            Condition::Sinusitis => "Sinusitis",
            Condition::ArthritisFlareUp => "Arthritis Flare-up",
            Condition::HypertensionSymptoms => "Hypertension Symptoms",
        }
    }

    /// Catalog data for this condition.
    pub fn traits(&self) -> &'static ConditionTraits {
        match self {
            Condition::UpperRespiratoryInfection => &UPPER_RESPIRATORY_INFECTION,
            Condition::Gastroenteritis => &GASTROENTERITIS,
            Condition::Migraine => &MIGRAINE,
            Condition::UrinaryTractInfection => &URINARY_TRACT_INFECTION,
            Condition::Bronchitis => &BRONCHITIS,
            Condition::Sinusitis => &SINUSITIS,
            Condition::ArthritisFlareUp => &ARTHRITIS_FLARE_UP,
            Condition::HypertensionSymptoms => &HYPERTENSION_SYMPTOMS,
        }
    }

    /// Respiratory conditions are the only ones that produce a cough type.
    pub fn is_respiratory(&self) -> bool {
        self.traits().respiratory
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

static UPPER_RESPIRATORY_INFECTION: ConditionTraits = ConditionTraits {
    symptoms: &[
        "persistent cough",
        "sore throat",
        "runny nose",
        "congestion",
        "mild fever",
        "headache",
        "body aches",
        "fatigue",
    ],
    pain_locations: &["throat", "chest", "sinuses"],
    typical_temperature: Some(TemperatureRange { min: 37.5, max: 39.0 }),
    typical_durations: &["2 days", "3 days", "4 days", "5 days", "1 week"],
    respiratory: true,
};

static GASTROENTERITIS: ConditionTraits = ConditionTraits {
    symptoms: &[
        "nausea",
        "vomiting",
        "diarrhea",
        "abdominal cramps",
        "fever",
        "loss of appetite",
        "dehydration",
        "weakness",
    ],
    pain_locations: &["lower abdomen", "upper abdomen", "stomach"],
    typical_temperature: Some(TemperatureRange { min: 37.0, max: 38.5 }),
    typical_durations: &["1 day", "2 days", "3 days", "4 days"],
    respiratory: false,
};

static MIGRAINE: ConditionTraits = ConditionTraits {
    symptoms: &[
        "severe headache",
        "sensitivity to light",
        "sensitivity to sound",
        "nausea",
        "dizziness",
        "blurred vision",
        "aura",
    ],
    pain_locations: &["head", "temple", "forehead", "back of head"],
    typical_temperature: None,
    typical_durations: &["few hours", "4 hours", "6 hours", "1 day", "2 days"],
    respiratory: false,
};

static URINARY_TRACT_INFECTION: ConditionTraits = ConditionTraits {
    symptoms: &[
        "burning sensation when urinating",
        "frequent urination",
        "lower abdominal pain",
        "cloudy urine",
        "fever",
        "pelvic pain",
    ],
    pain_locations: &["lower abdomen", "pelvic area", "back"],
    typical_temperature: Some(TemperatureRange { min: 37.5, max: 38.5 }),
    typical_durations: &["1 day", "2 days", "3 days"],
    respiratory: false,
};

static BRONCHITIS: ConditionTraits = ConditionTraits {
    symptoms: &[
        "persistent cough",
        "chest discomfort",
        "shortness of breath",
        "fatigue",
        "mild fever",
        "production of mucus",
        "wheezing",
    ],
    pain_locations: &["chest", "throat"],
    typical_temperature: Some(TemperatureRange { min: 37.0, max: 38.0 }),
    typical_durations: &["3 days", "1 week", "2 weeks"],
    respiratory: true,
};

static SINUSITIS: ConditionTraits = ConditionTraits {
    symptoms: &[
        "facial pain",
        "nasal congestion",
        "thick nasal discharge",
        "headache",
        "postnasal drip",
        "cough",
        "fever",
    ],
    pain_locations: &["forehead", "cheeks", "around eyes", "bridge of nose"],
    typical_temperature: Some(TemperatureRange { min: 37.0, max: 38.0 }),
    typical_durations: &["3 days", "1 week", "2 weeks"],
    respiratory: false,
};

static ARTHRITIS_FLARE_UP: ConditionTraits = ConditionTraits {
    symptoms: &[
        "joint pain",
        "stiffness",
        "swelling",
        "reduced range of motion",
        "warmth around joints",
        "fatigue",
    ],
    pain_locations: &["knees", "hands", "wrists", "shoulders", "hips"],
    typical_temperature: None,
    typical_durations: &["2 days", "3 days", "1 week"],
    respiratory: false,
};

static HYPERTENSION_SYMPTOMS: ConditionTraits = ConditionTraits {
    symptoms: &[
        "headache",
        "dizziness",
        "chest pain",
        "shortness of breath",
        "blurred vision",
        "fatigue",
    ],
    pain_locations: &["head", "chest"],
    typical_temperature: None,
    typical_durations: &["ongoing", "few days", "1 week"],
    respiratory: false,
};

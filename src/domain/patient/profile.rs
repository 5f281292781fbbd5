//! Patient profile value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Condition;

/// Character of a respiratory cough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoughType {
    Dry,
    Productive,
}

impl fmt::Display for CoughType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoughType::Dry => write!(f, "dry"),
            CoughType::Productive => write!(f, "productive"),
        }
    }
}

/// Generated case data for the simulated patient of one room.
///
/// Immutable once generated; a room's `ConversationState` owns it and only
/// hands out shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub condition: Condition,
    /// Ordered, duplicate-free subset of the condition's symptoms.
    pub symptoms: Vec<String>,
    pub pain_location: String,
    /// Pain on a 1-10 scale, always within 4..=8.
    pub pain_level: u8,
    /// Degrees Celsius at one decimal; `None` for afebrile conditions.
    pub temperature: Option<f64>,
    pub duration: String,
    /// Present only for respiratory conditions.
    pub cough_type: Option<CoughType>,
}

impl Profile {
    /// The first two symptoms, as used in the opening complaint.
    pub fn leading_symptoms(&self) -> String {
        self.symptoms
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Checks whether any symptom relates to breathing.
    pub fn has_breathing_symptom(&self) -> bool {
        self.symptoms
            .iter()
            .any(|s| s.contains("breath") || s.contains("wheez"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bronchitis_profile() -> Profile {
        Profile {
            name: "Linda Martin".to_string(),
            age: 52,
            condition: Condition::Bronchitis,
            symptoms: vec![
                "persistent cough".to_string(),
                "wheezing".to_string(),
                "fatigue".to_string(),
            ],
            pain_location: "chest".to_string(),
            pain_level: 5,
            temperature: Some(37.6),
            duration: "1 week".to_string(),
            cough_type: Some(CoughType::Productive),
        }
    }

    #[test]
    fn leading_symptoms_joins_first_two() {
        assert_eq!(
            bronchitis_profile().leading_symptoms(),
            "persistent cough and wheezing"
        );
    }

    #[test]
    fn breathing_symptom_detects_wheezing() {
        assert!(bronchitis_profile().has_breathing_symptom());

        let mut profile = bronchitis_profile();
        profile.symptoms = vec!["fatigue".to_string(), "mild fever".to_string()];
        assert!(!profile.has_breathing_symptom());
    }

    #[test]
    fn profile_serializes_with_camel_case_and_nulls() {
        let mut profile = bronchitis_profile();
        profile.temperature = None;
        profile.cough_type = None;

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["painLocation"], "chest");
        assert_eq!(json["painLevel"], 5);
        assert_eq!(json["condition"], "Bronchitis");
        assert!(json["temperature"].is_null());
        assert!(json["coughType"].is_null());
    }

    #[test]
    fn cough_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CoughType::Dry).unwrap(), "\"dry\"");
        assert_eq!(CoughType::Productive.to_string(), "productive");
    }
}

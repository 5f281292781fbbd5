//! Per-room conversation state.
//!
//! Holds the room's patient profile and the record of which symptoms have
//! already been revealed. The disclosure record only ever grows and never
//! names a symptom outside the profile.

use crate::domain::patient::Profile;

/// Mutable state of one room's simulated conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    profile: Profile,
    /// Revealed symptoms in the order they were revealed.
    disclosed_symptoms: Vec<String>,
}

impl ConversationState {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            disclosed_symptoms: Vec::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Symptoms already revealed, in reveal order.
    pub fn disclosed_symptoms(&self) -> &[String] {
        &self.disclosed_symptoms
    }

    /// Profile symptoms not yet revealed, in profile order.
    pub fn undisclosed_symptoms(&self) -> Vec<&str> {
        self.profile
            .symptoms
            .iter()
            .filter(|s| !self.disclosed_symptoms.contains(s))
            .map(String::as_str)
            .collect()
    }

    /// True once every profile symptom has been revealed.
    pub fn is_fully_disclosed(&self) -> bool {
        self.disclosed_symptoms.len() == self.profile.symptoms.len()
    }

    /// Records `symptom` as revealed.
    ///
    /// Returns `false` without changing anything when the symptom is not part
    /// of the profile or was already revealed.
    pub(crate) fn disclose(&mut self, symptom: &str) -> bool {
        let known = self.profile.symptoms.iter().any(|s| s == symptom);
        let already = self.disclosed_symptoms.iter().any(|s| s == symptom);
        if !known || already {
            return false;
        }
        self.disclosed_symptoms.push(symptom.to_string());
        true
    }
}

//! Simulated patient replies.
//!
//! Every reply is a fixed template filled from the room's profile and
//! disclosure state. The only randomized choice is which undisclosed symptom
//! to reveal next; the phrasing of a symptom reply depends only on how many
//! symptoms have been revealed relative to the profile.

use rand::Rng;

use super::intent::{fallback_for, Intent};
use super::state::ConversationState;
use crate::domain::patient::Profile;

/// Produces the simulated patient's side of the conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyEngine;

impl ReplyEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes the reply to `utterance`, already classified as `intent`.
    ///
    /// Only [`Intent::AskSymptoms`] mutates `state`.
    pub fn reply<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        state: &mut ConversationState,
        utterance: &str,
        rng: &mut R,
    ) -> String {
        let profile = state.profile();
        match intent {
            Intent::Greeting => format!("Hello doctor, I'm {}.", profile.name),
            Intent::AskSymptoms => disclose_next_symptom(state, rng),
            Intent::AskName => format!("My name is {}.", profile.name),
            Intent::AskAge => format!("I'm {} years old.", profile.age),
            Intent::AskCondition => format!(
                "I've been having {} for about {}.",
                profile.leading_symptoms(),
                profile.duration
            ),
            Intent::AskPainScale => {
                format!("I would rate the pain as {} out of 10.", profile.pain_level)
            }
            Intent::AskPainLocation => {
                format!("The pain is mainly in the {}.", profile.pain_location)
            }
            Intent::AskPainDuration => {
                format!("The pain started about {} ago.", profile.duration)
            }
            Intent::AskTemperatureValue => match profile.temperature {
                Some(temp) => format!("My temperature was around {:.1}°C.", temp),
                None => "No, I don't have a fever.".to_string(),
            },
            // No fever means nothing to date; answer as if unrecognized.
            Intent::AskFeverDuration => match profile.temperature {
                Some(_) => format!("The fever has lasted about {}.", profile.duration),
                None => fallback_reply(fallback_for(utterance)),
            },
            Intent::AskCoughType => match profile.cough_type {
                Some(kind) => format!("It is a {} cough.", kind),
                None => fallback_reply(fallback_for(utterance)),
            },
            Intent::AskCough => match profile.cough_type {
                Some(kind) => format!("Yes, I have a {} cough.", kind),
                None => "No, I don't have a cough.".to_string(),
            },
            Intent::AskBreathingDifficulty => breathing_reply(profile),
            Intent::AskMedicationsTaken => {
                "No, I haven't taken any medications yet.".to_string()
            }
            Intent::AskAllergies => "I don't have any known drug allergies.".to_string(),
            Intent::AdviceMedication => "Okay doctor, I will take it as advised. \
                Are there any side effects I should watch for?"
                .to_string(),
            Intent::AdviceTests => {
                "Alright, I can come in for the tests. When should I schedule them?".to_string()
            }
            Intent::AdviceRestHydration => "Okay, I will rest and keep myself hydrated. \
                Are there any specific foods I should avoid?"
                .to_string(),
            Intent::ClosingThanks => "Thank you, doctor. I appreciate your help.".to_string(),
            Intent::TooShort | Intent::Fallback => fallback_reply(intent),
        }
    }

    /// The patient's first message once a doctor arrives.
    pub fn opening_complaint(&self, profile: &Profile) -> String {
        format!(
            "Hello doctor, my name is {}. I'm {} years old and I've been experiencing {} for about {}.",
            profile.name,
            profile.age,
            profile.leading_symptoms(),
            profile.duration
        )
    }
}

fn disclose_next_symptom<R: Rng + ?Sized>(state: &mut ConversationState, rng: &mut R) -> String {
    let undisclosed = state.undisclosed_symptoms();
    if undisclosed.is_empty() {
        return format!(
            "I've been experiencing {}.",
            oxford_list(&state.profile().symptoms)
        );
    }

    let symptom = undisclosed[rng.random_range(0..undisclosed.len())].to_string();
    state.disclose(&symptom);

    if state.disclosed_symptoms().len() == 1 {
        format!("I have been experiencing {}.", symptom)
    } else if state.is_fully_disclosed() {
        format!(
            "The main symptoms I'm experiencing are {}.",
            oxford_list(state.disclosed_symptoms())
        )
    } else {
        format!("I also have {}.", symptom)
    }
}

fn breathing_reply(profile: &Profile) -> String {
    if profile.has_breathing_symptom() {
        "Yes, I feel slightly short of breath, especially when I exert myself.".to_string()
    } else {
        "No, I haven't noticed any breathing problems.".to_string()
    }
}

fn fallback_reply(intent: Intent) -> String {
    match intent {
        Intent::TooShort => "Could you please elaborate, doctor?".to_string(),
        _ => "I understand, doctor. What should I do next?".to_string(),
    }
}

/// Joins items as "a", "a and b", or "a, b, and c".
pub fn oxford_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

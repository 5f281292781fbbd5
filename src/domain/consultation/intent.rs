//! Intent classification for doctor utterances.
//!
//! Classification runs an explicit, ordered rule table. Several rules
//! overlap (a pain-scale question also mentions "pain"; a cough-type
//! question also mentions "cough"), so the first matching rule wins and
//! later rules are never evaluated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Utterances this short (in characters) that match no rule ask for elaboration.
const TOO_SHORT_MAX_CHARS: usize = 3;

/// Communicative purpose of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    AskSymptoms,
    AskName,
    AskAge,
    AskCondition,
    AskPainScale,
    AskPainLocation,
    AskPainDuration,
    AskTemperatureValue,
    AskFeverDuration,
    AskCoughType,
    AskCough,
    AskBreathingDifficulty,
    AskMedicationsTaken,
    AskAllergies,
    AdviceMedication,
    AdviceTests,
    AdviceRestHydration,
    ClosingThanks,
    /// Unmatched and at most three characters long.
    TooShort,
    /// Unmatched.
    Fallback,
}

impl Intent {
    /// True for the two intents produced when no rule matches.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Intent::TooShort | Intent::Fallback)
    }
}

/// One named entry of the rule table.
///
/// A rule matches when any of its `patterns` matches and, if present, its
/// `subject` pattern matches too.
#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    patterns: Vec<Regex>,
    subject: Option<Regex>,
}

impl IntentRule {
    fn any(intent: Intent, patterns: &[&str]) -> Self {
        Self {
            intent,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
            subject: None,
        }
    }

    fn about(intent: Intent, patterns: &[&str], subject: &str) -> Self {
        Self {
            subject: Some(compile(subject)),
            ..Self::any(intent, patterns)
        }
    }

    /// Evaluates the rule against already-normalized text.
    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(normalized))
            && self.subject.as_ref().map_or(true, |s| s.is_match(normalized))
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid intent pattern {pattern:?}: {e}"))
}

// Only "pain" is word-anchored, so "ache" also matches inside "headache".
const PAIN: &str = r"\bpain|ache|hurt|discomfort\b";

static RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule::any(
            Intent::Greeting,
            &[r"\b(hello|hi|hey|good\s?(morning|afternoon|evening))\b"],
        ),
        IntentRule::any(
            Intent::AskSymptoms,
            &[r"\b(what|which|tell me about|describe|list)\s*(are\s*)?(your\s*)?(symptoms?|problems?|issues?|complaints?)\b"],
        ),
        IntentRule::any(
            Intent::AskName,
            &[
                r"\bwhat\s+(is|was)\s+(your\s+)?name\b",
                r"\bwhat'?s\s+(your\s+)?name\b",
                r"\bwho\s+are\s+you\b",
            ],
        ),
        IntentRule::any(
            Intent::AskAge,
            &[r"\b(how\s+old|age|what\s+(is|was)\s+(your\s+)?age)\b"],
        ),
        IntentRule::any(
            Intent::AskCondition,
            &[
                r"\bwhat\s+(is|was)\s+(wrong|the\s+problem|the\s+issue|the\s+matter|your\s+diagnosis)\b",
                r"\bwhat('|\s+)?s\s+(wrong|the\s+problem|the\s+issue|the\s+matter)\b",
            ],
        ),
        IntentRule::about(
            Intent::AskPainScale,
            &[r"\b(scale|1[- ]?10|1 to 10|rate|severity|how\s*(bad|severe|intense))\b"],
            PAIN,
        ),
        IntentRule::about(
            Intent::AskPainLocation,
            &[r"\b(where|location|locate|which\s*(area|part))\b"],
            PAIN,
        ),
        IntentRule::about(
            Intent::AskPainDuration,
            &[r"\b(how long|since when|duration|when did (it|the pain) start)\b"],
            r"\bpain|ache|hurt\b",
        ),
        IntentRule::any(
            Intent::AskTemperatureValue,
            &[
                r"\b(what|which)\s*(is|was)\s*(your|the)\s*(temp|temperature)\b",
                r"\b(temp|temperature)\s*reading\b",
                r"\bfever\b",
            ],
        ),
        IntentRule::about(
            Intent::AskFeverDuration,
            &[r"\b(how long|since when|duration)\b"],
            r"\b(fever|temperature|temp)\b",
        ),
        IntentRule::about(
            Intent::AskCoughType,
            &[r"\b(dry|wet|productive|phlegm|mucus|type|kind)\b"],
            r"\bcough(s|ing)?\b",
        ),
        IntentRule::any(Intent::AskCough, &[r"\bcough(s|ing)?\b"]),
        IntentRule::any(
            Intent::AskBreathingDifficulty,
            &[r"\b(shortness of breath|breathless|wheeze|wheezing|difficulty\s*(breathing|breath))\b"],
        ),
        IntentRule::any(
            Intent::AskMedicationsTaken,
            &[r"\b(medicines?|medications?|drugs?|pills?)\b"],
        ),
        IntentRule::any(Intent::AskAllergies, &[r"\b(allerg(y|ies)|allergic)\b"]),
        IntentRule::any(
            Intent::AdviceMedication,
            &[r"\b(paracetamol|ibuprofen|antibiotics?|medicines?|tablets?|dose|dosage|take|prescribe)\b"],
        ),
        IntentRule::any(
            Intent::AdviceTests,
            &[r"\b(tests?|blood test|scans?|x-?rays?|lab|labs|investigations?|cbc|rtpcr|mri|ct|ultrasound)\b"],
        ),
        IntentRule::any(
            Intent::AdviceRestHydration,
            &[r"\b(rest|hydrate|water|fluids|oral rehydration|ors|diet|sleep)\b"],
        ),
        IntentRule::any(
            Intent::ClosingThanks,
            &[r"\b(thanks|thank you|appreciate)\b"],
        ),
    ]
});

/// Pure, text-only intent classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// The rule table in priority order, highest first.
    pub fn rules(&self) -> &'static [IntentRule] {
        RULES.as_slice()
    }

    /// Returns the first matching rule's intent, or `None` when nothing matches.
    pub fn match_rule(&self, utterance: &str) -> Option<Intent> {
        let normalized = normalize(utterance);
        self.rules()
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.intent)
    }

    /// Classifies an utterance, mapping non-matches to a fallback intent.
    pub fn classify(&self, utterance: &str) -> Intent {
        self.match_rule(utterance)
            .unwrap_or_else(|| fallback_for(utterance))
    }
}

/// Fallback intent for an utterance no rule matched.
pub fn fallback_for(utterance: &str) -> Intent {
    if normalize(utterance).chars().count() <= TOO_SHORT_MAX_CHARS {
        Intent::TooShort
    } else {
        Intent::Fallback
    }
}

fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

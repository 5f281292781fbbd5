//! Random but internally consistent patient case generation.

use rand::seq::{index, IndexedRandom};
use rand::Rng;

use super::{Condition, CoughType, Profile, PATIENT_NAMES};

const MIN_AGE: u8 = 18;
const MAX_AGE: u8 = 77;
const MIN_PAIN: u8 = 4;
const MAX_PAIN: u8 = 8;
const MIN_SYMPTOMS: usize = 2;
const MAX_SYMPTOMS: usize = 4;

/// Stateless generator of patient profiles.
///
/// All randomness comes from the caller's random source, so a seeded source
/// reproduces the same profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh profile.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Profile {
        let condition = *pick(&Condition::ALL, rng);
        let traits = condition.traits();

        let name = pick(&PATIENT_NAMES, rng).to_string();
        let age = rng.random_range(MIN_AGE..=MAX_AGE);

        let count = rng.random_range(MIN_SYMPTOMS..=MAX_SYMPTOMS);
        let symptoms = sample_without_replacement(traits.symptoms, count, rng);

        let pain_location = pick(traits.pain_locations, rng).to_string();
        let duration = pick(traits.typical_durations, rng).to_string();

        let temperature = traits.typical_temperature.map(|range| {
            let raw = range.min + rng.random::<f64>() * (range.max - range.min);
            round_to_tenth(raw)
        });

        let pain_level = rng.random_range(MIN_PAIN..=MAX_PAIN);

        let cough_type = condition.is_respiratory().then(|| {
            if rng.random_bool(0.5) {
                CoughType::Dry
            } else {
                CoughType::Productive
            }
        });

        Profile {
            name,
            age,
            condition,
            symptoms,
            pain_location,
            pain_level,
            temperature,
            duration,
            cough_type,
        }
    }
}

/// Uniform pick from a catalog table. Every table is non-empty.
fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> &'a T {
    items.choose(rng).expect("catalog tables are non-empty")
}

/// Distinct draws from the pool, in draw order.
fn sample_without_replacement<R: Rng + ?Sized>(
    pool: &[&str],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    index::sample(rng, pool.len(), count.min(pool.len()))
        .into_iter()
        .map(|i| pool[i].to_string())
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

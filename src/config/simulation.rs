//! Simulated patient configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REPLY_DELAY_MS: u64 = 60_000;
const MAX_CHANNEL_CAPACITY: usize = 4096;

/// Timing and randomness of the simulated patient
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Pause between a doctor's first join and the opening complaint
    #[serde(default = "default_greeting_delay")]
    pub greeting_delay_ms: u64,

    /// Minimum "typing" time before a reply
    #[serde(default = "default_reply_delay_min")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the random extra typing time
    #[serde(default = "default_reply_delay_jitter")]
    pub reply_delay_jitter_ms: u64,

    /// Fixed seed for reproducible patients; OS entropy when unset
    pub seed: Option<u64>,

    /// Buffer size of each room's broadcast channel
    #[serde(default = "default_room_channel_capacity")]
    pub room_channel_capacity: usize,
}

impl SimulationConfig {
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    pub fn reply_delay_min(&self) -> Duration {
        Duration::from_millis(self.reply_delay_min_ms)
    }

    pub fn reply_delay_jitter(&self) -> Duration {
        Duration::from_millis(self.reply_delay_jitter_ms)
    }

    /// Validate simulation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let longest_reply = self
            .reply_delay_min_ms
            .saturating_add(self.reply_delay_jitter_ms);
        if longest_reply > MAX_REPLY_DELAY_MS || self.greeting_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ValidationError::ReplyDelayTooLong);
        }
        if self.room_channel_capacity == 0 || self.room_channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            greeting_delay_ms: default_greeting_delay(),
            reply_delay_min_ms: default_reply_delay_min(),
            reply_delay_jitter_ms: default_reply_delay_jitter(),
            seed: None,
            room_channel_capacity: default_room_channel_capacity(),
        }
    }
}

fn default_greeting_delay() -> u64 {
    400
}

fn default_reply_delay_min() -> u64 {
    1000
}

fn default_reply_delay_jitter() -> u64 {
    1000
}

fn default_room_channel_capacity() -> usize {
    128
}

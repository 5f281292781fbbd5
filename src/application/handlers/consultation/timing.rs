//! Simulated patient pacing and delayed delivery.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use crate::config::SimulationConfig;
use crate::domain::consultation::RoomEvent;
use crate::domain::foundation::RoomKey;
use crate::ports::RoomBroadcaster;

/// How long the simulated patient takes to greet and to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTiming {
    pub greeting_delay: Duration,
    pub reply_delay_min: Duration,
    pub reply_delay_jitter: Duration,
}

impl ResponseTiming {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            greeting_delay: config.greeting_delay(),
            reply_delay_min: config.reply_delay_min(),
            reply_delay_jitter: config.reply_delay_jitter(),
        }
    }

    /// Zero delays everywhere; replies are delivered on the next tick.
    pub fn immediate() -> Self {
        Self {
            greeting_delay: Duration::ZERO,
            reply_delay_min: Duration::ZERO,
            reply_delay_jitter: Duration::ZERO,
        }
    }

    /// Typing time before a reply: the minimum plus up to the jitter.
    pub fn reply_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter_ms = self.reply_delay_jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rng.random_range(0..=jitter_ms)
        };
        self.reply_delay_min + Duration::from_millis(extra)
    }
}

impl Default for ResponseTiming {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

/// Broadcasts `events` to `room`, in order, once `delay` has passed.
///
/// Never cancelled; if the room emptied in the meantime the events reach
/// nobody.
pub(crate) fn broadcast_after(
    broadcaster: Arc<dyn RoomBroadcaster>,
    room: RoomKey,
    delay: Duration,
    events: Vec<RoomEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        for event in events {
            let kind = event.kind();
            let reached = broadcaster.broadcast(&room, event).await;
            tracing::trace!(room = %room, kind, reached, "Delivered delayed event");
        }
    })
}

use crate::{
    error::TrackError,
    id_allocator::{IdAllocator, MonotonicIdAllocator, WrappingIdAllocator, DEFAULT_ID_CEILING},
};
use serde::{Deserialize, Serialize};

/// Cycles a track may coast without a matching detection.
pub const DEFAULT_LIFESPAN: u32 = 8;

/// How new tracks get their identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdPolicy {
    /// Cycle through `1..=ceiling`. Identifiers can repeat among live tracks.
    Wrapping { ceiling: u64 },
    /// Count up through `u64`.
    Monotonic,
}

impl Default for IdPolicy {
    fn default() -> Self {
        IdPolicy::Wrapping {
            ceiling: DEFAULT_ID_CEILING,
        }
    }
}

impl IdPolicy {
    pub(crate) fn build(&self) -> Box<dyn IdAllocator + Send> {
        match *self {
            IdPolicy::Wrapping { ceiling } => Box::new(WrappingIdAllocator::new(ceiling)),
            IdPolicy::Monotonic => Box::new(MonotonicIdAllocator::new()),
        }
    }
}

/// Tunables of the tracking cycle. The association and suppression overlap
/// ratios are fixed and not part of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub default_lifespan: u32,
    pub id_policy: IdPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_lifespan: DEFAULT_LIFESPAN,
            id_policy: IdPolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Set the lifespan a track gets on creation and on every match.
    pub fn with_default_lifespan(self, default_lifespan: u32) -> Self {
        Self {
            default_lifespan,
            ..self
        }
    }

    pub fn with_id_policy(self, id_policy: IdPolicy) -> Self {
        Self { id_policy, ..self }
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        if self.default_lifespan == 0 {
            return Err(TrackError::InvalidConfig(
                "default_lifespan must be at least 1".to_string(),
            ));
        }
        if let IdPolicy::Wrapping { ceiling: 0 } = self.id_policy {
            return Err(TrackError::InvalidConfig(
                "wrapping id ceiling must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

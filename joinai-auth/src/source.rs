/// Clock and identifier sources used by the header builders
///
/// Every call to a builder reads the clock and draws an identifier afresh.
/// The fixed variants exist so a header set can be reproduced exactly.

use crate::error::{AuthError, Result};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Source of the current Unix time in whole seconds
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> Result<u64>;
}

/// Source of canonical 36-character UUID strings
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Wall clock, floored to the second
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> Result<u64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| AuthError::Environment(format!("system clock is before the Unix epoch: {}", e)))
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> Result<u64> {
        Ok(self.0)
    }
}

/// Random version-4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuid;

impl IdSource for RandomUuid {
    fn next_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

/// Identifier source that always yields the same value
#[derive(Debug, Clone)]
pub struct FixedId(pub String);

impl FixedId {
    pub fn new(id: impl Into<String>) -> Self {
        FixedId(id.into())
    }
}

impl IdSource for FixedId {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}

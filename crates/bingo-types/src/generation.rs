use std::fmt;

use serde::{Deserialize, Serialize};

/// Version token assigned by the blob store to every successful write.
///
/// Generations are opaque to callers: the only meaningful operation is
/// handing one back to the store as a write precondition. Backends assign
/// them monotonically, so a generation is never reused for the same key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Wrap a raw generation number produced by a backend.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw generation number.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

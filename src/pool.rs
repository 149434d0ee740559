//! Clamped current/maximum counter used for health and move uses.

use serde::{Deserialize, Serialize};

/// A current value that can never leave `0..=maximum`.
///
/// Every mutation clamps, so a pool observed at any point satisfies
/// `current <= maximum`. A health pool at zero means the owner has fainted and
/// a move-use pool at zero means the move cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedPool {
    current: u16,
    maximum: u16,
}

impl BoundedPool {
    /// A full pool.
    pub fn new(maximum: u16) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// A pool starting at `current`, clamped to `maximum`.
    pub fn with_current(current: u16, maximum: u16) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn maximum(&self) -> u16 {
        self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Raise `current`, stopping at `maximum`. Returns the amount actually added.
    pub fn add(&mut self, amount: u16) -> u16 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    /// Lower `current`, stopping at zero. Returns the amount actually removed.
    pub fn subtract(&mut self, amount: u16) -> u16 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    pub fn set_current(&mut self, value: u16) {
        self.current = value.min(self.maximum);
    }

    /// Change the maximum. Lowering it below `current` drags `current` down.
    pub fn set_maximum(&mut self, maximum: u16) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    /// Current value as a fraction of the maximum; an empty-capacity pool reads 0.
    pub fn fraction(&self) -> f32 {
        if self.maximum == 0 {
            0.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }
}

//! Generation-tagged debouncing for text inputs.
//!
//! Every keystroke replaces the pending value and bumps the generation. The
//! caller schedules a timer carrying that generation; when the timer fires
//! only the tick matching the current generation may take the value, so the
//! last input before a pause is the only one applied.

use tracing::debug;

/// Pending value waiting for its debounce timer.
#[derive(Debug, Clone)]
pub struct DebouncedInput<T> {
    pending: Option<T>,
    generation: u64,
}

impl<T> Default for DebouncedInput<T> {
    fn default() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }
}

impl<T> DebouncedInput<T> {
    /// Replaces the pending value and returns the generation its timer must
    /// carry.
    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(value);
        self.generation
    }

    /// Takes the pending value if `generation` is still current.
    ///
    /// Superseded ticks return `None` and leave the pending value in place.
    pub fn take_if_current(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            debug!(
                tick = generation,
                current = self.generation,
                "dropping superseded debounce tick"
            );
            return None;
        }
        self.pending.take()
    }

    /// Takes the pending value immediately, invalidating its timer.
    pub fn flush(&mut self) -> Option<T> {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take()
    }

    /// Discards the pending value and invalidates any scheduled timer.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Returns true while a value waits for its timer.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Value waiting for its timer, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

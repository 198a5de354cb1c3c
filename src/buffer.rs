//! Fixed-Capacity Running-Average Buffer
//!
//! ## Overview
//!
//! Single dust readings are noisy: the optical chamber sees individual
//! particles drift through the beam, so back-to-back measurements can
//! disagree by tens of µg/m³ in perfectly steady air. The driver smooths
//! this with a circular buffer of recent density readings whose mean is
//! the reported "running average".
//!
//! The capacity is a const generic, fixed at compile time, so the buffer
//! is a plain array with no heap allocation. The upstream Arduino
//! driver `new`-allocated an `int16_t` array and marked empty slots with
//! `-1`; here the slots are `Option<u16>`, which keeps the same
//! averaging semantics without the sentinel value.
//!
//! ## Behavior
//!
//! - Writes overwrite the oldest entry once the buffer is full, so the
//!   average always covers the most recent `N` readings.
//! - Averaging counts only occupied slots: after 3 writes into a
//!   60-capacity buffer the mean is over those 3 readings, not 60.
//! - `N = 0` is a valid instantiation meaning "smoothing disabled";
//!   writes are ignored and the mean of nothing is 0. The caller-facing
//!   error for the disabled case lives in the engine, not here.
//!
//! ## Example
//!
//! ```rust
//! use gp2y_dust::buffer::RunningAverage;
//!
//! let mut avg: RunningAverage<3> = RunningAverage::new();
//! for density in [10, 20, 30, 40] {
//!     avg.push(density);
//! }
//! // Oldest reading (10) was overwritten; mean of [20, 30, 40]
//! assert_eq!(avg.mean(), 30);
//! ```

use libm::roundf;

/// Circular buffer of recent density readings with slot-exact averaging.
///
/// `N` is the window size in readings. Reading density once per second
/// with the default `N = 60` yields a one-minute running average.
#[derive(Debug, Clone)]
pub struct RunningAverage<const N: usize> {
    /// `None` marks a slot that has never been written
    slots: [Option<u16>; N],
    /// Next write position, wraps modulo N
    write_pos: usize,
}

impl<const N: usize> RunningAverage<N> {
    /// Create an empty buffer with every slot unoccupied.
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            write_pos: 0,
        }
    }

    /// True if the window size is zero (smoothing disabled).
    pub const fn is_disabled() -> bool {
        N == 0
    }

    /// Record a density reading, overwriting the oldest once full.
    pub fn push(&mut self, density: u16) {
        if N == 0 {
            return;
        }

        self.slots[self.write_pos] = Some(density);
        self.write_pos = (self.write_pos + 1) % N;
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True if no reading was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Rounded mean over the occupied slots, 0 if none are occupied.
    pub fn mean(&self) -> u16 {
        let mut sum = 0.0f32;
        let mut count = 0u32;

        for value in self.slots.iter().flatten() {
            sum += *value as f32;
            count += 1;
        }

        if count == 0 {
            return 0;
        }

        roundf(sum / count as f32) as u16
    }

    /// Forget all readings; capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.write_pos = 0;
    }
}

impl<const N: usize> Default for RunningAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_means_zero() {
        let avg: RunningAverage<5> = RunningAverage::new();
        assert!(avg.is_empty());
        assert_eq!(avg.len(), 0);
        assert_eq!(avg.mean(), 0);
    }

    #[test]
    fn partial_fill_counts_only_occupied_slots() {
        let mut avg: RunningAverage<60> = RunningAverage::new();
        avg.push(10);
        avg.push(20);

        assert_eq!(avg.len(), 2);
        assert_eq!(avg.mean(), 15);
    }

    #[test]
    fn circular_overwrite_keeps_last_n() {
        let mut avg: RunningAverage<3> = RunningAverage::new();
        for density in [10, 20, 30, 40] {
            avg.push(density);
        }

        // 10 was overwritten, mean over [20, 30, 40]
        assert_eq!(avg.len(), 3);
        assert_eq!(avg.mean(), 30);
    }

    #[test]
    fn mean_rounds_to_nearest() {
        let mut avg: RunningAverage<4> = RunningAverage::new();
        avg.push(1);
        avg.push(2);

        // 1.5 rounds up
        assert_eq!(avg.mean(), 2);
    }

    #[test]
    fn zero_capacity_ignores_writes() {
        let mut avg: RunningAverage<0> = RunningAverage::new();
        avg.push(100);

        assert!(RunningAverage::<0>::is_disabled());
        assert!(avg.is_empty());
        assert_eq!(avg.mean(), 0);
    }

    #[test]
    fn clear_resets_slots_and_cursor() {
        let mut avg: RunningAverage<3> = RunningAverage::new();
        avg.push(10);
        avg.push(20);
        avg.clear();

        assert!(avg.is_empty());
        avg.push(5);
        assert_eq!(avg.mean(), 5);
    }
}

//! Error Types for Dust Sensor Operations
//!
//! The driver keeps its error surface deliberately small: the measurement
//! pipeline itself is total over its inputs, and the hardware traits are
//! infallible at this layer (no bus, no retries). What remains is the
//! handful of queries that can legitimately have nothing to report.
//!
//! Errors are kept Copy and heap-free so they can be returned from hot
//! paths on embedded targets without allocation.

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Dust sensor errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Running average was disabled at construction (capacity 0).
    ///
    /// The upstream Arduino driver returned `(uint16_t)-1` here; an
    /// explicit error replaces that magic value.
    #[error("running average disabled: constructed with capacity 0")]
    RunningAverageDisabled,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::RunningAverageDisabled => {
                defmt::write!(fmt, "running average disabled (capacity 0)")
            }
        }
    }
}

//! Driver for Sharp GP2Y10xx optical dust sensors
//!
//! Converts the sensor's noisy pulsed-LED analog output into calibrated
//! dust density readings in µg/m³, with baseline drift tracking and
//! running-average smoothing.
//!
//! Key constraints:
//! - no_std by default, no heap allocation
//! - Hardware access behind injectable traits for host-side testing
//! - Fixed datasheet pulse timing (10 ms duty cycle, 280 µs settle)
//!
//! ```rust
//! use gp2y_dust::{DustSensor, SensorType};
//! use gp2y_dust::hal::{CountingDelay, RecordingLed, ScriptedAdc};
//!
//! let adc = ScriptedAdc::new(&[184]);
//! let mut sensor: DustSensor<RecordingLed, ScriptedAdc<'_>, CountingDelay> =
//!     DustSensor::new(
//!         SensorType::Gp2y1014au0f,
//!         RecordingLed::default(),
//!         adc,
//!         CountingDelay::default(),
//!     );
//!
//! sensor.init();
//! let density = sensor.read_density();      // blocks ~200 ms on hardware
//! let smoothed = sensor.running_average();  // mean of recent readings
//! # assert_eq!(density, 60);
//! # assert_eq!(smoothed, Ok(60));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod hal;
pub mod profile;
pub mod sensor;

// Public API
pub use errors::{SensorError, SensorResult};
pub use profile::{SensorProfile, SensorType};
pub use sensor::DustSensor;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}

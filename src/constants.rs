//! Sensor Timing and Protocol Constants
//!
//! This module defines the fixed physical constants of the Sharp GP2Y10xx
//! optical dust sensor family. These come from the sensor datasheets and
//! are part of the measurement protocol, not tunables: changing them
//! produces readings outside the sensor's characterized response.

// ===== LED PULSE TIMING =====

/// Time to wait after switching the IR LED on before sampling (µs).
///
/// The sensor's optical output needs 0.28 ms to settle after the LED
/// fires. Sampling earlier reads the rising edge, not the dust signal.
///
/// Source: Sharp GP2Y1010AU0F datasheet, fig. 2 (sampling timing)
pub const LED_SETTLE_US: u32 = 280;

/// Remainder of the 10 ms pulse cycle after settle + ADC conversion (µs).
///
/// The full duty cycle is 10 ms with a 0.32 ms LED-on window. The ADC
/// conversion itself takes roughly 100 µs, so between pulses we wait
/// 10000 - 280 - 100 µs. Shortening this overruns the LED duty cycle
/// and overheats the emitter.
pub const PULSE_CYCLE_REMAINDER_US: u32 = 9620;

// ===== ADC ASSUMPTIONS =====

/// Full-scale value of the reference 10-bit ADC.
///
/// Raw readings are interpreted against a 1024-step converter, matching
/// the Arduino `analogRead()` range the sensor was characterized with.
/// Platforms with wider ADCs should downscale before handing values to
/// the driver.
pub const ADC_FULL_SCALE: f32 = 1024.0;

/// Default ADC reference voltage (V).
pub const DEFAULT_VREF: f32 = 5.0;

// ===== MEASUREMENT DEFAULTS =====

/// Default number of raw pulses averaged per density reading.
///
/// At one pulse per 10 ms cycle this makes a density reading take
/// about 200 ms.
pub const DEFAULT_SAMPLE_COUNT: u16 = 20;

/// Default sensitivity in volts per 100 µg/m³.
///
/// Typical value for both supported sensor variants per datasheet.
pub const DEFAULT_SENSITIVITY: f32 = 0.5;

/// Density readings required before a baseline candidate is trusted.
///
/// The candidate is the minimum voltage seen over a window; with fewer
/// readings than this the minimum is too likely to still include dust.
pub const BASELINE_CANDIDATE_MIN_READINGS: u16 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_timing_sums_to_duty_cycle() {
        // 280 settle + ~100 conversion + 9620 remainder = 10 ms cycle
        assert_eq!(LED_SETTLE_US + 100 + PULSE_CYCLE_REMAINDER_US, 10_000);
    }
}

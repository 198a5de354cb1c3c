//! Dust Sensor Measurement Engine
//!
//! ## Overview
//!
//! This module implements the full signal-conditioning pipeline for the
//! Sharp GP2Y10xx family:
//!
//! 1. Pulse the IR LED and sample the output voltage on the datasheet
//!    timing grid (280 µs settle inside a fixed 10 ms cycle).
//! 2. Average a burst of raw samples and scale to volts against the ADC
//!    reference, applying the user's calibration factor.
//! 3. Convert voltage to dust density by linear scaling relative to the
//!    zero-dust baseline, clamping below-baseline noise to zero.
//! 4. Feed the running-average window and the baseline drift tracker.
//!
//! ## Baseline drift
//!
//! The "zero dust" output voltage of these sensors drifts with
//! temperature and LED aging. The engine continuously tracks the lowest
//! plausible no-dust voltage it has seen; once enough readings have
//! accumulated, that minimum becomes a *baseline candidate* the caller
//! can inspect via [`DustSensor::baseline_candidate`] and accept with
//! [`DustSensor::set_baseline`]. The driver never moves the baseline on
//! its own: accepting a candidate is always an explicit caller action,
//! since only the application knows whether the air was actually clean
//! during the window.
//!
//! ## Timing contract
//!
//! [`DustSensor::read_density`] blocks for `num_samples × 10 ms`
//! (~200 ms at the default 20 samples). The 10 ms cycle is a physical
//! constant of the sensor: sampling faster overruns the LED duty cycle,
//! slower is fine but wastes responsiveness. The burst runs to
//! completion; there is no cancellation.
//!
//! ## Example
//!
//! ```rust
//! use gp2y_dust::{DustSensor, SensorType};
//! use gp2y_dust::hal::{CountingDelay, RecordingLed, ScriptedAdc};
//!
//! // ~3.0 V on a 5 V reference: heavy dust
//! let adc = ScriptedAdc::new(&[614]);
//! let mut sensor: DustSensor<RecordingLed, ScriptedAdc<'_>, CountingDelay> =
//!     DustSensor::new(
//!         SensorType::Gp2y1010au0f,
//!         RecordingLed::default(),
//!         adc,
//!         CountingDelay::default(),
//!     );
//!
//! sensor.init();
//! let density = sensor.read_density();
//! assert!(density > 400);
//! ```

use libm::roundf;

use crate::{
    buffer::RunningAverage,
    constants::{
        ADC_FULL_SCALE, BASELINE_CANDIDATE_MIN_READINGS, DEFAULT_SAMPLE_COUNT,
        DEFAULT_SENSITIVITY, DEFAULT_VREF, LED_SETTLE_US, PULSE_CYCLE_REMAINDER_US,
    },
    errors::{SensorError, SensorResult},
    hal::{DelayUs, DustAdc, IrLed},
    profile::{SensorProfile, SensorType},
};

// Optional logging shim so the core stays no_std-clean
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Dust sensor measurement engine.
///
/// Owns the hardware handles, the datasheet profile, the calibration
/// state and the running-average window. `RA` is the running-average
/// window size in readings; `0` disables smoothing, the default of 60
/// gives a one-minute window at one reading per second.
///
/// Single-owner, single-threaded: one engine instance owns the LED and
/// ADC lines exclusively for its lifetime.
#[derive(Debug)]
pub struct DustSensor<L, A, D, const RA: usize = 60> {
    led: L,
    adc: A,
    delay: D,
    profile: SensorProfile,
    vref: f32,
    calibration_factor: f32,
    /// Volts per 100 µg/m³
    sensitivity: f32,
    /// Accepted zero-dust voltage; density is measured relative to this
    baseline_voltage: f32,
    /// Lowest plausible no-dust voltage since the last candidate reset
    min_observed_voltage: f32,
    candidate_ready: bool,
    samples_since_reset: u16,
    running_average: RunningAverage<RA>,
}

impl<L, A, D, const RA: usize> DustSensor<L, A, D, RA>
where
    L: IrLed,
    A: DustAdc,
    D: DelayUs,
{
    /// Create an engine with the default 5 V ADC reference.
    pub fn new(sensor_type: SensorType, led: L, adc: A, delay: D) -> Self {
        Self::new_with_vref(sensor_type, led, adc, delay, DEFAULT_VREF)
    }

    /// Create an engine with an explicit ADC reference voltage.
    ///
    /// Boards running the sensor through a divider into a 3.3 V ADC
    /// should pass the effective full-scale voltage here.
    pub fn new_with_vref(sensor_type: SensorType, led: L, adc: A, delay: D, vref: f32) -> Self {
        let profile = SensorProfile::from(sensor_type);

        Self {
            led,
            adc,
            delay,
            profile,
            vref,
            calibration_factor: 1.0,
            sensitivity: DEFAULT_SENSITIVITY,
            baseline_voltage: profile.typ_zero_dust_voltage,
            min_observed_voltage: profile.max_zero_dust_voltage,
            candidate_ready: false,
            samples_since_reset: 0,
            running_average: RunningAverage::new(),
        }
    }

    /// Configure the LED control line for output. Call once before the
    /// first measurement.
    pub fn init(&mut self) {
        self.led.configure();
    }

    /// Datasheet profile of the selected sensor variant.
    pub fn profile(&self) -> &SensorProfile {
        &self.profile
    }

    /// Pulse the LED once and capture a single raw ADC reading.
    ///
    /// LED on, 280 µs optical settle, one conversion, LED off. The
    /// caller owes the sensor the rest of the 10 ms cycle before the
    /// next pulse.
    fn read_raw_once(&mut self) -> u16 {
        self.led.set_active(true);
        self.delay.delay_us(LED_SETTLE_US);
        let raw = self.adc.read_raw();
        self.led.set_active(false);
        raw
    }

    /// Measure dust density in µg/m³ with the default 20-sample burst.
    ///
    /// Blocks for about 200 ms. See [`Self::read_density_samples`].
    pub fn read_density(&mut self) -> u16 {
        self.read_density_samples(DEFAULT_SAMPLE_COUNT)
    }

    /// Measure dust density in µg/m³, averaging `num_samples` pulses.
    ///
    /// Blocks the calling thread for `num_samples × 10 ms`. Returns a
    /// density in the sensor's linear region, typically 0–600 µg/m³;
    /// values below the baseline clamp to 0, the upper end is not
    /// clamped.
    ///
    /// Each call also advances the running-average window and the
    /// baseline-candidate tracker.
    pub fn read_density_samples(&mut self, num_samples: u16) -> u16 {
        // An empty burst has no meaningful average
        let num_samples = num_samples.max(1);

        let mut total: u32 = 0;
        for _ in 0..num_samples {
            total += self.read_raw_once() as u32;
            // Remainder of the 10 ms cycle: 10000 - 280 settle - ~100 conversion
            self.delay.delay_us(PULSE_CYCLE_REMAINDER_US);
        }

        let avg_raw = (total / num_samples as u32) as u16;
        let scaled_voltage = self.scale_to_voltage(avg_raw);

        // Track the lowest voltage that could plausibly be "no dust";
        // spikes from real particulate events fall outside the band and
        // must not drag the candidate around.
        if scaled_voltage < self.min_observed_voltage
            && self.profile.in_zero_dust_band(scaled_voltage)
        {
            self.min_observed_voltage = scaled_voltage;
        }

        let density = density_from_voltage(scaled_voltage, self.baseline_voltage, self.sensitivity);

        log_debug!(
            "raw avg {} -> {:.3} V -> {} ug/m3 (baseline {:.3} V)",
            avg_raw,
            scaled_voltage,
            density,
            self.baseline_voltage
        );

        self.running_average.push(density);

        if !self.candidate_ready {
            self.samples_since_reset += 1;
            if self.samples_since_reset > BASELINE_CANDIDATE_MIN_READINGS {
                self.candidate_ready = true;
            }
        }

        density
    }

    /// Running average of recent density readings in µg/m³.
    ///
    /// Counts only readings taken so far when the window is not yet
    /// full, and returns 0 before the first reading. Fails with
    /// [`SensorError::RunningAverageDisabled`] when the engine was
    /// instantiated with `RA = 0`.
    pub fn running_average(&self) -> SensorResult<u16> {
        if RA == 0 {
            return Err(SensorError::RunningAverageDisabled);
        }

        Ok(self.running_average.mean())
    }

    /// Currently accepted zero-dust baseline voltage.
    pub fn baseline(&self) -> f32 {
        self.baseline_voltage
    }

    /// Set the zero-dust baseline voltage.
    ///
    /// Not validated; the usual source of a sane value is an accepted
    /// [`Self::baseline_candidate`].
    pub fn set_baseline(&mut self, zero_dust_voltage: f32) {
        self.baseline_voltage = zero_dust_voltage;
    }

    /// True once enough readings have accumulated for the candidate to
    /// be trustworthy.
    pub fn baseline_candidate_ready(&self) -> bool {
        self.candidate_ready
    }

    /// Fetch the baseline drift candidate.
    ///
    /// Two-phase contract:
    ///
    /// - While the tracker is still accumulating (fewer than 10 readings
    ///   since the last reset), returns the provisional minimum without
    ///   touching any state; repeated calls are harmless peeks.
    /// - Once ready, returns the frozen minimum and resets the tracker:
    ///   the minimum reseeds to the profile's max zero-dust voltage, the
    ///   reading counter restarts and readiness clears. The reset
    ///   happens whether or not the caller accepts the value.
    ///
    /// You need on the order of a minute of readings for the candidate
    /// to be useful. Accept it with [`Self::set_baseline`] when the air
    /// was known clean over the window.
    pub fn baseline_candidate(&mut self) -> f32 {
        if !self.candidate_ready {
            return self.min_observed_voltage;
        }

        let candidate = self.min_observed_voltage;

        // Reset tracking so a fresh candidate can form
        self.min_observed_voltage = self.profile.max_zero_dust_voltage;
        self.samples_since_reset = 0;
        self.candidate_ready = false;

        candidate
    }

    /// Sensitivity in volts per 100 µg/m³.
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Set the sensitivity slope in volts per 100 µg/m³.
    ///
    /// Datasheet bands: 0.425–0.75 V (GP2Y1010AU0F), 0.35–0.65 V
    /// (GP2Y1014AU0F), typical 0.5 V for both. Not validated.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Multiplicative correction applied to the measured voltage.
    pub fn calibration_factor(&self) -> f32 {
        self.calibration_factor
    }

    /// Set the calibration factor, typically derived by comparing
    /// against a precision instrument. Not validated; default 1.0.
    pub fn set_calibration_factor(&mut self, factor: f32) {
        self.calibration_factor = factor;
    }

    /// Tear down the engine and hand the hardware handles back.
    pub fn release(self) -> (L, A, D) {
        (self.led, self.adc, self.delay)
    }

    fn scale_to_voltage(&self, avg_raw: u16) -> f32 {
        scale_to_voltage(avg_raw, self.vref, self.calibration_factor)
    }
}

/// Scale an averaged raw ADC value to volts.
///
/// Interprets the raw value against the 10-bit full scale and the ADC
/// reference, then applies the calibration factor.
#[inline]
pub(crate) fn scale_to_voltage(avg_raw: u16, vref: f32, calibration_factor: f32) -> f32 {
    avg_raw as f32 * (vref / ADC_FULL_SCALE) * calibration_factor
}

/// Convert a scaled voltage to dust density in µg/m³.
///
/// Below-baseline voltages are noise, not negative dust, and clamp to
/// zero. Above baseline the response is linear: `sensitivity` volts per
/// 100 µg/m³.
#[inline]
pub(crate) fn density_from_voltage(scaled_voltage: f32, baseline: f32, sensitivity: f32) -> u16 {
    if scaled_voltage < baseline {
        return 0;
    }

    roundf((scaled_voltage - baseline) / sensitivity * 100.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{CountingDelay, RecordingLed, ScriptedAdc};

    type TestSensor<'a, const RA: usize> =
        DustSensor<RecordingLed, ScriptedAdc<'a>, CountingDelay, RA>;

    fn sensor_with<const RA: usize>(script: &[u16]) -> TestSensor<'_, RA> {
        DustSensor::new(
            SensorType::Gp2y1014au0f,
            RecordingLed::default(),
            ScriptedAdc::new(script),
            CountingDelay::default(),
        )
    }

    #[test]
    fn voltage_scaling_algebra() {
        // 512/1024 of 5 V is 2.5 V
        assert!((scale_to_voltage(512, 5.0, 1.0) - 2.5).abs() < 1e-6);
        // Calibration factor multiplies through
        assert!((scale_to_voltage(512, 5.0, 1.2) - 3.0).abs() < 1e-6);
        // 3.3 V reference
        assert!((scale_to_voltage(1024, 3.3, 1.0) - 3.3).abs() < 1e-6);
    }

    #[test]
    fn density_clamps_below_baseline() {
        assert_eq!(density_from_voltage(0.4, 0.6, 0.5), 0);
        assert_eq!(density_from_voltage(0.0, 0.6, 0.5), 0);
    }

    #[test]
    fn density_linear_above_baseline() {
        // (0.9 - 0.6) / 0.5 * 100 = 60
        assert_eq!(density_from_voltage(0.9, 0.6, 0.5), 60);
        // (3.05 - 0.9) / 0.5 * 100 = 430
        assert_eq!(density_from_voltage(3.05, 0.9, 0.5), 430);
        // Exactly at baseline reads zero dust
        assert_eq!(density_from_voltage(0.6, 0.6, 0.5), 0);
    }

    #[test]
    fn construction_defaults() {
        let sensor = sensor_with::<60>(&[0]);

        assert_eq!(sensor.baseline(), 0.6);
        assert_eq!(sensor.sensitivity(), 0.5);
        assert_eq!(sensor.calibration_factor(), 1.0);
        assert!(!sensor.baseline_candidate_ready());
        assert_eq!(sensor.profile().max_zero_dust_voltage, 1.1);
    }

    #[test]
    fn init_configures_led_line() {
        let mut sensor = sensor_with::<60>(&[0]);
        sensor.init();

        let (led, _, _) = sensor.release();
        assert!(led.configured);
    }

    #[test]
    fn pulse_timing_per_sample() {
        let mut sensor = sensor_with::<60>(&[100]);
        sensor.read_density_samples(20);

        let (led, adc, delay) = sensor.release();
        // One on/off pair per pulse
        assert_eq!(led.transitions.len(), 40);
        assert_eq!(adc.reads(), 20);
        // 280 µs settle + 9620 µs remainder per cycle; the ~100 µs ADC
        // conversion is hardware time, not delay time
        assert_eq!(delay.elapsed_us, 20 * (280 + 9_620));
    }

    #[test]
    fn density_from_scripted_burst() {
        // Constant 184 raw on 5 V: 184 * 5/1024 = 0.8984 V
        // (0.8984 - 0.6) / 0.5 * 100 = 59.69 -> 60
        let mut sensor = sensor_with::<60>(&[184]);
        assert_eq!(sensor.read_density(), 60);
    }

    #[test]
    fn zero_sample_burst_degrades_to_one() {
        let mut sensor = sensor_with::<60>(&[184]);
        // Must not divide by zero
        assert_eq!(sensor.read_density_samples(0), 60);
    }

    #[test]
    fn running_average_disabled_at_zero_capacity() {
        let sensor = sensor_with::<0>(&[0]);
        assert_eq!(
            sensor.running_average(),
            Err(SensorError::RunningAverageDisabled)
        );
    }

    #[test]
    fn running_average_over_written_slots() {
        let mut sensor = sensor_with::<60>(&[184]);
        assert_eq!(sensor.running_average(), Ok(0));

        sensor.read_density();
        sensor.read_density();
        assert_eq!(sensor.running_average(), Ok(60));
    }

    #[test]
    fn accessors_round_trip() {
        let mut sensor = sensor_with::<60>(&[0]);

        sensor.set_baseline(0.42);
        assert_eq!(sensor.baseline(), 0.42);

        sensor.set_sensitivity(0.65);
        assert_eq!(sensor.sensitivity(), 0.65);

        sensor.set_calibration_factor(1.1);
        assert_eq!(sensor.calibration_factor(), 1.1);
    }
}

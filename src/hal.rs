//! Hardware Abstraction for the Dust Sensor
//!
//! The GP2Y10xx needs three things from the host board: a GPIO line to
//! pulse the IR LED, one analog input for the sensor output voltage, and
//! blocking microsecond delays to honor the pulse timing. Each is a
//! small trait so the driver can run against real pins on hardware and
//! against scripted doubles in tests.
//!
//! The traits are infallible: at this layer a GPIO write or ADC sample
//! either works or the board is beyond software recovery. Adapters that
//! wrap fallible HALs should handle or panic on their own errors before
//! values reach the driver.
//!
//! ## Polarity
//!
//! The trait speaks in logical terms: `set_active(true)` means "LED
//! emitting". The sensor's LED drive input is active-low on the usual
//! breakout wiring, so a real adapter will typically drive the pin LOW
//! for `active = true`. Keeping the inversion in the adapter means the
//! driver core never needs to know the wiring.

/// IR LED control line.
pub trait IrLed {
    /// One-time pin setup, called from [`DustSensor::init`](crate::DustSensor::init).
    fn configure(&mut self);

    /// Switch the LED on (`true`) or off (`false`).
    fn set_active(&mut self, active: bool);
}

/// Analog input connected to the sensor's output voltage (Vo).
pub trait DustAdc {
    /// Sample the ADC once. Values are expected in `[0, 1024)` per the
    /// reference 10-bit converter.
    fn read_raw(&mut self) -> u16;
}

/// Blocking delay provider for the pulse timing.
pub trait DelayUs {
    /// Block for `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

/// LED double that records the switching sequence.
///
/// Ships in the crate proper (not just tests) so downstream users can
/// unit-test their sampling loops without hardware.
#[derive(Debug, Default)]
pub struct RecordingLed {
    /// Log of `set_active` calls in order.
    pub transitions: Transitions,
    /// Whether `configure` was called.
    pub configured: bool,
}

/// Fixed-size transition log for [`RecordingLed`].
///
/// Bounded so the double stays allocation-free under no_std; a 20-sample
/// default burst produces 40 transitions.
#[derive(Debug)]
pub struct Transitions {
    states: [bool; 64],
    len: usize,
}

impl Default for Transitions {
    fn default() -> Self {
        Self { states: [false; 64], len: 0 }
    }
}

impl Transitions {
    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Recorded states, oldest first. Saturates at the log capacity.
    pub fn as_slice(&self) -> &[bool] {
        &self.states[..self.len]
    }

    fn push(&mut self, state: bool) {
        if self.len < self.states.len() {
            self.states[self.len] = state;
            self.len += 1;
        }
    }
}

impl IrLed for RecordingLed {
    fn configure(&mut self) {
        self.configured = true;
    }

    fn set_active(&mut self, active: bool) {
        self.transitions.push(active);
    }
}

/// ADC double that replays a scripted sequence of raw values.
///
/// Repeats the final value once the script is exhausted, so a constant
/// reading can be scripted as a single element.
#[derive(Debug)]
pub struct ScriptedAdc<'a> {
    script: &'a [u16],
    pos: usize,
}

impl<'a> ScriptedAdc<'a> {
    /// Create a scripted ADC. `script` must be non-empty.
    pub fn new(script: &'a [u16]) -> Self {
        debug_assert!(!script.is_empty());
        Self { script, pos: 0 }
    }

    /// Number of samples consumed so far.
    pub fn reads(&self) -> usize {
        self.pos
    }
}

impl DustAdc for ScriptedAdc<'_> {
    fn read_raw(&mut self) -> u16 {
        let idx = self.pos.min(self.script.len() - 1);
        self.pos += 1;
        self.script[idx]
    }
}

/// Delay double that counts time instead of blocking.
#[derive(Debug, Default)]
pub struct CountingDelay {
    /// Total microseconds "waited".
    pub elapsed_us: u64,
}

impl DelayUs for CountingDelay {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += us as u64;
    }
}

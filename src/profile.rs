//! Sensor Variants and Datasheet Profiles
//!
//! Two Sharp dust sensors share the same pulse protocol but ship with
//! different zero-dust output characteristics. The profile captures the
//! manufacturer's min/typ/max bounds on the no-dust output voltage; the
//! driver uses them to seed the baseline and to reject implausible
//! baseline candidates during drift tracking.

/// Supported Sharp dust sensor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorType {
    /// GP2Y1010AU0F
    ///
    /// Sensitivity min/typ/max: 0.425 / 0.5 / 0.75 V per 100 µg/m³.
    /// Zero-dust output min/typ/max: 0 / 0.9 / 1.5 V.
    Gp2y1010au0f,
    /// GP2Y1014AU0F
    ///
    /// Sensitivity min/typ/max: 0.35 / 0.5 / 0.65 V per 100 µg/m³.
    /// Zero-dust output min/typ/max: 0.1 / 0.6 / 1.1 V.
    Gp2y1014au0f,
}

/// Datasheet bounds for one sensor variant.
///
/// Immutable once selected; the driver holds a copy for the lifetime of
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorProfile {
    /// Lowest plausible no-dust output voltage (V).
    pub min_zero_dust_voltage: f32,
    /// Typical no-dust output voltage (V). Seeds the baseline.
    pub typ_zero_dust_voltage: f32,
    /// Highest plausible no-dust output voltage (V). Seeds the
    /// baseline-candidate minimum tracker.
    pub max_zero_dust_voltage: f32,
    /// Lower bound of the datasheet sensitivity band (V per 100 µg/m³).
    /// Informational; the driver does not enforce it.
    pub min_sensitivity: f32,
    /// Upper bound of the datasheet sensitivity band (V per 100 µg/m³).
    pub max_sensitivity: f32,
}

impl SensorProfile {
    /// GP2Y1010AU0F datasheet profile.
    pub const GP2Y1010AU0F: Self = Self {
        min_zero_dust_voltage: 0.0,
        typ_zero_dust_voltage: 0.9,
        max_zero_dust_voltage: 1.5,
        min_sensitivity: 0.425,
        max_sensitivity: 0.75,
    };

    /// GP2Y1014AU0F datasheet profile.
    pub const GP2Y1014AU0F: Self = Self {
        min_zero_dust_voltage: 0.1,
        typ_zero_dust_voltage: 0.6,
        max_zero_dust_voltage: 1.1,
        min_sensitivity: 0.35,
        max_sensitivity: 0.65,
    };

    /// Check whether a voltage lies in the plausible no-dust band.
    ///
    /// Used by the drift tracker to keep dust-event spikes out of the
    /// baseline candidate.
    #[inline]
    pub fn in_zero_dust_band(&self, voltage: f32) -> bool {
        voltage >= self.min_zero_dust_voltage && voltage <= self.max_zero_dust_voltage
    }
}

impl From<SensorType> for SensorProfile {
    fn from(sensor_type: SensorType) -> Self {
        match sensor_type {
            SensorType::Gp2y1010au0f => Self::GP2Y1010AU0F,
            SensorType::Gp2y1014au0f => Self::GP2Y1014AU0F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_datasheet() {
        let p = SensorProfile::from(SensorType::Gp2y1010au0f);
        assert_eq!(p.typ_zero_dust_voltage, 0.9);
        assert_eq!(p.max_zero_dust_voltage, 1.5);

        let p = SensorProfile::from(SensorType::Gp2y1014au0f);
        assert_eq!(p.min_zero_dust_voltage, 0.1);
        assert_eq!(p.typ_zero_dust_voltage, 0.6);
    }

    #[test]
    fn zero_dust_band_is_inclusive() {
        let p = SensorProfile::GP2Y1014AU0F;
        assert!(p.in_zero_dust_band(0.1));
        assert!(p.in_zero_dust_band(1.1));
        assert!(p.in_zero_dust_band(0.6));
        assert!(!p.in_zero_dust_band(0.09));
        assert!(!p.in_zero_dust_band(1.2));
    }
}

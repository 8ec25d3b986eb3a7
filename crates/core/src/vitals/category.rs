//! Display classification of vitals: status bands, BMI category and the oxygen alert.
//!
//! None of this affects validation; a value can be valid and still be `Critical`.

use super::field::VitalField;
use super::sanitise::{parse_number, parse_positive};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalStatus {
    Critical,
    Warning,
    Normal,
}

/// Thresholds for one vital sign.
///
/// `Critical` below `crit_low` or at/above `crit_high`; `Warning` in `[warn_low, warn_high)`;
/// otherwise `Normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bands {
    pub crit_low: Option<f64>,
    pub warn_low: Option<f64>,
    pub warn_high: Option<f64>,
    pub crit_high: Option<f64>,
}

impl Bands {
    fn new(
        crit_low: Option<f64>,
        warn_low: Option<f64>,
        warn_high: Option<f64>,
        crit_high: Option<f64>,
    ) -> Self {
        Self {
            crit_low,
            warn_low,
            warn_high,
            crit_high,
        }
    }

    pub fn classify(&self, value: f64) -> VitalStatus {
        let below = self.crit_low.is_some_and(|low| value < low);
        let above = self.crit_high.is_some_and(|high| value >= high);
        if below || above {
            return VitalStatus::Critical;
        }

        if let (Some(low), Some(high)) = (self.warn_low, self.warn_high) {
            if value >= low && value < high {
                return VitalStatus::Warning;
            }
        }

        VitalStatus::Normal
    }
}

/// Bands for the fields that carry a status. Pain and GCS have none.
///
/// Weight and height have none either: their warning band would span the whole accepted range
/// (1-350 kg, 30-250 cm), so every valid reading would show as a warning.
pub fn bands_for(field: VitalField) -> Option<Bands> {
    let bands = match field {
        VitalField::Pulse => Bands::new(Some(40.0), Some(100.0), Some(120.0), Some(120.0)),
        VitalField::Temperature => Bands::new(Some(95.0), Some(100.5), Some(102.0), Some(102.0)),
        VitalField::BpSystolic => Bands::new(Some(90.0), Some(140.0), Some(160.0), Some(160.0)),
        VitalField::BpDiastolic => Bands::new(None, Some(90.0), Some(100.0), Some(100.0)),
        VitalField::Spo2 => Bands::new(Some(90.0), Some(90.0), Some(94.0), Some(101.0)),
        VitalField::RespiratoryRate => Bands::new(Some(8.0), Some(22.0), Some(30.0), Some(30.0)),
        _ => return None,
    };
    Some(bands)
}

/// Status of `field` holding `text`; `None` for unbanded fields or text that is not a number.
pub fn status(field: VitalField, text: &str) -> Option<VitalStatus> {
    let bands = bands_for(field)?;
    parse_number(text).map(|v| bands.classify(v))
}

/// Combined blood-pressure status: the worse side wins, and `Normal` needs both sides.
pub fn blood_pressure_status(
    systolic: Option<VitalStatus>,
    diastolic: Option<VitalStatus>,
) -> Option<VitalStatus> {
    let either = |s: VitalStatus| systolic == Some(s) || diastolic == Some(s);

    if either(VitalStatus::Critical) {
        Some(VitalStatus::Critical)
    } else if either(VitalStatus::Warning) {
        Some(VitalStatus::Warning)
    } else if systolic == Some(VitalStatus::Normal) && diastolic == Some(VitalStatus::Normal) {
        Some(VitalStatus::Normal)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

pub fn bmi_category(bmi: &str) -> Option<BmiCategory> {
    let value = parse_positive(bmi)?;
    let category = if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 25.0 {
        BmiCategory::Normal
    } else if value < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    Some(category)
}

/// SpO₂ below which supplemental oxygen is flagged.
pub const OXYGEN_ALERT_BELOW: f64 = 92.0;

pub fn oxygen_required(spo2: &str) -> bool {
    parse_number(spo2).is_some_and(|v| v < OXYGEN_ALERT_BELOW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_bands() {
        assert_eq!(status(VitalField::Pulse, "39"), Some(VitalStatus::Critical));
        assert_eq!(status(VitalField::Pulse, "72"), Some(VitalStatus::Normal));
        assert_eq!(status(VitalField::Pulse, "100"), Some(VitalStatus::Warning));
        assert_eq!(status(VitalField::Pulse, "120"), Some(VitalStatus::Critical));
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(status(VitalField::Temperature, "98.6"), Some(VitalStatus::Normal));
        assert_eq!(status(VitalField::Temperature, "100.5"), Some(VitalStatus::Warning));
        assert_eq!(status(VitalField::Temperature, "102"), Some(VitalStatus::Critical));
        assert_eq!(status(VitalField::Temperature, "94.9"), Some(VitalStatus::Critical));
    }

    #[test]
    fn spo2_warning_band_sits_just_above_critical() {
        assert_eq!(status(VitalField::Spo2, "89"), Some(VitalStatus::Critical));
        assert_eq!(status(VitalField::Spo2, "92"), Some(VitalStatus::Warning));
        assert_eq!(status(VitalField::Spo2, "94"), Some(VitalStatus::Normal));
        assert_eq!(status(VitalField::Spo2, "100"), Some(VitalStatus::Normal));
    }

    #[test]
    fn diastolic_has_no_low_critical() {
        assert_eq!(status(VitalField::BpDiastolic, "20"), Some(VitalStatus::Normal));
        assert_eq!(status(VitalField::BpDiastolic, "95"), Some(VitalStatus::Warning));
    }

    #[test]
    fn unbanded_or_blank_fields_have_no_status() {
        assert_eq!(status(VitalField::Weight, "70"), None);
        assert_eq!(status(VitalField::Weight, "1"), None);
        assert_eq!(status(VitalField::Height, "250"), None);
        assert_eq!(status(VitalField::GcsEye, "4"), None);
        assert_eq!(status(VitalField::Pulse, ""), None);
    }

    #[test]
    fn blood_pressure_worse_side_wins() {
        use VitalStatus::*;
        assert_eq!(blood_pressure_status(Some(Normal), Some(Critical)), Some(Critical));
        assert_eq!(blood_pressure_status(Some(Warning), Some(Normal)), Some(Warning));
        assert_eq!(blood_pressure_status(Some(Normal), Some(Normal)), Some(Normal));
        assert_eq!(blood_pressure_status(Some(Normal), None), None);
        assert_eq!(blood_pressure_status(None, Some(Warning)), Some(Warning));
    }

    #[test]
    fn bmi_categories() {
        assert_eq!(bmi_category("18.4"), Some(BmiCategory::Underweight));
        assert_eq!(bmi_category("22.9"), Some(BmiCategory::Normal));
        assert_eq!(bmi_category("25.0"), Some(BmiCategory::Overweight));
        assert_eq!(bmi_category("30.0"), Some(BmiCategory::Obese));
        assert_eq!(bmi_category(""), None);
    }

    #[test]
    fn oxygen_alert_below_ninety_two() {
        assert!(oxygen_required("91.9"));
        assert!(!oxygen_required("92"));
        assert!(!oxygen_required(""));
    }
}

//! Derived vitals: body mass index and mean arterial pressure.
//!
//! Both are pure functions of the raw text. A derived value is either consistent with its
//! inputs or empty.

use super::sanitise::parse_positive;

/// BMI from weight (kg) and height (cm), rounded to one decimal place.
///
/// Returns an empty string unless both inputs parse to positive numbers.
pub fn bmi(weight: &str, height: &str) -> String {
    let (Some(weight_kg), Some(height_cm)) = (parse_positive(weight), parse_positive(height))
    else {
        return String::new();
    };

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    format!("{:.1}", round_to(value, 1))
}

/// MAP from systolic and diastolic pressure (mmHg), rounded to the nearest integer.
///
/// Returns an empty string unless both parse to positive numbers and systolic exceeds
/// diastolic. Range validation plays no part here.
pub fn mean_arterial_pressure(systolic: &str, diastolic: &str) -> String {
    let (Some(sys), Some(dia)) = (parse_positive(systolic), parse_positive(diastolic)) else {
        return String::new();
    };
    if sys <= dia {
        return String::new();
    }

    let value = dia + (sys - dia) / 3.0;
    format!("{:.0}", value.round())
}

/// Rounds half away from zero at `places` decimals.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

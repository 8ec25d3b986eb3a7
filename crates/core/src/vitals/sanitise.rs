//! Input sanitisation for raw vitals text.
//!
//! Characters that cannot belong to a field's value are dropped silently; nothing here fails.

use super::field::FieldKind;

/// Keeps digits and the first decimal point; later points are dropped and the digits after them
/// are concatenated onto the fractional part (`"1.2.3"` becomes `"1.23"`).
pub fn sanitise_decimal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' if !seen_point => {
                seen_point = true;
                out.push(c);
            }
            _ => {}
        }
    }
    out
}

/// Keeps ASCII digits only.
pub fn sanitise_integer(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn sanitise(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Decimal => sanitise_decimal(raw),
        FieldKind::Integer => sanitise_integer(raw),
    }
}

/// Splits a combined `"SYS/DIA"` reading into its first two `/`-separated segments.
///
/// Returns `None` when there is no `/`. Anything after a second `/` is dropped. Both parts are
/// reduced to digits only, so a decimal point typed on either side is dropped.
pub fn split_blood_pressure(raw: &str) -> Option<(String, String)> {
    let mut parts = raw.split('/');
    let systolic = parts.next()?;
    let diastolic = parts.next()?;
    Some((sanitise_integer(systolic), sanitise_integer(diastolic)))
}

/// Parses sanitised text as a number. `None` for empty text or a lone `"."`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses sanitised text as a strictly positive number.
pub(crate) fn parse_positive(text: &str) -> Option<f64> {
    parse_number(text).filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_strips_letters_and_units() {
        assert_eq!(sanitise_decimal("98.6°F"), "98.6");
        assert_eq!(sanitise_decimal("  70 kg"), "70");
        assert_eq!(sanitise_decimal("-5"), "5");
    }

    #[test]
    fn decimal_collapses_extra_points_after_the_first() {
        assert_eq!(sanitise_decimal("1.2.3"), "1.23");
        assert_eq!(sanitise_decimal("..5"), ".5");
        assert_eq!(sanitise_decimal("36..6"), "36.6");
    }

    #[test]
    fn decimal_is_idempotent() {
        for raw in ["98.6", "1.2.3", "abc", "7.", ".5", ""] {
            let once = sanitise_decimal(raw);
            assert_eq!(sanitise_decimal(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn integer_keeps_digits_only() {
        assert_eq!(sanitise_integer("4.5"), "45");
        assert_eq!(sanitise_integer("E4"), "4");
        assert_eq!(sanitise_integer("١٢"), "");
    }

    #[test]
    fn blood_pressure_split_uses_first_slash() {
        assert_eq!(
            split_blood_pressure("120/80"),
            Some(("120".to_string(), "80".to_string()))
        );
        assert_eq!(
            split_blood_pressure("120 / 80 mmHg"),
            Some(("120".to_string(), "80".to_string()))
        );
        assert_eq!(
            split_blood_pressure("120/"),
            Some(("120".to_string(), String::new()))
        );
        assert_eq!(split_blood_pressure("120"), None);
    }

    #[test]
    fn blood_pressure_split_drops_text_after_second_slash() {
        assert_eq!(
            split_blood_pressure("120/80/70"),
            Some(("120".to_string(), "80".to_string()))
        );
        assert_eq!(
            split_blood_pressure("/80/"),
            Some((String::new(), "80".to_string()))
        );
    }

    #[test]
    fn parse_helpers_reject_blank_and_non_positive() {
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("7."), Some(7.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("0.1"), Some(0.1));
    }
}

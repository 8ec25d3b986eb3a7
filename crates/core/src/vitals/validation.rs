//! Range and cross-field validation of a vitals record.
//!
//! Validation never fails; it returns a [`ValidationReport`] describing every offending field.
//! Input that had to be sanitised is not reported at all.

use super::field::{FieldValues, VitalField};
use super::sanitise::parse_number;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is empty or holds no number.
    Required,
    /// A value is present but outside the accepted bounds.
    Range,
    /// The GCS sub-scores do not add up to a possible total.
    CrossField,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<VitalField, ValidationError>,
}

impl ValidationReport {
    fn from_errors(errors: BTreeMap<VitalField, ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error(&self, field: VitalField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }
}

/// Accepted bounds for one field. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeRule {
    pub field: VitalField,
    pub required: bool,
    pub min: f64,
    pub max: f64,
    pub integer: bool,
    pub message: &'static str,
}

const GCS_TOTAL_MIN: f64 = 3.0;
const GCS_TOTAL_MAX: f64 = 15.0;
const GCS_TOTAL_MESSAGE: &str = "Invalid total GCS score";
const REQUIRED_MESSAGE: &str = "Required";

/// Checked in this order; a later error for the same field replaces an earlier one.
pub const RANGE_RULES: [RangeRule; 12] = [
    RangeRule {
        field: VitalField::Temperature,
        required: true,
        min: 90.0,
        max: 108.0,
        integer: false,
        message: "90-108 °F only",
    },
    RangeRule {
        field: VitalField::Pulse,
        required: true,
        min: 30.0,
        max: 220.0,
        integer: false,
        message: "30-220 bpm only",
    },
    RangeRule {
        field: VitalField::RespiratoryRate,
        required: true,
        min: 6.0,
        max: 60.0,
        integer: false,
        message: "6-60 /min only",
    },
    RangeRule {
        field: VitalField::Spo2,
        required: true,
        min: 50.0,
        max: 100.0,
        integer: false,
        message: "50-100 % only",
    },
    RangeRule {
        field: VitalField::BpSystolic,
        required: true,
        min: 70.0,
        max: 260.0,
        integer: false,
        message: "70-260 mmHg only",
    },
    RangeRule {
        field: VitalField::BpDiastolic,
        required: true,
        min: 40.0,
        max: 150.0,
        integer: false,
        message: "40-150 mmHg only",
    },
    RangeRule {
        field: VitalField::Weight,
        required: false,
        min: 1.0,
        max: 350.0,
        integer: false,
        message: "1-350 kg only",
    },
    RangeRule {
        field: VitalField::Height,
        required: false,
        min: 30.0,
        max: 250.0,
        integer: false,
        message: "30-250 cm only",
    },
    RangeRule {
        field: VitalField::PainScore,
        required: false,
        min: 0.0,
        max: 10.0,
        integer: true,
        message: "0-10 integer only",
    },
    RangeRule {
        field: VitalField::GcsEye,
        required: false,
        min: 1.0,
        max: 4.0,
        integer: true,
        message: "1-4",
    },
    RangeRule {
        field: VitalField::GcsVerbal,
        required: false,
        min: 1.0,
        max: 5.0,
        integer: true,
        message: "1-5",
    },
    RangeRule {
        field: VitalField::GcsMotor,
        required: false,
        min: 1.0,
        max: 6.0,
        integer: true,
        message: "1-6",
    },
];

impl RangeRule {
    fn check(&self, text: &str) -> Option<ValidationError> {
        let value = parse_number(text);
        if self.required && value.is_none() {
            return Some(ValidationError::new(ErrorKind::Required, REQUIRED_MESSAGE));
        }

        // Unparseable optional text (a lone ".") is treated as not yet entered.
        let value = value?;
        let out_of_range = value < self.min || value > self.max;
        let not_integer = self.integer && value.fract() != 0.0;
        (out_of_range || not_integer).then(|| ValidationError::new(ErrorKind::Range, self.message))
    }
}

/// Validates every field of `values`.
///
/// When all three GCS sub-scores are present and their total falls outside 3-15, all three
/// carry the cross-field error, replacing any range error already attached to them.
pub fn validate(values: &FieldValues) -> ValidationReport {
    let mut errors = BTreeMap::new();

    for rule in &RANGE_RULES {
        if let Some(err) = rule.check(values.get(rule.field)) {
            errors.insert(rule.field, err);
        }
    }

    if VitalField::GCS.iter().all(|f| values.is_present(*f)) {
        let total: f64 = VitalField::GCS
            .iter()
            .filter_map(|f| parse_number(values.get(*f)))
            .sum();
        if !(GCS_TOTAL_MIN..=GCS_TOTAL_MAX).contains(&total) {
            for field in VitalField::GCS {
                errors.insert(
                    field,
                    ValidationError::new(ErrorKind::CrossField, GCS_TOTAL_MESSAGE),
                );
            }
        }
    }

    ValidationReport::from_errors(errors)
}

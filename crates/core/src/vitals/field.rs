//! The raw and derived fields of a vitals record.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How raw input for a field is sanitised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits and at most one decimal point.
    Decimal,
    /// Digits only.
    Integer,
}

/// A raw, clinician-editable vitals field.
///
/// Variant order is the canonical order used when applying a batch of inputs and when
/// reporting validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VitalField {
    #[serde(rename = "weight")]
    Weight,
    #[serde(rename = "height")]
    Height,
    #[serde(rename = "pulse")]
    Pulse,
    #[serde(rename = "bpSystolic")]
    BpSystolic,
    #[serde(rename = "bpDiastolic")]
    BpDiastolic,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "spo2")]
    Spo2,
    #[serde(rename = "respiratoryRate")]
    RespiratoryRate,
    #[serde(rename = "painScore")]
    PainScore,
    #[serde(rename = "gcsE")]
    GcsEye,
    #[serde(rename = "gcsV")]
    GcsVerbal,
    #[serde(rename = "gcsM")]
    GcsMotor,
}

impl VitalField {
    pub const ALL: [VitalField; 12] = [
        VitalField::Weight,
        VitalField::Height,
        VitalField::Pulse,
        VitalField::BpSystolic,
        VitalField::BpDiastolic,
        VitalField::Temperature,
        VitalField::Spo2,
        VitalField::RespiratoryRate,
        VitalField::PainScore,
        VitalField::GcsEye,
        VitalField::GcsVerbal,
        VitalField::GcsMotor,
    ];

    pub const GCS: [VitalField; 3] = [VitalField::GcsEye, VitalField::GcsVerbal, VitalField::GcsMotor];

    /// Stored/wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalField::Weight => "weight",
            VitalField::Height => "height",
            VitalField::Pulse => "pulse",
            VitalField::BpSystolic => "bpSystolic",
            VitalField::BpDiastolic => "bpDiastolic",
            VitalField::Temperature => "temperature",
            VitalField::Spo2 => "spo2",
            VitalField::RespiratoryRate => "respiratoryRate",
            VitalField::PainScore => "painScore",
            VitalField::GcsEye => "gcsE",
            VitalField::GcsVerbal => "gcsV",
            VitalField::GcsMotor => "gcsM",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            VitalField::PainScore
            | VitalField::GcsEye
            | VitalField::GcsVerbal
            | VitalField::GcsMotor => FieldKind::Integer,
            _ => FieldKind::Decimal,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VitalField::Weight => "kg",
            VitalField::Height => "cm",
            VitalField::Pulse => "bpm",
            VitalField::BpSystolic | VitalField::BpDiastolic => "mmHg",
            VitalField::Temperature => "°F",
            VitalField::Spo2 => "%",
            VitalField::RespiratoryRate => "breaths/min",
            VitalField::PainScore => "/10",
            VitalField::GcsEye | VitalField::GcsVerbal | VitalField::GcsMotor => "",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for VitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalField {
    type Err = CoreError;

    /// Accepts the stored names plus the long GCS spellings (`gcsEye`, `gcsVerbal`, `gcsMotor`).
    fn from_str(s: &str) -> CoreResult<Self> {
        let field = match s {
            "gcsEye" => VitalField::GcsEye,
            "gcsVerbal" => VitalField::GcsVerbal,
            "gcsMotor" => VitalField::GcsMotor,
            other => VitalField::ALL
                .into_iter()
                .find(|f| f.as_str() == other)
                .ok_or_else(|| CoreError::UnknownField(s.to_string()))?,
        };
        Ok(field)
    }
}

/// Text of every raw field, indexed by [`VitalField`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValues([String; 12]);

impl FieldValues {
    pub fn get(&self, field: VitalField) -> &str {
        &self.0[field.index()]
    }

    pub(crate) fn set(&mut self, field: VitalField, value: String) {
        self.0[field.index()] = value;
    }

    /// `true` when the field holds any text at all.
    pub fn is_present(&self, field: VitalField) -> bool {
        !self.get(field).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VitalField, &str)> + '_ {
        VitalField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

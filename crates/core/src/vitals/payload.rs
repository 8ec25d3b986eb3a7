//! The submission shape handed to the record store.

use super::field::VitalField;
use super::record::{CustomVital, RiskFlags, VitalsRecord};
use crate::config::CoreConfig;
use crate::constants::RECORD_STATUS_COMPLETED;
use crate::ids::PatientId;
use crate::operator::Operator;
use chrono::{DateTime, Utc};
use hms_types::{NonEmptyText, Uhid};
use serde::{Deserialize, Serialize};

/// The patient a vitals record is taken for, as supplied by registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    pub id: PatientId,
    pub uhid: Uhid,
    pub full_name: NonEmptyText,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

/// A completed vitals record as persisted.
///
/// Mirrors [`VitalsRecord`] field for field; every raw and derived value stays as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsPayload {
    pub patient_id: PatientId,
    pub patient_uhid: Uhid,
    pub patient_name: String,
    pub weight: String,
    pub height: String,
    pub bmi: String,
    pub pulse: String,
    pub bp_systolic: String,
    pub bp_diastolic: String,
    pub temperature: String,
    pub spo2: String,
    pub respiratory_rate: String,
    pub pain_score: String,
    #[serde(rename = "gcsE")]
    pub gcs_e: String,
    #[serde(rename = "gcsV")]
    pub gcs_v: String,
    #[serde(rename = "gcsM")]
    pub gcs_m: String,
    pub map: String,
    pub risk_flags: RiskFlags,
    pub custom_vitals: Vec<CustomVital>,
    pub recorded_at: DateTime<Utc>,
    pub recorded_by: String,
    pub status: String,
}

impl VitalsRecord {
    /// Assembles the stored shape. Does not validate; callers check
    /// [`super::VitalsEngine::validate`] first.
    pub fn to_submission_payload(
        &self,
        patient: &PatientContext,
        recorded_by: &str,
        recorded_at: DateTime<Utc>,
    ) -> VitalsPayload {
        let v = |field: VitalField| self.value(field).to_string();

        VitalsPayload {
            patient_id: patient.id,
            patient_uhid: patient.uhid.clone(),
            patient_name: patient.full_name.to_string(),
            weight: v(VitalField::Weight),
            height: v(VitalField::Height),
            bmi: self.bmi.clone(),
            pulse: v(VitalField::Pulse),
            bp_systolic: v(VitalField::BpSystolic),
            bp_diastolic: v(VitalField::BpDiastolic),
            temperature: v(VitalField::Temperature),
            spo2: v(VitalField::Spo2),
            respiratory_rate: v(VitalField::RespiratoryRate),
            pain_score: v(VitalField::PainScore),
            gcs_e: v(VitalField::GcsEye),
            gcs_v: v(VitalField::GcsVerbal),
            gcs_m: v(VitalField::GcsMotor),
            map: self.map.clone(),
            risk_flags: self.risk_flags,
            custom_vitals: self.custom_vitals.clone(),
            recorded_at,
            recorded_by: recorded_by.to_string(),
            status: RECORD_STATUS_COMPLETED.to_string(),
        }
    }
}

/// The `recordedBy` stamp: the operator's name, or the configured label when there is none.
pub fn recorded_by<'a>(operator: Option<&'a Operator>, config: &'a CoreConfig) -> &'a str {
    operator
        .map(|op| op.name.as_str())
        .unwrap_or_else(|| config.default_recorded_by())
}

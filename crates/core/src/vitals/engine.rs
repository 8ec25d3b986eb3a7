use super::category::{self, BmiCategory, VitalStatus};
use super::derive;
use super::field::VitalField;
use super::payload::{PatientContext, VitalsPayload};
use super::record::{CustomVital, CustomVitalField, RiskFlag, RiskFlags, VitalsRecord};
use super::sanitise::{sanitise, split_blood_pressure};
use super::summary;
use super::validation::{self, ValidationError, ValidationReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// What the input surface should do with focus after a field edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusHint {
    Stay,
    MoveTo(VitalField),
}

/// Owns one [`VitalsRecord`], keeps its derived fields current and validates it on request.
///
/// There is exactly one writer (the current clinician session), so the engine is a plain
/// mutable struct. Nothing here blocks or performs I/O.
#[derive(Clone, Debug, Default)]
pub struct VitalsEngine {
    record: VitalsRecord,
    errors: BTreeMap<VitalField, ValidationError>,
}

impl VitalsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything and starts an empty record for the next patient.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> &VitalsRecord {
        &self.record
    }

    pub fn value(&self, field: VitalField) -> &str {
        self.record.value(field)
    }

    /// Errors from the last [`validate`](Self::validate), minus fields edited since.
    pub fn errors(&self) -> &BTreeMap<VitalField, ValidationError> {
        &self.errors
    }

    /// Stores sanitised `raw` in `field` and recomputes the derived fields.
    ///
    /// Typing `"120/80"` into the systolic field fills both blood-pressure fields and asks for
    /// focus to move to diastolic. Any earlier validation error on a written field is cleared.
    pub fn set_field(&mut self, field: VitalField, raw: &str) -> FocusHint {
        let hint = match (field, split_blood_pressure(raw)) {
            (VitalField::BpSystolic, Some((systolic, diastolic))) => {
                self.write(VitalField::BpSystolic, systolic);
                self.write(VitalField::BpDiastolic, diastolic);
                FocusHint::MoveTo(VitalField::BpDiastolic)
            }
            _ => {
                self.write(field, sanitise(field.kind(), raw));
                FocusHint::Stay
            }
        };

        self.recompute_derived();
        hint
    }

    fn write(&mut self, field: VitalField, value: String) {
        tracing::debug!(%field, %value, "vitals field updated");
        self.record.values.set(field, value);
        self.errors.remove(&field);
    }

    fn recompute_derived(&mut self) {
        let values = &self.record.values;
        let bmi = derive::bmi(values.get(VitalField::Weight), values.get(VitalField::Height));
        let map = derive::mean_arterial_pressure(
            values.get(VitalField::BpSystolic),
            values.get(VitalField::BpDiastolic),
        );

        if bmi != self.record.bmi {
            tracing::debug!(%bmi, "bmi recomputed");
            self.record.bmi = bmi;
        }
        if map != self.record.map {
            tracing::debug!(%map, "map recomputed");
            self.record.map = map;
        }
    }

    pub fn toggle_risk_flag(&mut self, flag: RiskFlag) {
        self.record.risk_flags.toggle(flag);
    }

    /// Appends an empty custom vital and returns its id.
    pub fn add_custom_vital(&mut self) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.record.custom_vitals.push(CustomVital {
            id: id.clone(),
            name: String::new(),
            value: String::new(),
            unit: String::new(),
        });
        id
    }

    /// Removes the custom vital with `id`, keeping the order of the rest. Returns whether one was
    /// removed.
    pub fn remove_custom_vital(&mut self, id: &str) -> bool {
        let before = self.record.custom_vitals.len();
        self.record.custom_vitals.retain(|v| v.id != id);
        self.record.custom_vitals.len() != before
    }

    /// Sets one part of a custom vital. Unknown ids are ignored.
    pub fn update_custom_vital(&mut self, id: &str, field: CustomVitalField, value: &str) {
        let Some(vital) = self.record.custom_vitals.iter_mut().find(|v| v.id == id) else {
            tracing::debug!(id, "update for unknown custom vital ignored");
            return;
        };
        let slot = match field {
            CustomVitalField::Name => &mut vital.name,
            CustomVitalField::Value => &mut vital.value,
            CustomVitalField::Unit => &mut vital.unit,
        };
        *slot = value.to_string();
    }

    /// Validates the current record and keeps the errors for display.
    pub fn validate(&mut self) -> ValidationReport {
        let report = validation::validate(&self.record.values);
        self.errors = report.errors.clone();
        report
    }

    /// A read-only snapshot of the record plus everything derived from it.
    pub fn view(&self) -> VitalsView {
        let values = &self.record.values;
        let statuses: BTreeMap<VitalField, VitalStatus> = VitalField::ALL
            .into_iter()
            .filter_map(|f| category::status(f, values.get(f)).map(|s| (f, s)))
            .collect();
        let blood_pressure = category::blood_pressure_status(
            statuses.get(&VitalField::BpSystolic).copied(),
            statuses.get(&VitalField::BpDiastolic).copied(),
        );

        VitalsView {
            fields: values.iter().map(|(f, v)| (f, v.to_string())).collect(),
            bmi: self.record.bmi.clone(),
            map: self.record.map.clone(),
            bmi_category: category::bmi_category(&self.record.bmi),
            statuses,
            blood_pressure_status: blood_pressure,
            oxygen_required: category::oxygen_required(values.get(VitalField::Spo2)),
            risk_flags: self.record.risk_flags,
            custom_vitals: self.record.custom_vitals.clone(),
            errors: self.errors.clone(),
        }
    }

    /// See [`VitalsRecord::to_submission_payload`]. Call [`validate`](Self::validate) first.
    pub fn to_submission_payload(
        &self,
        patient: &PatientContext,
        recorded_by: &str,
        recorded_at: DateTime<Utc>,
    ) -> VitalsPayload {
        self.record
            .to_submission_payload(patient, recorded_by, recorded_at)
    }

    pub fn render_summary(&self, patient: &PatientContext) -> String {
        summary::render_summary(&self.record, patient)
    }
}

/// Display/submission snapshot produced by [`VitalsEngine::view`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsView {
    pub fields: BTreeMap<VitalField, String>,
    pub bmi: String,
    pub map: String,
    pub bmi_category: Option<BmiCategory>,
    pub statuses: BTreeMap<VitalField, VitalStatus>,
    pub blood_pressure_status: Option<VitalStatus>,
    pub oxygen_required: bool,
    pub risk_flags: RiskFlags,
    pub custom_vitals: Vec<CustomVital>,
    pub errors: BTreeMap<VitalField, ValidationError>,
}

//! Request and response bodies of the REST API.
//!
//! Engine types are carried through as-is (documented as plain objects); requests are mapped
//! into core types at the handler boundary.

use hms_core::vitals::{
    CustomVitalInput, PatientContext, RiskFlags, ValidationReport, VitalsInput, VitalsPayload,
    VitalsView,
};
use hms_core::{CoreResult, PatientId, StoredVitals};
use hms_types::{NonEmptyText, Uhid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlagsReq {
    #[serde(default)]
    pub diabetes: bool,
    #[serde(default)]
    pub heart_disease: bool,
    #[serde(default)]
    pub kidney: bool,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CustomVitalReq {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

/// Raw vitals keyed by field name (`weight`, `bpSystolic`, `gcsE`, ...).
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalsInputReq {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub risk_flags: RiskFlagsReq,
    #[serde(default)]
    pub custom_vitals: Vec<CustomVitalReq>,
}

impl From<VitalsInputReq> for VitalsInput {
    fn from(req: VitalsInputReq) -> Self {
        VitalsInput {
            fields: req.fields,
            risk_flags: RiskFlags {
                diabetes: req.risk_flags.diabetes,
                heart_disease: req.risk_flags.heart_disease,
                kidney: req.risk_flags.kidney,
            },
            custom_vitals: req
                .custom_vitals
                .into_iter()
                .map(|c| CustomVitalInput {
                    name: c.name,
                    value: c.value,
                    unit: c.unit,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientReq {
    pub uhid: String,
    pub full_name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

impl PatientReq {
    pub fn into_context(self, id: PatientId) -> CoreResult<PatientContext> {
        Ok(PatientContext {
            id,
            uhid: Uhid::parse(&self.uhid)?,
            full_name: NonEmptyText::new(&self.full_name)?,
            age: self.age,
            gender: self.gender,
            chronic_conditions: self.chronic_conditions,
        })
    }
}

/// Patient details plus the vitals taken for them.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct PatientVitalsReq {
    pub patient: PatientReq,
    pub vitals: VitalsInputReq,
}

#[derive(Serialize, ToSchema)]
pub struct AssessRes {
    #[schema(value_type = Object)]
    pub view: VitalsView,
    #[schema(value_type = Object)]
    pub report: ValidationReport,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordVitalsRes {
    pub record_id: String,
    #[schema(value_type = Object)]
    pub payload: VitalsPayload,
}

#[derive(Serialize, ToSchema)]
pub struct ListVitalsRes {
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<StoredVitals>,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryRes {
    pub prompt: String,
    pub summary: String,
}

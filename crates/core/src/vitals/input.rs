//! A batch of vitals input, as received over the API or on the command line.

use super::engine::VitalsEngine;
use super::field::VitalField;
use super::record::{CustomVitalField, RiskFlag, RiskFlags};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVitalInput {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
}

/// Field text keyed by field name, plus risk flags and custom vitals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsInput {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub risk_flags: RiskFlags,
    #[serde(default)]
    pub custom_vitals: Vec<CustomVitalInput>,
}

impl VitalsInput {
    /// Applies the input to `engine` through [`VitalsEngine::set_field`].
    ///
    /// Fields are applied in canonical [`VitalField`] order, so an explicit `bpDiastolic` wins
    /// over one split out of `bpSystolic`. Every name is checked before anything is written;
    /// two names for the same field (`gcsE` and `gcsEye`) fail with
    /// [`CoreError::InvalidInput`].
    pub fn apply(&self, engine: &mut VitalsEngine) -> CoreResult<()> {
        let mut fields = BTreeMap::new();
        for (name, raw) in &self.fields {
            let field: VitalField = name.parse()?;
            if fields.insert(field, raw.as_str()).is_some() {
                return Err(CoreError::InvalidInput(format!(
                    "vitals field '{field}' given more than once"
                )));
            }
        }

        for (field, raw) in fields {
            engine.set_field(field, raw);
        }

        let current = engine.record().risk_flags();
        for flag in RiskFlag::ALL {
            if current.get(flag) != self.risk_flags.get(flag) {
                engine.toggle_risk_flag(flag);
            }
        }

        for custom in &self.custom_vitals {
            let id = engine.add_custom_vital();
            engine.update_custom_vital(&id, CustomVitalField::Name, &custom.name);
            engine.update_custom_vital(&id, CustomVitalField::Value, &custom.value);
            engine.update_custom_vital(&id, CustomVitalField::Unit, &custom.unit);
        }

        Ok(())
    }

    /// A fresh engine holding this input.
    pub fn to_engine(&self) -> CoreResult<VitalsEngine> {
        let mut engine = VitalsEngine::new();
        self.apply(&mut engine)?;
        Ok(engine)
    }

    /// Parses `name=value` pairs as given on the command line.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> CoreResult<Self> {
        let mut input = Self::default();
        for pair in pairs {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                CoreError::InvalidInput(format!("expected name=value, got '{pair}'"))
            })?;
            input
                .fields
                .insert(name.trim().to_string(), value.to_string());
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pairs: &[(&str, &str)]) -> VitalsInput {
        VitalsInput {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..VitalsInput::default()
        }
    }

    #[test]
    fn explicit_diastolic_overrides_split() {
        let engine = input(&[("bpSystolic", "120/80"), ("bpDiastolic", "85")])
            .to_engine()
            .unwrap();
        assert_eq!(engine.value(VitalField::BpSystolic), "120");
        assert_eq!(engine.value(VitalField::BpDiastolic), "85");
        assert_eq!(engine.record().map(), "97");
    }

    #[test]
    fn unknown_field_fails_before_any_write() {
        let mut engine = VitalsEngine::new();
        let err = input(&[("pulse", "72"), ("bmi", "22")])
            .apply(&mut engine)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(name) if name == "bmi"));
        assert_eq!(engine.value(VitalField::Pulse), "");
    }

    #[test]
    fn two_names_for_one_field_are_rejected() {
        let mut engine = VitalsEngine::new();
        let err = input(&[("pulse", "72"), ("gcsE", "4"), ("gcsEye", "3")])
            .apply(&mut engine)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("gcsE")));
        assert_eq!(engine.value(VitalField::Pulse), "");
        assert_eq!(engine.value(VitalField::GcsEye), "");
    }

    #[test]
    fn long_gcs_names_are_accepted() {
        let engine = input(&[("gcsEye", "3"), ("gcsM", "5")]).to_engine().unwrap();
        assert_eq!(engine.value(VitalField::GcsEye), "3");
        assert_eq!(engine.value(VitalField::GcsMotor), "5");
    }

    #[test]
    fn risk_flags_and_custom_vitals_are_carried() {
        let mut vitals = input(&[]);
        vitals.risk_flags.kidney = true;
        vitals.custom_vitals.push(CustomVitalInput {
            name: "Peak flow".into(),
            value: "380".into(),
            unit: "L/min".into(),
        });

        let engine = vitals.to_engine().unwrap();
        assert!(engine.record().risk_flags().kidney);
        assert!(!engine.record().risk_flags().diabetes);
        let custom = &engine.record().custom_vitals()[0];
        assert_eq!(custom.name, "Peak flow");
        assert_eq!(custom.unit, "L/min");
    }

    #[test]
    fn deserializes_camel_case_body() {
        let body = r#"{
            "fields": {"weight": "70", "height": "175"},
            "riskFlags": {"diabetes": true, "heartDisease": false, "kidney": false},
            "customVitals": [{"name": "Glucose", "value": "110"}]
        }"#;
        let vitals: VitalsInput = serde_json::from_str(body).unwrap();
        let engine = vitals.to_engine().unwrap();
        assert_eq!(engine.record().bmi(), "22.9");
        assert!(engine.record().risk_flags().diabetes);
        assert_eq!(engine.record().custom_vitals()[0].unit, "");
    }

    #[test]
    fn from_pairs_splits_on_first_equals() {
        let vitals = VitalsInput::from_pairs(["pulse=72", "temperature = 98.6"]).unwrap();
        assert_eq!(vitals.fields["pulse"], "72");
        assert_eq!(vitals.fields["temperature"], " 98.6");
        assert!(matches!(
            VitalsInput::from_pairs(["pulse"]),
            Err(CoreError::InvalidInput(_))
        ));
    }
}

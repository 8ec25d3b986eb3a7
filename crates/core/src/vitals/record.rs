//! The vitals record owned by one encounter.

use super::field::{FieldValues, VitalField};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Independent yes/no risk factors noted alongside the vitals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskFlag {
    Diabetes,
    HeartDisease,
    Kidney,
}

impl RiskFlag {
    pub const ALL: [RiskFlag; 3] = [RiskFlag::Diabetes, RiskFlag::HeartDisease, RiskFlag::Kidney];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::Diabetes => "diabetes",
            RiskFlag::HeartDisease => "heartDisease",
            RiskFlag::Kidney => "kidney",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFlag {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        RiskFlag::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRiskFlag(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFlags {
    pub diabetes: bool,
    pub heart_disease: bool,
    pub kidney: bool,
}

impl RiskFlags {
    pub fn get(&self, flag: RiskFlag) -> bool {
        match flag {
            RiskFlag::Diabetes => self.diabetes,
            RiskFlag::HeartDisease => self.heart_disease,
            RiskFlag::Kidney => self.kidney,
        }
    }

    pub(crate) fn toggle(&mut self, flag: RiskFlag) {
        let slot = match flag {
            RiskFlag::Diabetes => &mut self.diabetes,
            RiskFlag::HeartDisease => &mut self.heart_disease,
            RiskFlag::Kidney => &mut self.kidney,
        };
        *slot = !*slot;
    }
}

/// A clinician-defined extra measurement. Free text; never validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVital {
    pub id: String,
    pub name: String,
    pub value: String,
    pub unit: String,
}

/// Editable part of a [`CustomVital`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomVitalField {
    Name,
    Value,
    Unit,
}

/// Raw fields, derived fields, risk flags and custom vitals for one patient encounter.
///
/// Only [`super::VitalsEngine`] mutates a record, which keeps `bmi` and `map` in step with
/// their inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VitalsRecord {
    pub(crate) values: FieldValues,
    pub(crate) bmi: String,
    pub(crate) map: String,
    pub(crate) risk_flags: RiskFlags,
    pub(crate) custom_vitals: Vec<CustomVital>,
}

impl VitalsRecord {
    pub fn value(&self, field: VitalField) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn bmi(&self) -> &str {
        &self.bmi
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn risk_flags(&self) -> RiskFlags {
        self.risk_flags
    }

    pub fn custom_vitals(&self) -> &[CustomVital] {
        &self.custom_vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_only_the_named_flag() {
        let mut flags = RiskFlags::default();
        flags.toggle(RiskFlag::HeartDisease);
        assert!(flags.heart_disease);
        assert!(!flags.diabetes && !flags.kidney);
        flags.toggle(RiskFlag::HeartDisease);
        assert_eq!(flags, RiskFlags::default());
    }

    #[test]
    fn risk_flag_names_round_trip() {
        for flag in RiskFlag::ALL {
            assert_eq!(flag.as_str().parse::<RiskFlag>().unwrap(), flag);
        }
        assert!(matches!(
            "asthma".parse::<RiskFlag>(),
            Err(CoreError::UnknownRiskFlag(_))
        ));
    }

    #[test]
    fn risk_flags_serialize_camel_case() {
        let flags = RiskFlags {
            heart_disease: true,
            ..RiskFlags::default()
        };
        let json = serde_json::to_value(flags).unwrap();
        assert_eq!(json["heartDisease"], true);
        assert_eq!(json["kidney"], false);
    }
}

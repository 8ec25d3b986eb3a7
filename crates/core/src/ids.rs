//! Identifiers for patients and stored vitals records.
//!
//! Patient identifiers use the canonical UUID form: **32 lowercase hexadecimal characters**, no
//! hyphens (`Uuid::new_v4().simple()`). Records for a patient live under a sharded directory:
//! `parent_dir/<id[0..2]>/<id[2..4]>/<id>/`.
//!
//! Record identifiers are `<yyyymmddThhmmss.fffZ>-<canonical uuid>`, which sort lexically in
//! the order they were recorded.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};
use uuid::Uuid;

const RECORD_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

fn is_canonical_uuid(input: &str) -> bool {
    input.len() == 32 && input.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// A patient identifier in canonical UUID form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatientId(Uuid);

impl PatientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates an externally supplied identifier.
    ///
    /// Hyphenated or uppercase forms are rejected rather than normalised, so the same patient can
    /// never map to two directories.
    pub fn parse(input: &str) -> CoreResult<Self> {
        if !is_canonical_uuid(input) {
            return Err(CoreError::InvalidInput(format!(
                "patient id must be 32 lowercase hex characters without hyphens, got: '{input}'"
            )));
        }
        let uuid = Uuid::parse_str(input)
            .map_err(|e| CoreError::InvalidInput(format!("invalid patient id '{input}': {e}")))?;
        Ok(Self(uuid))
    }

    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        parent_dir
            .join(&canonical[0..2])
            .join(&canonical[2..4])
            .join(&canonical)
    }
}

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for PatientId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of one stored vitals record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    timestamp: DateTime<Utc>,
    uuid: Uuid,
}

impl RecordId {
    /// Creates an identifier stamped with `recorded_at` (truncated to milliseconds).
    pub fn generate(recorded_at: DateTime<Utc>) -> Self {
        let millis = recorded_at.timestamp_millis();
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(recorded_at);
        Self {
            timestamp,
            uuid: Uuid::new_v4(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Z-{}",
            self.timestamp.format(RECORD_TIMESTAMP_FORMAT),
            self.uuid.simple()
        )
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ts_str, uuid_str) = s
            .split_once('-')
            .ok_or_else(|| CoreError::InvalidInput(format!("invalid record id: '{s}'")))?;

        let ts_no_z = ts_str.strip_suffix('Z').ok_or_else(|| {
            CoreError::InvalidInput(format!("record timestamp must end with 'Z': '{ts_str}'"))
        })?;
        let naive = NaiveDateTime::parse_from_str(ts_no_z, RECORD_TIMESTAMP_FORMAT).map_err(|e| {
            CoreError::InvalidInput(format!("invalid record timestamp '{ts_str}': {e}"))
        })?;

        if !is_canonical_uuid(uuid_str) {
            return Err(CoreError::InvalidInput(format!(
                "record id must end in a canonical UUID, got: '{uuid_str}'"
            )));
        }
        let uuid = Uuid::parse_str(uuid_str)
            .map_err(|e| CoreError::InvalidInput(format!("invalid record id '{s}': {e}")))?;

        Ok(Self {
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc),
            uuid,
        })
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn patient_id_parse_accepts_canonical_form() {
        let id = PatientId::parse("550e8400e29b41d4a716446655440000").expect("canonical id");
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn patient_id_parse_rejects_hyphenated_and_uppercase() {
        for input in [
            "550e8400-e29b-41d4-a716-446655440000",
            "550E8400E29B41D4A716446655440000",
            "550e8400",
        ] {
            let err = PatientId::parse(input).expect_err("should reject");
            assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("32 lowercase")));
        }
    }

    #[test]
    fn patient_id_sharded_dir_uses_two_prefix_levels() {
        let id = PatientId::parse("550e8400e29b41d4a716446655440000").unwrap();
        let dir = id.sharded_dir(Path::new("/data/vitals"));
        assert_eq!(
            dir,
            PathBuf::from("/data/vitals/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn record_id_display_parses_back() {
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 5).unwrap();
        let id = RecordId::generate(at);
        let text = id.to_string();
        assert!(text.starts_with("20261014T093005.000Z-"));

        let parsed: RecordId = text.parse().expect("parse record id");
        assert_eq!(parsed, id);
        assert_eq!(parsed.timestamp(), at);
    }

    #[test]
    fn record_ids_sort_chronologically() {
        let earlier = RecordId::generate(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());
        let later = RecordId::generate(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 6).unwrap());
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn record_id_rejects_missing_zulu_suffix() {
        let err = "20261014T093005.000-550e8400e29b41d4a716446655440000"
            .parse::<RecordId>()
            .expect_err("should reject");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("end with 'Z'")));
    }
}

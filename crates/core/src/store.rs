//! Persistence of completed vitals records.
//!
//! Records are JSON documents stored per patient under the sharded layout:
//! `<data_dir>/vitals/<s1>/<s2>/<patient_id>/<record_id>.json`, where s1/s2 are the first four
//! hex characters of the patient id. Record ids begin with their UTC timestamp, so sorting file
//! names gives recording order.

use crate::config::CoreConfig;
use crate::constants::RECORD_EXTENSION;
use crate::ids::{PatientId, RecordId};
use crate::vitals::VitalsPayload;
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A saved record together with its identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVitals {
    pub record_id: RecordId,
    pub payload: VitalsPayload,
}

/// Storage collaborator for submitted vitals.
#[async_trait]
pub trait VitalsStore: Send + Sync {
    /// Persists `payload` and returns the id it was stored under.
    async fn save(&self, payload: &VitalsPayload) -> CoreResult<RecordId>;

    /// All records for `patient_id`, oldest first. Empty when none were ever saved.
    async fn list(&self, patient_id: &PatientId) -> CoreResult<Vec<StoredVitals>>;
}

/// [`VitalsStore`] backed by JSON files under the configured data directory.
#[derive(Clone, Debug)]
pub struct FileVitalsStore {
    vitals_dir: PathBuf,
}

impl FileVitalsStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            vitals_dir: config.vitals_dir(),
        }
    }

    fn patient_dir(&self, patient_id: &PatientId) -> PathBuf {
        patient_id.sharded_dir(&self.vitals_dir)
    }
}

#[async_trait]
impl VitalsStore for FileVitalsStore {
    async fn save(&self, payload: &VitalsPayload) -> CoreResult<RecordId> {
        let record_id = RecordId::generate(payload.recorded_at);
        let dir = self.patient_dir(&payload.patient_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(CoreError::RecordDirCreation)?;

        let json = serde_json::to_string_pretty(payload).map_err(CoreError::Serialization)?;
        let path = dir.join(format!("{record_id}.{RECORD_EXTENSION}"));
        tokio::fs::write(&path, json)
            .await
            .map_err(CoreError::FileWrite)?;

        tracing::info!(
            patient_id = %payload.patient_id,
            %record_id,
            recorded_by = %payload.recorded_by,
            "vitals record saved"
        );
        Ok(record_id)
    }

    async fn list(&self, patient_id: &PatientId) -> CoreResult<Vec<StoredVitals>> {
        let dir = self.patient_dir(patient_id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CoreError::FileRead(e)),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(CoreError::FileRead)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let Some(record_id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<RecordId>().ok())
            else {
                tracing::warn!("skipping file with invalid record id: {}", path.display());
                continue;
            };

            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(CoreError::FileRead)?;
            match serde_json::from_str::<VitalsPayload>(&contents) {
                Ok(payload) => records.push(StoredVitals { record_id, payload }),
                Err(e) => {
                    tracing::warn!("failed to parse vitals record {}: {e}", path.display());
                }
            }
        }

        records.sort_by_key(|r| r.record_id.to_string());
        Ok(records)
    }
}

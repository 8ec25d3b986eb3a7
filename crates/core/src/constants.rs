//! Constants used throughout the HMS core crate.

/// Default directory for stored records when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "hms_data";

/// Directory name (under the data directory) for vitals records.
pub const VITALS_DIR_NAME: &str = "vitals";

/// Extension of a stored vitals record.
pub const RECORD_EXTENSION: &str = "json";

/// `recordedBy` label used when no operator identity is available.
pub const DEFAULT_RECORDED_BY: &str = "Medical Staff";

/// Status stamped on every submitted vitals record.
pub const RECORD_STATUS_COMPLETED: &str = "completed";

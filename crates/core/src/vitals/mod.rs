//! The vitals derivation and validation engine.
//!
//! [`VitalsEngine`] owns one encounter's [`VitalsRecord`]. Raw text goes in through
//! [`VitalsEngine::set_field`], is sanitised, and the derived BMI and MAP are recomputed on every
//! write. [`VitalsEngine::validate`] reports per-field problems without ever failing.

mod category;
mod derive;
mod engine;
mod field;
mod input;
mod payload;
mod record;
mod sanitise;
mod summary;
mod validation;

pub use category::{
    bands_for, blood_pressure_status, bmi_category, oxygen_required, status, Bands, BmiCategory,
    VitalStatus, OXYGEN_ALERT_BELOW,
};
pub use derive::{bmi, mean_arterial_pressure};
pub use engine::{FocusHint, VitalsEngine, VitalsView};
pub use field::{FieldKind, FieldValues, VitalField};
pub use input::{CustomVitalInput, VitalsInput};
pub use payload::{recorded_by, PatientContext, VitalsPayload};
pub use record::{CustomVital, CustomVitalField, RiskFlag, RiskFlags, VitalsRecord};
pub use sanitise::{sanitise, sanitise_decimal, sanitise_integer, split_blood_pressure};
pub use summary::render_summary;
pub use validation::{
    validate, ErrorKind, RangeRule, ValidationError, ValidationReport, RANGE_RULES,
};

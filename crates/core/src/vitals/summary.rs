//! Plain-text rendering of a vitals record for the AI-suggestion collaborator.

use super::field::VitalField;
use super::payload::PatientContext;
use super::record::VitalsRecord;

const NOT_AVAILABLE: &str = "N/A";

fn or_na(text: &str) -> &str {
    if text.is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

/// Renders the patient details and every vital (blanks as `N/A`) as the summary prompt.
pub fn render_summary(record: &VitalsRecord, patient: &PatientContext) -> String {
    let v = |field: VitalField| or_na(record.value(field));

    let conditions = if patient.chronic_conditions.is_empty() {
        "None".to_string()
    } else {
        patient.chronic_conditions.join(", ")
    };

    let custom = if record.custom_vitals().is_empty() {
        "None".to_string()
    } else {
        record
            .custom_vitals()
            .iter()
            .map(|c| format!("- {}: {} {}", c.name, c.value, c.unit))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let lines = [
        "Analyze the following patient vitals and provide a brief summary.".to_string(),
        "Patient Information:".to_string(),
        format!("- Name: {}", patient.full_name),
        format!("- Age: {}", patient.age),
        format!("- Gender: {}", patient.gender),
        format!("- Chronic Conditions: {conditions}"),
        String::new(),
        "Standard Vitals:".to_string(),
        format!("- Weight: {} kg", v(VitalField::Weight)),
        format!("- Height: {} cm", v(VitalField::Height)),
        format!("- BMI: {}", or_na(record.bmi())),
        format!("- Pulse: {} bpm", v(VitalField::Pulse)),
        format!(
            "- Blood Pressure (SYS/DIA): {}/{} mmHg",
            v(VitalField::BpSystolic),
            v(VitalField::BpDiastolic)
        ),
        format!("- MAP: {} mmHg", or_na(record.map())),
        format!("- Temperature: {} °F", v(VitalField::Temperature)),
        format!("- SpO2: {} %", v(VitalField::Spo2)),
        format!("- Respiratory Rate: {} breaths/min", v(VitalField::RespiratoryRate)),
        format!("- Pain Score: {} / 10", v(VitalField::PainScore)),
        format!(
            "- GCS (E/V/M): {}/{}/{}",
            v(VitalField::GcsEye),
            v(VitalField::GcsVerbal),
            v(VitalField::GcsMotor)
        ),
        String::new(),
        "Additional Custom Vitals:".to_string(),
        custom,
    ];

    lines.join("\n")
}

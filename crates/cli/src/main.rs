use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hms_core::vitals::{PatientContext, RiskFlag, VitalsInput};
use hms_core::{
    constants::{DEFAULT_DATA_DIR, DEFAULT_RECORDED_BY}, CoreConfig, FileVitalsStore, Operator, PatientId, RecordId, Role,
    VitalsStore,
};
use hms_types::{NonEmptyText, Uhid};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "HMS vitals CLI")]
struct Cli {
    /// Data directory (defaults to HMS_DATA_DIR, then `hms_data`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Raw vitals given as `-f name=value`, plus risk flags.
#[derive(Args, Debug, Default)]
struct VitalsArgs {
    /// Vitals field, e.g. `-f pulse=72 -f bpSystolic=120/80`
    #[arg(short = 'f', long = "field")]
    fields: Vec<String>,
    /// Risk flag to set (`diabetes`, `heartDisease`, `kidney`)
    #[arg(long = "risk")]
    risks: Vec<String>,
}

#[derive(Args, Debug)]
struct PatientArgs {
    /// Unique hospital identifier
    #[arg(long)]
    uhid: String,
    /// Patient full name
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: u32,
    #[arg(long)]
    gender: String,
    /// Chronic condition (repeatable)
    #[arg(long = "condition")]
    conditions: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived vitals view and validation result
    Assess {
        #[command(flatten)]
        vitals: VitalsArgs,
    },
    /// Print the AI summary prompt for the vitals
    Prompt {
        #[command(flatten)]
        patient: PatientArgs,
        #[command(flatten)]
        vitals: VitalsArgs,
    },
    /// Validate and store a vitals record
    Record {
        /// Patient UUID (32 lowercase hex)
        patient_id: String,
        #[command(flatten)]
        patient: PatientArgs,
        /// Operator display name, stamped as recordedBy
        #[arg(long)]
        operator_name: String,
        /// Operator role, e.g. `staff-nurse`
        #[arg(long)]
        operator_role: String,
        #[command(flatten)]
        vitals: VitalsArgs,
    },
    /// List stored vitals for a patient
    List {
        /// Patient UUID (32 lowercase hex)
        patient_id: String,
    },
    /// Print each role's permissions
    Roles,
}

impl VitalsArgs {
    fn to_input(&self) -> anyhow::Result<VitalsInput> {
        let mut input = VitalsInput::from_pairs(self.fields.iter().map(String::as_str))?;
        for risk in &self.risks {
            let flag: RiskFlag = risk.parse()?;
            match flag {
                RiskFlag::Diabetes => input.risk_flags.diabetes = true,
                RiskFlag::HeartDisease => input.risk_flags.heart_disease = true,
                RiskFlag::Kidney => input.risk_flags.kidney = true,
            }
        }
        Ok(input)
    }
}

impl PatientArgs {
    fn into_context(self, id: PatientId) -> anyhow::Result<PatientContext> {
        Ok(PatientContext {
            id,
            uhid: Uhid::parse(&self.uhid)?,
            full_name: NonEmptyText::new(&self.name)?,
            age: self.age,
            gender: self.gender,
            chronic_conditions: self.conditions,
        })
    }
}

/// Validates `input` and saves it for `patient`, or fails listing every invalid field.
async fn record_vitals(
    store: &dyn VitalsStore,
    config: &CoreConfig,
    patient: &PatientContext,
    operator: &Operator,
    input: &VitalsInput,
) -> anyhow::Result<RecordId> {
    let mut engine = input.to_engine()?;
    let report = engine.validate();
    if !report.valid {
        let problems: Vec<String> = report
            .errors
            .iter()
            .map(|(field, err)| format!("{field}: {}", err.message))
            .collect();
        anyhow::bail!("vitals failed validation: {}", problems.join("; "));
    }

    let recorded_by = hms_core::vitals::recorded_by(Some(operator), config);
    let payload = engine.to_submission_payload(patient, recorded_by, chrono::Utc::now());
    Ok(store.save(&payload).await?)
}

/// Core config for `data_dir`, stamping `recorded_by` (or the standard label) on anonymous records.
fn core_config(data_dir: PathBuf, recorded_by: Option<String>) -> anyhow::Result<CoreConfig> {
    let recorded_by = recorded_by.unwrap_or_else(|| DEFAULT_RECORDED_BY.to_string());
    Ok(CoreConfig::new(data_dir, recorded_by)?)
}

fn roles_table() -> String {
    Role::ALL
        .into_iter()
        .map(|role| {
            let perms: Vec<String> = role
                .permissions()
                .into_iter()
                .map(|p| format!("{p:?}"))
                .collect();
            format!("{role}: {}", perms.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hms=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var("HMS_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let config = core_config(data_dir, std::env::var("HMS_RECORDED_BY").ok())?;

    match cli.command {
        Commands::Assess { vitals } => {
            let mut engine = vitals.to_input()?.to_engine()?;
            let report = engine.validate();
            let out = serde_json::json!({ "view": engine.view(), "report": report });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Prompt { patient, vitals } => {
            let patient = patient.into_context(PatientId::new())?;
            let engine = vitals.to_input()?.to_engine()?;
            println!("{}", engine.render_summary(&patient));
        }
        Commands::Record {
            patient_id,
            patient,
            operator_name,
            operator_role,
            vitals,
        } => {
            let patient_id = PatientId::parse(&patient_id)?;
            let patient = patient.into_context(patient_id)?;
            let role: Role = operator_role.parse()?;
            let operator = Operator::new("cli", &operator_name, role)?;

            let store = FileVitalsStore::new(&config);
            let record_id =
                record_vitals(&store, &config, &patient, &operator, &vitals.to_input()?).await?;
            println!("Recorded vitals {record_id} for patient {}", patient.id);
        }
        Commands::List { patient_id } => {
            let patient_id = PatientId::parse(&patient_id)?;
            let store = FileVitalsStore::new(&config);
            let records = store
                .list(&patient_id)
                .await
                .with_context(|| format!("listing vitals for {patient_id}"))?;
            if records.is_empty() {
                println!("No vitals found.");
            } else {
                for r in records {
                    let p = &r.payload;
                    println!(
                        "{}: T {} P {} RR {} SpO2 {} BP {}/{} BMI {} MAP {} by {}",
                        r.record_id,
                        p.temperature,
                        p.pulse,
                        p.respiratory_rate,
                        p.spo2,
                        p.bp_systolic,
                        p.bp_diastolic,
                        p.bmi,
                        p.map,
                        p.recorded_by
                    );
                }
            }
        }
        Commands::Roles => println!("{}", roles_table()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> PatientContext {
        PatientArgs {
            uhid: "UH-9".into(),
            name: "Kiran Das".into(),
            age: 45,
            gender: "Male".into(),
            conditions: vec![],
        }
        .into_context(PatientId::parse("abcdefabcdefabcdefabcdefabcdefab").unwrap())
        .unwrap()
    }

    fn vitals(fields: &[&str]) -> VitalsArgs {
        VitalsArgs {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            risks: vec![],
        }
    }

    #[test]
    fn cli_parses_record_command() {
        let cli = Cli::try_parse_from([
            "hms",
            "record",
            "abcdefabcdefabcdefabcdefabcdefab",
            "--uhid",
            "UH-9",
            "--name",
            "Kiran Das",
            "--age",
            "45",
            "--gender",
            "Male",
            "--operator-name",
            "Nurse Joy",
            "--operator-role",
            "staff-nurse",
            "-f",
            "pulse=72",
            "--field",
            "bpSystolic=120/80",
            "--risk",
            "kidney",
        ])
        .unwrap();
        let Commands::Record { vitals, .. } = cli.command else {
            panic!("expected record command");
        };
        assert_eq!(vitals.fields, vec!["pulse=72", "bpSystolic=120/80"]);
        let input = vitals.to_input().unwrap();
        assert!(input.risk_flags.kidney);
    }

    #[test]
    fn unknown_risk_flag_is_rejected() {
        let args = VitalsArgs {
            fields: vec![],
            risks: vec!["asthma".into()],
        };
        assert!(args.to_input().is_err());
    }

    #[test]
    fn core_config_uses_recorded_by_label() {
        let config = core_config(PathBuf::from("data"), None).unwrap();
        assert_eq!(config.default_recorded_by(), DEFAULT_RECORDED_BY);

        let config = core_config(PathBuf::from("data"), Some(" Ward 3 ".into())).unwrap();
        assert_eq!(config.default_recorded_by(), "Ward 3");

        assert!(core_config(PathBuf::from("data"), Some("   ".into())).is_err());
    }

    #[test]
    fn roles_table_lists_every_role() {
        let table = roles_table();
        assert_eq!(table.lines().count(), Role::ALL.len());
        assert!(table.contains("receptionist: Dashboard, Registration, OpdQueue, IpdQueue"));
    }

    #[tokio::test]
    async fn record_then_list_round_trips_through_the_store() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CoreConfig::with_data_dir(tmp.path().to_path_buf());
        let store = FileVitalsStore::new(&config);
        let operator = Operator::new("cli", "Nurse Joy", Role::StaffNurse).unwrap();
        let input = vitals(&[
            "temperature=98.6",
            "pulse=72",
            "respiratoryRate=16",
            "spo2=98",
            "bpSystolic=120/80",
        ])
        .to_input()
        .unwrap();

        let id = record_vitals(&store, &config, &patient(), &operator, &input)
            .await
            .unwrap();
        let records = store.list(&patient().id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_id, id);
        assert_eq!(records[0].payload.recorded_by, "Nurse Joy");
    }

    #[tokio::test]
    async fn record_lists_every_invalid_field() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CoreConfig::with_data_dir(tmp.path().to_path_buf());
        let store = FileVitalsStore::new(&config);
        let operator = Operator::new("cli", "Nurse Joy", Role::StaffNurse).unwrap();
        let input = vitals(&["temperature=109"]).to_input().unwrap();

        let err = record_vitals(&store, &config, &patient(), &operator, &input)
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("temperature: 90-108 °F only"));
        assert!(err.contains("pulse: Required"));
        assert!(store.list(&patient().id).await.unwrap().is_empty());
    }
}

use clap::{Parser, Subcommand};
use hospital_core::config::{
    association_policy_from_env_values, database_url_from_env_value,
    max_connections_from_env_value,
};
use hospital_core::{CoreConfig, CoreResult, HospitalService, PatientService, Store};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital registry admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate,
    /// List all hospitals
    ListHospitals,
    /// List all patients
    ListPatients,
    /// Create a hospital
    CreateHospital {
        /// Hospital name
        name: String,
        /// Postal address
        address: String,
    },
    /// Create a patient
    CreatePatient {
        /// Given name
        name: String,
        /// Last name
        last_name: String,
        /// Sex (free text)
        sex: String,
        /// Date of birth (dd/mm/yyyy)
        birth_date: String,
    },
    /// Register a patient at a hospital
    Register {
        /// Patient id
        patient_id: i64,
        /// Hospital id
        hospital_id: i64,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report<T: serde::Serialize>(
    what: &str,
    result: CoreResult<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(value) => print_json(&value),
        Err(e) => {
            eprintln!("Error {what}: {e}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'hospital --help' for commands");
        return Ok(());
    };

    let cfg = Arc::new(CoreConfig::new(
        database_url_from_env_value(std::env::var("DATABASE_URL").ok()),
        max_connections_from_env_value(std::env::var("DATABASE_MAX_CONNECTIONS").ok())?,
        association_policy_from_env_values(
            std::env::var("ALLOW_DUPLICATE_REGISTRATIONS").ok(),
            std::env::var("CASCADE_ASSOCIATIONS_ON_DELETE").ok(),
        )?,
    )?);
    // Connecting runs pending migrations.
    let store = Store::connect(&cfg).await?;
    let hospitals = HospitalService::new(cfg.clone(), store.clone());
    let patients = PatientService::new(cfg, store.clone());

    match command {
        Commands::Migrate => {
            println!("Database schema is up to date.");
        }
        Commands::ListHospitals => {
            report("listing hospitals", hospitals.list_all_hospitals().await)?;
        }
        Commands::ListPatients => {
            report("listing patients", patients.list_all_patients().await)?;
        }
        Commands::CreateHospital { name, address } => {
            report(
                "creating hospital",
                hospitals.create_hospital(name, address).await,
            )?;
        }
        Commands::CreatePatient {
            name,
            last_name,
            sex,
            birth_date,
        } => {
            report(
                "creating patient",
                patients
                    .create_patient(name, last_name, sex, &birth_date)
                    .await,
            )?;
        }
        Commands::Register {
            patient_id,
            hospital_id,
        } => {
            report(
                "registering patient",
                patients
                    .register_patient_in_hospital(patient_id, hospital_id)
                    .await,
            )?;
        }
    }

    store.close().await;
    Ok(())
}

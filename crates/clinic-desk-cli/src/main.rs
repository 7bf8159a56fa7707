//! Clinic Desk CLI
//!
//! Front-desk commands over the patient and consultation tables.

mod output;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use clinic_desk_core::config::{self, DeskConfig};
use clinic_desk_core::models::{Symptom, DISPLAY_DATE_FORMAT};
use clinic_desk_core::{Desk, DeskError, Patient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clinic-desk", version)]
#[command(about = "Patient registration, scheduling and prescriptions for the front desk")]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding pacientes.csv and consultas.csv (overrides config)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new patient
    Register {
        #[arg(long)]
        name: String,

        /// National ID (CPF), digits only
        #[arg(long, value_parser = parse_cpf)]
        cpf: String,

        /// Birth date (DD/MM/YYYY)
        #[arg(long, value_parser = parse_date)]
        birth_date: NaiveDate,

        /// Street, number and neighbourhood
        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Find patients by part of their CPF
    Search {
        #[arg(value_parser = non_empty)]
        query: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Edit the patient matching a CPF fragment
    Edit {
        #[arg(value_parser = non_empty)]
        query: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_cpf)]
        cpf: Option<String>,

        /// Birth date (DD/MM/YYYY)
        #[arg(long, value_parser = parse_date)]
        birth_date: Option<NaiveDate>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Schedule a consultation for the patient with this exact CPF
    Schedule {
        #[arg(long, value_parser = parse_cpf)]
        cpf: String,

        #[arg(short, long)]
        practitioner: String,

        /// Consultation date (DD/MM/YYYY)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        /// Consultation time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },

    /// List consultations booked for a day
    List {
        /// Day to list (DD/MM/YYYY), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start a consultation and issue a prescription
    Consult {
        /// CPF fragment identifying a single patient
        #[arg(value_parser = non_empty)]
        query: String,

        #[arg(short, long)]
        practitioner: String,

        /// Symptom from the checklist (repeatable), e.g. febre, nausea
        #[arg(short, long = "symptom")]
        symptoms: Vec<Symptom>,

        /// Consultation date (DD/MM/YYYY), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Directory for the PDF (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the practitioner roster
    Practitioners,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let mut config = match &cli.config {
        Some(path) => DeskConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DeskConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let mut desk = Desk::open(config).context("opening clinic tables")?;

    match run(&mut desk, cli.command) {
        Err(e) if is_advisory(&e) => {
            tracing::warn!("{e}");
            eprintln!("warning: {e}");
            Ok(())
        }
        other => other,
    }
}

/// Advisory desk outcomes are warnings: the command still exits 0.
fn is_advisory(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DeskError>()
        .is_some_and(DeskError::is_advisory)
}

fn run(desk: &mut Desk, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Register {
            name,
            cpf,
            birth_date,
            address,
            phone,
        } => {
            let patient = Patient::new(name, cpf, birth_date)
                .with_address(address)
                .with_phone(phone);
            desk.register_patient(patient)?;
            println!("Patient registered.");
        }

        Commands::Search { query, json } => {
            let found = desk.search_patients(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                output::print_patients(&found);
            }
        }

        Commands::Edit {
            query,
            name,
            cpf,
            birth_date,
            address,
            phone,
        } => {
            let mut updated = desk.select_patient(&query)?.clone();
            if let Some(name) = name {
                updated.name = name;
            }
            if let Some(cpf) = cpf {
                updated.cpf = cpf;
            }
            if let Some(birth_date) = birth_date {
                updated.birth_date = birth_date;
            }
            if let Some(address) = address {
                updated.address = address;
            }
            if let Some(phone) = phone {
                updated.phone = phone;
            }
            desk.edit_patient(&query, updated)?;
            println!("Patient updated.");
        }

        Commands::Schedule {
            cpf,
            practitioner,
            date,
            time,
        } => {
            let booked = desk.schedule_consultation(&cpf, &practitioner, date.and_time(time))?;
            println!(
                "Consultation scheduled: {} with {} at {}",
                booked.patient_name,
                booked.practitioner,
                booked.timestamp_text()
            );
        }

        Commands::List { date, json } => {
            let date = date.unwrap_or_else(today);
            let found = desk.consultations_on(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                output::print_consultations(&found);
            }
        }

        Commands::Consult {
            query,
            practitioner,
            symptoms,
            date,
            output: output_dir,
        } => {
            let date = date.unwrap_or_else(today);
            let outcome = desk.start_consultation(&query, &practitioner, &symptoms, date)?;
            output::print_patients(&[&outcome.patient]);
            println!("Data de Nascimento: {}", outcome.birth_date);

            match outcome.prescription {
                Some(rx) => {
                    output::print_prescription(&rx);
                    let path = match output_dir {
                        Some(dir) => rx.write_to(&dir)?,
                        None => desk.save_prescription(&rx)?,
                    };
                    println!("Prescription saved to {}", path.display());
                }
                None => println!("No symptoms selected. No prescription generated."),
            }
        }

        Commands::Practitioners => {
            for name in &desk.config().practitioners {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DISPLAY_DATE_FORMAT)
        .map_err(|_| format!("expected DD/MM/YYYY, got '{s}'"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| format!("expected HH:MM, got '{s}'"))
}

fn parse_cpf(s: &str) -> Result<String, String> {
    let cpf = s.trim();
    if cpf.is_empty() || cpf.chars().count() > 11 {
        return Err("CPF must have between 1 and 11 characters".into());
    }
    Ok(cpf.to_string())
}

fn non_empty(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("enter part of the patient's CPF".into())
    } else {
        Ok(s.trim().to_string())
    }
}

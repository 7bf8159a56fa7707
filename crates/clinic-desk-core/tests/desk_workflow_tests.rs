//! Front-desk workflow integration tests.
//!
//! These run against real files in a temporary data directory.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use clinic_desk_core::models::Symptom;
use clinic_desk_core::store::{ConsultationStore, PatientStore};
use clinic_desk_core::{Desk, DeskConfig, DeskError, Patient};

fn patient(name: &str, cpf: &str) -> Patient {
    Patient::new(
        name.to_string(),
        cpf.to_string(),
        NaiveDate::from_ymd_opt(1992, 8, 14).unwrap(),
    )
    .with_address("Rua Direita, 45, Centro")
    .with_phone("32991234567")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn data_rows(path: &std::path::Path) -> usize {
    fs::read_to_string(path).unwrap().lines().count() - 1
}

fn open_desk(dir: &tempfile::TempDir) -> Desk {
    Desk::open(DeskConfig::default().with_data_dir(dir.path())).unwrap()
}

#[test]
fn test_fresh_desk_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let desk = open_desk(&dir);

    assert!(desk.patients().is_empty());
    assert!(desk.consultations().is_empty());
    // Nothing is written until the first mutation
    assert!(!desk.config().patients_path().exists());
}

#[test]
fn test_register_new_patient_adds_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana Souza", "11111111111")).unwrap();
    let path = desk.config().patients_path();
    assert_eq!(data_rows(&path), 1);

    desk.register_patient(patient("Bruno Lima", "22222222222")).unwrap();
    assert_eq!(desk.patients().len(), 2);
    assert_eq!(data_rows(&path), 2);
}

#[test]
fn test_register_duplicate_reports_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana Souza", "11111111111")).unwrap();
    let before = fs::read_to_string(desk.config().patients_path()).unwrap();

    let err = desk
        .register_patient(patient("Outra Pessoa", "11111111111"))
        .unwrap_err();

    assert!(matches!(err, DeskError::Duplicate(ref cpf) if cpf == "11111111111"));
    assert!(err.is_advisory());
    assert_eq!(desk.patients().len(), 1);
    assert_eq!(
        fs::read_to_string(desk.config().patients_path()).unwrap(),
        before
    );
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut desk = open_desk(&dir);
        let mut p = patient("José \"Zé\" da Silva", "00011122233");
        p.address = "Rua Nova, 7, apto 2\nfundos".into();
        desk.register_patient(p).unwrap();
        desk.schedule_consultation("00011122233", "Dr. João", at(2024, 6, 10, 14, 0))
            .unwrap();
    }

    let desk = open_desk(&dir);
    let p = desk.patients().find_exact("00011122233").unwrap();
    assert_eq!(p.name, "José \"Zé\" da Silva");
    assert_eq!(p.address, "Rua Nova, 7, apto 2\nfundos");
    assert_eq!(desk.consultations().records()[0].practitioner, "Dr. João");
}

#[test]
fn test_edit_with_same_cpf_is_reported_as_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana Souza", "11111111111")).unwrap();

    let mut updated = desk.select_patient("1111").unwrap().clone();
    updated.phone = "32900000000".into();

    let err = desk.edit_patient("1111", updated).unwrap_err();
    assert!(matches!(err, DeskError::Duplicate(_)));
    assert_eq!(desk.patients().records()[0].phone, "32991234567");
}

#[test]
fn test_edit_requires_unique_match() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana", "12300000000")).unwrap();
    desk.register_patient(patient("Bia", "12399999999")).unwrap();

    let err = desk
        .edit_patient("123", patient("Ana", "55555555555"))
        .unwrap_err();
    assert!(matches!(err, DeskError::Ambiguous { matches: 2, .. }));
    assert_eq!(desk.patients().len(), 2);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana", "ABC123")).unwrap();
    desk.register_patient(patient("Bia", "xbc999")).unwrap();
    desk.register_patient(patient("Caio", "000000")).unwrap();

    let names: Vec<&str> = desk
        .search_patients("BC")
        .unwrap()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana", "Bia"]);

    assert!(matches!(
        desk.search_patients("zzz"),
        Err(DeskError::NotFound(_))
    ));
}

#[test]
fn test_store_schedule_does_not_check_patients() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ConsultationStore::open(dir.path().join("consultas.csv")).unwrap();

    store
        .schedule("Ninguém Cadastrado".into(), "Dr. Felipe".into(), at(2024, 1, 2, 9, 0))
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(data_rows(store.path()), 1);
}

#[test]
fn test_list_by_date_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana", "111")).unwrap();

    desk.schedule_consultation("111", "Dr. Felipe", at(2024, 3, 1, 8, 0))
        .unwrap();
    desk.schedule_consultation("111", "Dr. Mateus", at(2024, 3, 1, 17, 30))
        .unwrap();
    desk.schedule_consultation("111", "Dr. João", at(2024, 3, 10, 8, 0))
        .unwrap();
    desk.schedule_consultation("111", "Dr. João", at(2025, 3, 1, 8, 0))
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let found = desk.consultations_on(day).unwrap();
    let practitioners: Vec<&str> = found.iter().map(|c| c.practitioner.as_str()).collect();
    assert_eq!(practitioners, vec!["Dr. Felipe", "Dr. Mateus"]);

    let empty = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    assert!(matches!(desk.consultations_on(empty), Err(DeskError::NotFound(_))));
}

#[test]
fn test_consultation_issues_prescription_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana Souza", "11111111111")).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();

    let outcome = desk
        .start_consultation("1111", "Dr. Mateus", &[Symptom::Nausea, Symptom::Fever], day)
        .unwrap();
    assert_eq!(outcome.birth_date, "14/08/1992");

    let rx = outcome.prescription.unwrap();
    assert_eq!(
        rx.remedies,
        vec![
            "Remédio: Febrilina__________500mg - 1 cp - 6h/6h",
            "Remédio: Nausex__________250mg - 1 cp - 8h/8h",
        ]
    );

    let path = desk.save_prescription(&rx).unwrap();
    assert_eq!(path, dir.path().join("receitas").join("receita_Ana_Souza_09-07-2024.pdf"));
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_consultation_without_symptoms_issues_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut desk = open_desk(&dir);
    desk.register_patient(patient("Ana Souza", "11111111111")).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();

    let outcome = desk
        .start_consultation("11111111111", "Dr. Mateus", &[], day)
        .unwrap();
    assert!(outcome.prescription.is_none());
    assert!(!desk.config().output_path().exists());
}

#[test]
fn test_reads_table_written_by_other_tools() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pacientes.csv"),
        "Nome,CPF,Data de Nascimento,Endereço,Telefone\r\n\
         Ana,01234567890,1990-03-07,\"Rua A, 10\",32999990000\r\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("consultas.csv"),
        "Nome Paciente,Médico,Data/Hora\nAna,Dr. Felipe,07/03/2024 10:00\n",
    )
    .unwrap();

    let patients = PatientStore::open(dir.path().join("pacientes.csv")).unwrap();
    assert_eq!(patients.records()[0].cpf, "01234567890");
    assert_eq!(patients.records()[0].address, "Rua A, 10");

    let consultations = ConsultationStore::open(dir.path().join("consultas.csv")).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(consultations.list_for_date(day).len(), 1);
}

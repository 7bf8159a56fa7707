//! Terminal rendering of desk results.

use clinic_desk_core::{Consultation, Patient, Prescription};

pub fn print_patients(patients: &[&Patient]) {
    let rows: Vec<Vec<String>> = patients
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.cpf.clone(),
                p.birth_date_display(),
                p.address.clone(),
                p.phone.clone(),
            ]
        })
        .collect();
    print_table(
        &["Nome", "CPF", "Data de Nascimento", "Endereço", "Telefone"],
        &rows,
    );
}

pub fn print_consultations(consultations: &[&Consultation]) {
    let rows: Vec<Vec<String>> = consultations
        .iter()
        .map(|c| {
            vec![
                c.patient_name.clone(),
                c.practitioner.clone(),
                c.timestamp_text().to_string(),
            ]
        })
        .collect();
    print_table(&["Nome Paciente", "Médico", "Data/Hora"], &rows);
}

pub fn print_prescription(rx: &Prescription) {
    println!();
    for line in rx.lines() {
        println!("{line}");
    }
    println!();
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in format_table(headers, rows) {
        println!("{line}");
    }
}

/// Left-aligned columns padded to the widest cell.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines
}

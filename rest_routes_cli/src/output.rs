use rest_routes::HttpCode;
use tabled::{Table, Tabled};

use crate::call::Report;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Body")]
    body: String,
}

fn build_report_row(report: &Report) -> ReportRow {
    let status = match report.status {
        Some(raw) => match HttpCode::try_from(raw) {
            Ok(code) => code.to_string(),
            Err(_) => raw.to_string(),
        },
        None => "-".to_string(),
    };
    let body = match &report.body {
        Some(body) => body.to_string(),
        None => "-".to_string(),
    };
    ReportRow {
        outcome: report.outcome.to_string(),
        status,
        body,
    }
}

pub fn print_report(report: &Report, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_report_table(report),
        OutputFormat::Json => print_json(report),
    }
}

pub fn print_report_table(report: &Report) {
    println!("{}", Table::new([build_report_row(report)]));
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

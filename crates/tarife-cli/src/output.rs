//! Rendering tariff records as CSV, JSON or a text table.

use std::io::Write;

use console::{Alignment, measure_text_width, pad_str};
use rust_decimal::Decimal;

use tarife_core::TariffRecord;
use tarife_core::models::config::OutputConfig;

/// Tabular column order.
pub const COLUMNS: [&str; 10] = [
    "HierarchicalId",
    "ReportSequence",
    "ServiceName",
    "Currency",
    "MinAmount",
    "MinRate",
    "MaxAmount",
    "MaxRate",
    "Notes",
    "UpdatedAt",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Widest a text-table column may grow.
const MAX_TEXT_WIDTH: usize = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with the fixed column order
    Csv,
    /// JSON array of records
    Json,
    /// Plain text table
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

fn amount(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn rate(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{}%", v.normalize()))
        .unwrap_or_default()
}

/// One record as tabular cells, in [`COLUMNS`] order.
pub fn record_row(record: &TariffRecord, config: &OutputConfig) -> [String; 10] {
    [
        record.hierarchical_id.to_string(),
        record.report_sequence.to_string(),
        record.service_name.clone(),
        record.currency.as_str().to_string(),
        amount(record.min_amount),
        rate(record.min_rate),
        amount(record.max_amount),
        rate(record.max_rate),
        record.notes.clone(),
        record
            .updated_at
            .map(|d| d.format(&config.date_format).to_string())
            .unwrap_or_default(),
    ]
}

/// Write records as CSV. The byte order mark is written only when
/// `with_bom` is set.
pub fn write_csv<W: Write>(
    mut writer: W,
    records: &[TariffRecord],
    config: &OutputConfig,
    with_bom: bool,
) -> anyhow::Result<()> {
    if with_bom {
        writer.write_all(UTF8_BOM)?;
    }
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record_row(record, config))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_json(records: &[TariffRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Aligned plain-text table for terminal previews.
pub fn to_text(records: &[TariffRecord], config: &OutputConfig) -> String {
    let rows: Vec<[String; 10]> = records.iter().map(|r| record_row(r, config)).collect();

    let mut widths = COLUMNS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell)).min(MAX_TEXT_WIDTH);
        }
    }

    let format_line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad_str(cell, width, Alignment::Left, Some("…")).into_owned())
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&format_line(&COLUMNS));
    output.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&rule.join("  "));
    output.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output.push_str(&format_line(&cells));
        output.push('\n');
    }
    output
}

/// Render records in `format`. `to_file` controls the CSV byte order mark.
pub fn render(
    records: &[TariffRecord],
    format: OutputFormat,
    config: &OutputConfig,
    to_file: bool,
) -> anyhow::Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&mut buf, records, config, to_file && config.utf8_bom)?;
            Ok(buf)
        }
        OutputFormat::Json => Ok(to_json(records)?.into_bytes()),
        OutputFormat::Text => Ok(to_text(records, config).into_bytes()),
    }
}

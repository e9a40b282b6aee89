use anyhow::{Context, Result, bail};

use super::resolve::SourceRegistry;
use crate::model::{CitationKind, CitationRecord};

pub const SHEET_HEADER: &str = "Fn#\tCite#\tFootnote Text\tCitation Text\tSource Name\tWarnings";

const SHEET_COLUMNS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub footnote_number: i64,
    pub citation_index: usize,
    pub footnote_text: String,
    pub citation_text: String,
    pub source_name: String,
    pub warnings: String,
}

pub fn render_row(record: &CitationRecord, registry: &SourceRegistry) -> String {
    let mut warnings = record.warnings.clone();
    if record.kind() == Some(CitationKind::LongForm) {
        if let Some(id) = record.source {
            warnings.extend(registry.get(id).warnings.iter().cloned());
        }
    }

    let fields = [
        record.footnote_number.to_string(),
        record.citation_index.to_string(),
        sanitize_field(&record.footnote_text),
        sanitize_field(&record.text),
        sanitize_field(registry.name_of(record.source).unwrap_or_default()),
        sanitize_field(&warnings.join(" ")),
    ];

    fields.join("\t")
}

pub fn render_sheet(records: &[CitationRecord], registry: &SourceRegistry) -> String {
    let mut sheet = String::from(SHEET_HEADER);
    sheet.push('\n');
    for record in records {
        sheet.push_str(&render_row(record, registry));
        sheet.push('\n');
    }
    sheet
}

pub fn parse_sheet(raw: &str) -> Result<Vec<SheetRow>> {
    let mut lines = raw.lines();
    let header = lines.next().context("citation sheet is empty")?;
    if header.trim_end_matches('\r') != SHEET_HEADER {
        bail!("unexpected citation sheet header: {header}");
    }

    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_row(line.trim_end_matches('\r'))
                .with_context(|| format!("invalid citation sheet row {}", index + 2))
        })
        .collect()
}

fn parse_row(line: &str) -> Result<SheetRow> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != SHEET_COLUMNS {
        bail!(
            "expected {SHEET_COLUMNS} tab-separated fields, found {}",
            fields.len()
        );
    }

    Ok(SheetRow {
        footnote_number: fields[0]
            .parse()
            .with_context(|| format!("invalid footnote number: {}", fields[0]))?,
        citation_index: fields[1]
            .parse()
            .with_context(|| format!("invalid citation index: {}", fields[1]))?,
        footnote_text: fields[2].to_string(),
        citation_text: fields[3].to_string(),
        source_name: fields[4].to_string(),
        warnings: fields[5].to_string(),
    })
}

fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

use std::collections::BTreeSet;
use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::citation::{SheetRow, parse_sheet};
use crate::cli::InspectArgs;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SheetSummary {
    pub footnote_count: usize,
    pub row_count: usize,
    pub resolved_count: usize,
    pub source_count: usize,
    pub flagged_rows: Vec<(i64, usize)>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.sheet_path)
        .with_context(|| format!("failed to read {}", args.sheet_path.display()))?;
    let rows = parse_sheet(&raw)
        .with_context(|| format!("failed to parse {}", args.sheet_path.display()))?;
    let summary = summarize(&rows);

    info!(
        path = %args.sheet_path.display(),
        footnotes = summary.footnote_count,
        rows = summary.row_count,
        resolved = summary.resolved_count,
        sources = summary.source_count,
        flagged = summary.flagged_rows.len(),
        "citation sheet summary"
    );

    for row in rows.iter().filter(|row| !row.warnings.is_empty()) {
        warn!(
            footnote = row.footnote_number,
            citation = row.citation_index,
            text = %row.citation_text,
            warnings = %row.warnings,
            "flagged citation"
        );
    }

    Ok(())
}

pub fn summarize(rows: &[SheetRow]) -> SheetSummary {
    let footnotes: BTreeSet<i64> = rows.iter().map(|row| row.footnote_number).collect();
    let sources: BTreeSet<&str> = rows
        .iter()
        .map(|row| row.source_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    SheetSummary {
        footnote_count: footnotes.len(),
        row_count: rows.len(),
        resolved_count: rows.iter().filter(|row| !row.source_name.is_empty()).count(),
        source_count: sources.len(),
        flagged_rows: rows
            .iter()
            .filter(|row| !row.warnings.is_empty())
            .map(|row| (row.footnote_number, row.citation_index))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::SHEET_HEADER;

    #[test]
    fn summarize_counts_sources_and_flags() {
        let sheet = format!(
            "{SHEET_HEADER}\n\
             1\t1\tSmith v. Jones.\tSmith v. Jones, 1 F.3d 1 (2000)\tSmith v Jones\t\n\
             2\t1\tId.\tId.\tSmith v Jones\t\n\
             3\t0\t\t\t\t\n\
             4\t1\tDoe, supra note 9.\tDoe, supra note 9.\t\tCouldn't find original source for this supra citation.\n"
        );
        let rows = parse_sheet(&sheet).expect("sheet");

        assert_eq!(
            summarize(&rows),
            SheetSummary {
                footnote_count: 4,
                row_count: 4,
                resolved_count: 2,
                source_count: 1,
                flagged_rows: vec![(4, 1)],
            }
        );
    }
}

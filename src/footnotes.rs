use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub number: i64,
    pub text: String,
}

pub fn read_footnotes(path: &Path, num_acknowledgment_footnotes: i64) -> Result<Vec<Footnote>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let footnotes = parse_footnotes(&raw, num_acknowledgment_footnotes)
        .with_context(|| format!("failed to parse footnotes in {}", path.display()))?;

    info!(
        path = %path.display(),
        footnote_count = footnotes.len(),
        "loaded footnotes"
    );
    Ok(footnotes)
}

pub fn parse_footnotes(raw: &str, num_acknowledgment_footnotes: i64) -> Result<Vec<Footnote>> {
    let mut footnotes = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let trimmed = line.trim_start();
        let (id, text) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        let Ok(document_id) = id.parse::<i64>() else {
            bail!("line {} does not start with a footnote number: {id}", index + 1);
        };

        let Some(number) = document_id.checked_sub(num_acknowledgment_footnotes) else {
            bail!("line {} has an out of range footnote number: {id}", index + 1);
        };
        if number <= 0 {
            debug!(document_id, "skipping acknowledgment footnote");
            continue;
        }

        footnotes.push(Footnote {
            number,
            text: clean_footnote_text(text),
        });
    }

    Ok(footnotes)
}

fn clean_footnote_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches([' ', '.', '\u{0002}'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_footnotes_adjusts_numbers_and_skips_acknowledgments() {
        let raw = "1 The author thanks everyone.\n\n2 . Smith v. Jones, 1 F.3d 1 (2000).\n3 Id.\n";
        let footnotes = parse_footnotes(raw, 1).expect("footnotes should parse");

        assert_eq!(
            footnotes,
            vec![
                Footnote {
                    number: 1,
                    text: "Smith v. Jones, 1 F.3d 1 (2000).".to_string(),
                },
                Footnote {
                    number: 2,
                    text: "Id.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn parse_footnotes_keeps_empty_footnote_text() {
        let footnotes = parse_footnotes("4\n", 0).expect("footnotes should parse");
        assert_eq!(footnotes[0].number, 4);
        assert!(footnotes[0].text.is_empty());
    }

    #[test]
    fn parse_footnotes_collapses_inner_whitespace() {
        let footnotes = parse_footnotes("2 Smith v.  Jones,\t1 F.3d 1   (2000).\n", 1)
            .expect("footnotes should parse");
        assert_eq!(footnotes[0].text, "Smith v. Jones, 1 F.3d 1 (2000).");
    }

    #[test]
    fn parse_footnotes_rejects_out_of_range_numbers() {
        let error = parse_footnotes("3 ok\n-9223372036854775808 x\n", 1)
            .expect_err("overflowing footnote number should fail");
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn parse_footnotes_rejects_unnumbered_lines() {
        let error = parse_footnotes("1 ok\nSee generally Smith.\n", 0)
            .expect_err("unnumbered line should fail");
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn read_footnotes_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.txt");
        assert!(read_footnotes(&missing, 1).is_err());

        let path = dir.path().join("draft_footnotes.txt");
        let mut file = std::fs::File::create(&path).expect("create footnotes file");
        writeln!(file, "2 Id. at 4.").expect("write footnotes file");

        let footnotes = read_footnotes(&path, 1).expect("footnotes should load");
        assert_eq!(footnotes.len(), 1);
        assert_eq!(footnotes[0].number, 1);
    }
}

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use crate::citation::CitationClassifier;
use crate::footnotes::Footnote;
use crate::model::CitationRecord;

pub const NO_CITATION_FRAGMENT: &str = "-";

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "platform")]
pub enum SplitterConfig {
    Naive,
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        system_instruction: String,
        #[serde(default)]
        temperature: f64,
    },
}

impl SplitterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse splitter config {}", path.display()))
    }

    pub fn platform(&self) -> &'static str {
        match self {
            Self::Naive => "Naive",
            Self::Command { .. } => "Command",
        }
    }

    pub fn split(&self, footnote_text: &str) -> Result<Vec<String>> {
        if footnote_text.is_empty() {
            return Ok(vec![NO_CITATION_FRAGMENT.to_string()]);
        }

        match self {
            Self::Naive => Ok(vec![footnote_text.to_string()]),
            Self::Command {
                program,
                args,
                system_instruction,
                temperature,
            } => run_command_splitter(
                program,
                args,
                system_instruction,
                *temperature,
                footnote_text,
            ),
        }
    }
}

fn run_command_splitter(
    program: &str,
    args: &[String],
    system_instruction: &str,
    temperature: f64,
    footnote_text: &str,
) -> Result<Vec<String>> {
    let mut child = Command::new(program)
        .args(args)
        .env("CITECHECK_SYSTEM_INSTRUCTION", system_instruction)
        .env("CITECHECK_TEMPERATURE", temperature.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to execute splitter {program}"))?;

    {
        let mut stdin = child
            .stdin
            .take()
            .context("splitter stdin was not captured")?;
        stdin
            .write_all(footnote_text.as_bytes())
            .with_context(|| format!("failed to write footnote to splitter {program}"))?;
    }

    let output = child
        .wait_with_output()
        .with_context(|| format!("failed to wait for splitter {program}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "splitter {} returned non-zero exit status: {}",
            program,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .trim()
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect())
}

pub fn footnote_records(
    footnote: &Footnote,
    splitter: &SplitterConfig,
    classifier: &CitationClassifier,
) -> Result<Vec<CitationRecord>> {
    debug!(
        footnote = footnote.number,
        text = %footnote.text,
        "decomposing footnote into citations"
    );

    let fragments = splitter
        .split(&footnote.text)
        .with_context(|| format!("failed to split footnote {}", footnote.number))?;

    let mut records: Vec<CitationRecord> = fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| classifier.record(footnote.number, index + 1, fragment))
        .collect();

    match records.first_mut() {
        Some(first) => first.footnote_text = footnote.text.clone(),
        None => bail!("splitter returned no fragments for footnote {}", footnote.number),
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CitationForm, CitationKind};

    fn footnote(number: i64, text: &str) -> Footnote {
        Footnote {
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn config_parses_known_platforms() {
        let naive: SplitterConfig =
            serde_json::from_str(r#"{ "platform": "Naive" }"#).expect("naive config");
        assert_eq!(naive.platform(), "Naive");

        let command: SplitterConfig = serde_json::from_str(
            r#"{ "platform": "Command", "program": "split-cites", "args": ["--fast"], "temperature": 0.2 }"#,
        )
        .expect("command config");
        match command {
            SplitterConfig::Command {
                program,
                args,
                system_instruction,
                temperature,
            } => {
                assert_eq!(program, "split-cites");
                assert_eq!(args, vec!["--fast".to_string()]);
                assert!(system_instruction.is_empty());
                assert!((temperature - 0.2).abs() < f64::EPSILON);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn config_rejects_unknown_platform() {
        let parsed = serde_json::from_str::<SplitterConfig>(r#"{ "platform": "Carrier Pigeon" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_footnote_yields_placeholder_fragment() {
        let fragments = SplitterConfig::Naive.split("").expect("split");
        assert_eq!(fragments, vec![NO_CITATION_FRAGMENT.to_string()]);
    }

    #[test]
    fn naive_records_keep_whole_footnote() {
        let classifier = CitationClassifier::new().expect("classifier");
        let note = footnote(3, "Smith v. Jones, 123 F.3d 456 (2020); id. at 460.");
        let records =
            footnote_records(&note, &SplitterConfig::Naive, &classifier).expect("records");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].footnote_number, 3);
        assert_eq!(records[0].citation_index, 1);
        assert_eq!(records[0].text, note.text);
        assert_eq!(records[0].footnote_text, note.text);
    }

    #[test]
    fn empty_footnote_record_is_no_citation() {
        let classifier = CitationClassifier::new().expect("classifier");
        let records = footnote_records(&footnote(2, ""), &SplitterConfig::Naive, &classifier)
            .expect("records");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), Some(CitationKind::NoCite));
        assert_eq!(records[0].citation_index, 1);
    }

    #[cfg(unix)]
    #[test]
    fn command_splitter_reads_one_fragment_per_line() {
        let config = SplitterConfig::Command {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "cat >/dev/null; printf 'Smith v. Jones, 1 F.3d 1 (2000)\\nId. at 2\\n'".to_string(),
            ],
            system_instruction: "split".to_string(),
            temperature: 0.0,
        };
        let classifier = CitationClassifier::new().expect("classifier");
        let records =
            footnote_records(&footnote(1, "irrelevant"), &config, &classifier).expect("records");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), Some(CitationKind::LongForm));
        assert_eq!(records[1].kind(), Some(CitationKind::Id));
        assert_eq!(records[1].citation_index, 2);
        assert!(records[1].footnote_text.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn command_splitter_blank_line_becomes_blank_record() {
        let config = SplitterConfig::Command {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "cat >/dev/null; printf 'Smith v. Jones, 1 F.3d 1 (2000)\\n\\nId. at 2\\n'".to_string(),
            ],
            system_instruction: String::new(),
            temperature: 0.0,
        };
        let classifier = CitationClassifier::new().expect("classifier");
        let records =
            footnote_records(&footnote(1, "irrelevant"), &config, &classifier).expect("records");

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].form, CitationForm::Blank);
        assert_eq!(records[1].citation_index, 0);
        assert_eq!(records[2].citation_index, 3);
    }

    #[cfg(unix)]
    #[test]
    fn command_splitter_failure_is_reported() {
        let config = SplitterConfig::Command {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "cat >/dev/null; echo broken >&2; exit 3".to_string()],
            system_instruction: String::new(),
            temperature: 0.0,
        };
        let error = config.split("Smith.").expect_err("non-zero exit should fail");
        assert!(error.to_string().contains("broken"));
    }
}

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::citation::CitationClassifier;
use crate::cli::ClassifyArgs;
use crate::model::{CitationKind, ClassificationReport};

pub fn run(args: ClassifyArgs) -> Result<()> {
    let classifier = CitationClassifier::new()?;
    let reports = classify_all(&classifier, &args.texts);

    if args.json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &reports)
            .context("failed to serialize classification report")?;
        writeln!(stdout).context("failed to write classification report")?;
        return Ok(());
    }

    for report in &reports {
        info!(
            text = %report.text,
            kind = report.kind.map_or("none", CitationKind::as_str),
            shortcite = %report.shortcite.as_deref().unwrap_or_default(),
            reference = %report.reference.as_deref().unwrap_or_default(),
            "classified citation"
        );
    }

    Ok(())
}

pub fn classify_all(classifier: &CitationClassifier, texts: &[String]) -> Vec<ClassificationReport> {
    texts
        .iter()
        .map(|text| {
            let form = classifier.classify(text);
            ClassificationReport {
                text: text.clone(),
                kind: form.kind(),
                shortcite: form.shortcite().map(ToOwned::to_owned),
                reference: form.reference().map(ToOwned::to_owned),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_all_reports_groups_as_json() {
        let classifier = CitationClassifier::new().expect("classifier");
        let reports = classify_all(
            &classifier,
            &["Smith, supra note 12".to_string(), "Id.".to_string()],
        );

        assert_eq!(reports[0].kind, Some(CitationKind::Supra));
        assert_eq!(reports[1].kind, Some(CitationKind::Id));

        let json = serde_json::to_value(&reports).expect("json");
        assert_eq!(json[0]["kind"], "SUPRA");
        assert_eq!(json[0]["shortcite"], "Smith");
        assert_eq!(json[0]["reference"], "12");
        assert!(json[1].get("shortcite").is_none());
    }
}

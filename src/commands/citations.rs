use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::citation::{
    CitationClassifier, DUPLICATE_WARNING, HeuristicTagger, LOOKBACK_WARNING, NameTagger,
    SUPRA_WARNING, SourceRegistry, disambiguate, long_form_sources, render_sheet, resolve,
};
use crate::cli::CitationsArgs;
use crate::footnotes::{Footnote, read_footnotes};
use crate::model::{CitationCounts, CitationKind, CitationRecord, CitationRunManifest};
use crate::splitter::{SplitterConfig, footnote_records};
use crate::util::{derived_output_path, now_utc_string, sha256_file, write_json_pretty, write_text};

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: CitationsArgs) -> Result<()> {
    if !args.input_file.is_file() {
        bail!("input file '{}' does not exist", args.input_file.display());
    }
    if !args.splitter_config.is_file() {
        bail!(
            "splitter configuration file '{}' does not exist",
            args.splitter_config.display()
        );
    }

    let splitter = SplitterConfig::load(&args.splitter_config)?;
    let footnotes = read_footnotes(&args.input_file, args.num_acknowledgment_footnotes)?;

    info!(
        input = %args.input_file.display(),
        platform = splitter.platform(),
        footnote_count = footnotes.len(),
        "extracting citations"
    );

    let (records, registry) = extract_citations(&footnotes, &splitter)?;

    let output_path = derived_output_path(&args.input_file, &args.output_folder, "citations.tsv");
    write_text(&output_path, &render_sheet(&records, &registry))?;

    let counts = count_citations(footnotes.len(), &records, &registry);
    if counts.unresolved_supra_count + counts.unresolved_lookback_count > 0 {
        warn!(
            unresolved_supra = counts.unresolved_supra_count,
            unresolved_lookback = counts.unresolved_lookback_count,
            "some citations could not be matched to a source"
        );
    }

    let manifest_path: PathBuf = args.manifest_path.clone().unwrap_or_else(|| {
        derived_output_path(
            &args.input_file,
            &args.output_folder,
            "citations_manifest.json",
        )
    });
    let manifest = CitationRunManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        input_path: args.input_file.display().to_string(),
        input_sha256: sha256_file(&args.input_file)?,
        splitter_platform: splitter.platform().to_string(),
        num_acknowledgment_footnotes: args.num_acknowledgment_footnotes,
        output_path: output_path.display().to_string(),
        warnings: collect_warnings(&records, &registry),
        counts,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        path = %output_path.display(),
        manifest = %manifest_path.display(),
        records = manifest.counts.record_count,
        sources = manifest.counts.source_count,
        "wrote citation sheet"
    );

    Ok(())
}

pub fn extract_citations(
    footnotes: &[Footnote],
    splitter: &SplitterConfig,
) -> Result<(Vec<CitationRecord>, SourceRegistry)> {
    let classifier = CitationClassifier::new()?;
    let tagger: &dyn NameTagger = &HeuristicTagger::new();

    let mut records = Vec::new();
    for footnote in footnotes {
        records.extend(footnote_records(footnote, splitter, &classifier)?);
    }

    let mut registry = SourceRegistry::new().context("failed to prepare source naming")?;
    resolve(&mut records, &mut registry, tagger);
    disambiguate(&mut registry, &long_form_sources(&records));

    info!(
        records = records.len(),
        sources = registry.len(),
        "resolved citation sources"
    );

    Ok((records, registry))
}

pub fn count_citations(
    footnote_count: usize,
    records: &[CitationRecord],
    registry: &SourceRegistry,
) -> CitationCounts {
    let mut counts = CitationCounts {
        footnote_count,
        record_count: records.len(),
        source_count: registry.len(),
        ..CitationCounts::default()
    };

    for record in records {
        match record.kind() {
            None => counts.blank_count += 1,
            Some(CitationKind::NoCite) => counts.no_cite_count += 1,
            Some(CitationKind::Id) => counts.id_count += 1,
            Some(CitationKind::Supra) => counts.supra_count += 1,
            Some(CitationKind::LongForm) => counts.long_form_count += 1,
            Some(CitationKind::Lookback5) => counts.lookback_count += 1,
        }

        for warning in &record.warnings {
            if warning == SUPRA_WARNING {
                counts.unresolved_supra_count += 1;
            } else if warning == LOOKBACK_WARNING {
                counts.unresolved_lookback_count += 1;
            }
        }
    }

    counts.duplicate_source_count = registry
        .iter()
        .filter(|(_, source)| source.warnings.iter().any(|warning| warning == DUPLICATE_WARNING))
        .count();

    counts
}

fn collect_warnings(records: &[CitationRecord], registry: &SourceRegistry) -> Vec<String> {
    let mut warnings: Vec<String> = records
        .iter()
        .flat_map(|record| {
            record.warnings.iter().map(move |warning| {
                format!(
                    "footnote {} citation {}: {}",
                    record.footnote_number, record.citation_index, warning
                )
            })
        })
        .collect();

    for (_, source) in registry.iter() {
        for warning in &source.warnings {
            warnings.push(format!("source '{}': {}", source.name, warning));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::citation::parse_sheet;

    const FOOTNOTES: &str = "\
1 The author thanks the editors.
2 John Smith, Property Rules, 10 Yale L.J. 1 (1990).
3 Id. at 4.
4
5 Smith, supra note 1, at 7.
6 Jane Smith, Liability Rules, 20 Yale L.J. 5 (1991).
7 Doe, supra note 2.
";

    fn footnotes() -> Vec<Footnote> {
        crate::footnotes::parse_footnotes(FOOTNOTES, 1).expect("footnotes")
    }

    #[test]
    fn extract_citations_resolves_document() {
        let (records, registry) =
            extract_citations(&footnotes(), &SplitterConfig::Naive).expect("extract");

        assert_eq!(records.len(), 6);
        assert_eq!(records[1].source, records[0].source);
        assert_eq!(records[2].kind(), Some(CitationKind::NoCite));
        assert_eq!(records[3].source, records[0].source);
        assert_eq!(records[5].warnings, vec![SUPRA_WARNING.to_string()]);

        assert_eq!(registry.name_of(records[0].source), Some("Smith John"));
        assert_eq!(registry.name_of(records[4].source), Some("Smith Jane"));
    }

    #[test]
    fn count_citations_tallies_kinds_and_failures() {
        let notes = footnotes();
        let (records, registry) =
            extract_citations(&notes, &SplitterConfig::Naive).expect("extract");
        let counts = count_citations(notes.len(), &records, &registry);

        assert_eq!(counts.footnote_count, 6);
        assert_eq!(counts.record_count, 6);
        assert_eq!(counts.long_form_count, 2);
        assert_eq!(counts.id_count, 1);
        assert_eq!(counts.supra_count, 2);
        assert_eq!(counts.no_cite_count, 1);
        assert_eq!(counts.blank_count, 0);
        assert_eq!(counts.source_count, 2);
        assert_eq!(counts.unresolved_supra_count, 1);
        assert_eq!(counts.duplicate_source_count, 0);
    }

    #[test]
    fn run_writes_sheet_and_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input_file = dir.path().join("draft.txt");
        let splitter_config = dir.path().join("splitter.json");
        let output_folder = dir.path().join("out");
        fs::write(&input_file, FOOTNOTES).expect("write footnotes");
        fs::write(&splitter_config, r#"{ "platform": "Naive" }"#).expect("write config");

        run(CitationsArgs {
            input_file: input_file.clone(),
            splitter_config,
            num_acknowledgment_footnotes: 1,
            output_folder: output_folder.clone(),
            manifest_path: None,
        })
        .expect("citations run");

        let sheet = fs::read_to_string(output_folder.join("draft_citations.tsv")).expect("sheet");
        let rows = parse_sheet(&sheet).expect("parse sheet");
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].footnote_number, 1);
        assert_eq!(rows[0].source_name, "Smith John");
        assert_eq!(rows[1].citation_text, "Id. at 4.");

        let manifest: CitationRunManifest = serde_json::from_slice(
            &fs::read(output_folder.join("draft_citations_manifest.json")).expect("manifest"),
        )
        .expect("parse manifest");
        assert_eq!(manifest.splitter_platform, "Naive");
        assert_eq!(manifest.counts.record_count, 6);
        assert_eq!(manifest.input_sha256, sha256_file(&input_file).expect("hash"));
        assert_eq!(manifest.warnings.len(), 1);
        assert!(manifest.warnings[0].starts_with("footnote 6 citation 1"));
    }

    #[test]
    fn run_rejects_missing_splitter_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input_file = dir.path().join("draft.txt");
        fs::write(&input_file, FOOTNOTES).expect("write footnotes");

        let error = run(CitationsArgs {
            input_file,
            splitter_config: dir.path().join("missing.json"),
            num_acknowledgment_footnotes: 1,
            output_folder: dir.path().join("out"),
            manifest_path: None,
        })
        .expect_err("missing config should fail");
        assert!(error.to_string().contains("splitter configuration"));
    }
}

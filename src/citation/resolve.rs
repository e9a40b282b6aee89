use anyhow::Result;
use tracing::{debug, warn};

use super::naming::{SourceNamer, matches, normalized_tokens, preprocess};
use super::tagger::NameTagger;
use crate::model::{CitationForm, CitationKind, CitationRecord, Source, SourceId};

pub const SUPRA_WARNING: &str = "Couldn't find original source for this supra citation.";
pub const LOOKBACK_WARNING: &str = "Identified this as a potential \"look five footnotes back\" citation but couldn't identify the original source.";

pub const LOOKBACK_WINDOW: i64 = 5;

#[derive(Debug)]
pub struct SourceRegistry {
    namer: SourceNamer,
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new() -> Result<Self> {
        Ok(Self {
            namer: SourceNamer::new()?,
            sources: Vec::new(),
        })
    }

    pub fn create(&mut self, text: &str, tagger: &dyn NameTagger) -> SourceId {
        let name = self.namer.name_for(text, tagger);
        let tokens = normalized_tokens(&preprocess(text));
        self.sources.push(Source::from_parts(name, text.to_string(), tokens));
        SourceId(self.sources.len() - 1)
    }

    pub fn get(&self, id: SourceId) -> &Source {
        &self.sources[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: SourceId) -> &mut Source {
        &mut self.sources[id.0]
    }

    pub fn name_of(&self, id: Option<SourceId>) -> Option<&str> {
        id.map(|id| self.get(id).name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &Source)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, source)| (SourceId(index), source))
    }

    pub(crate) fn postprocess(&self, text: &str) -> String {
        self.namer.postprocess(text)
    }
}

enum Resolution {
    Skip,
    Assigned(Option<SourceId>),
    Unresolved(&'static str),
}

pub fn resolve(
    records: &mut [CitationRecord],
    registry: &mut SourceRegistry,
    tagger: &dyn NameTagger,
) {
    let mut previous: Option<SourceId> = None;

    for index in 0..records.len() {
        let resolution = match &records[index].form {
            CitationForm::NoCite => Resolution::Skip,
            CitationForm::Blank => Resolution::Assigned(None),
            CitationForm::LongForm => {
                Resolution::Assigned(Some(registry.create(&records[index].text, tagger)))
            }
            CitationForm::Id => Resolution::Assigned(previous),
            CitationForm::Supra {
                shortcite,
                reference,
            } => match find_supra_source(records, shortcite, reference.as_deref()) {
                Some(source) => Resolution::Assigned(source),
                None => Resolution::Unresolved(SUPRA_WARNING),
            },
            CitationForm::Lookback { shortcite } => {
                let footnote_number = records[index].footnote_number;
                match find_lookback_source(records, registry, footnote_number, shortcite) {
                    Some(source) => Resolution::Assigned(Some(source)),
                    None => Resolution::Unresolved(LOOKBACK_WARNING),
                }
            }
        };

        let record = &mut records[index];
        match resolution {
            Resolution::Skip => continue,
            Resolution::Assigned(source) => record.source = source,
            Resolution::Unresolved(message) => {
                warn!(
                    footnote = record.footnote_number,
                    citation = record.citation_index,
                    text = %record.text,
                    kind = record.form.label(),
                    "citation left unresolved"
                );
                record.warnings.push(message.to_string());
            }
        }

        debug!(
            footnote = record.footnote_number,
            citation = record.citation_index,
            kind = record.form.label(),
            source = %registry.name_of(record.source).unwrap_or_default(),
            "citation resolved"
        );
        previous = record.source;
    }
}

fn find_supra_source(
    records: &[CitationRecord],
    shortcite: &str,
    reference: Option<&str>,
) -> Option<Option<SourceId>> {
    let footnote = parse_footnote_reference(reference?)?;

    records
        .iter()
        .filter(|candidate| candidate.kind() == Some(CitationKind::LongForm))
        .find(|candidate| {
            candidate.footnote_number == footnote && matches(shortcite, &candidate.text)
        })
        .map(|candidate| candidate.source)
}

fn find_lookback_source(
    records: &[CitationRecord],
    registry: &SourceRegistry,
    footnote_number: i64,
    shortcite: &str,
) -> Option<SourceId> {
    // A candidate from a later footnote has a negative distance and still
    // qualifies.
    records.iter().find_map(|candidate| {
        let source = candidate.source?;
        let within_window = footnote_number - candidate.footnote_number <= LOOKBACK_WINDOW;
        (within_window && matches(shortcite, registry.get(source).full_citation_text()))
            .then_some(source)
    })
}

fn parse_footnote_reference(reference: &str) -> Option<i64> {
    if reference.is_empty() || !reference.chars().all(|character| character.is_ascii_digit()) {
        return None;
    }
    reference.parse().ok()
}

pub fn long_form_sources(records: &[CitationRecord]) -> Vec<SourceId> {
    records
        .iter()
        .filter(|record| record.kind() == Some(CitationKind::LongForm))
        .filter_map(|record| record.source)
        .collect()
}

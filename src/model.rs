use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CitationKind {
    NoCite,
    Id,
    Supra,
    LongForm,
    #[serde(rename = "LOOKBACK_5")]
    Lookback5,
}

impl CitationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoCite => "NO_CITE",
            Self::Id => "ID",
            Self::Supra => "SUPRA",
            Self::LongForm => "LONG_FORM",
            Self::Lookback5 => "LOOKBACK_5",
        }
    }
}

impl fmt::Display for CitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationForm {
    Blank,
    NoCite,
    Id,
    Supra {
        shortcite: String,
        reference: Option<String>,
    },
    LongForm,
    Lookback {
        shortcite: String,
    },
}

impl CitationForm {
    pub fn kind(&self) -> Option<CitationKind> {
        match self {
            Self::Blank => None,
            Self::NoCite => Some(CitationKind::NoCite),
            Self::Id => Some(CitationKind::Id),
            Self::Supra { .. } => Some(CitationKind::Supra),
            Self::LongForm => Some(CitationKind::LongForm),
            Self::Lookback { .. } => Some(CitationKind::Lookback5),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().map_or("none", CitationKind::as_str)
    }

    pub fn shortcite(&self) -> Option<&str> {
        match self {
            Self::Supra { shortcite, .. } | Self::Lookback { shortcite } => Some(shortcite),
            _ => None,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Supra { reference, .. } => reference.as_deref(),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SourceId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct CitationRecord {
    pub footnote_number: i64,
    pub citation_index: usize,
    pub text: String,
    pub footnote_text: String,
    pub form: CitationForm,
    pub source: Option<SourceId>,
    pub warnings: Vec<String>,
}

impl CitationRecord {
    pub fn kind(&self) -> Option<CitationKind> {
        self.form.kind()
    }
}

#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    full_citation_text: String,
    pub normalized_tokens: Vec<String>,
    pub warnings: Vec<String>,
}

impl Source {
    pub(crate) fn from_parts(
        name: String,
        full_citation_text: String,
        normalized_tokens: Vec<String>,
    ) -> Self {
        Self {
            name,
            full_citation_text,
            normalized_tokens,
            warnings: Vec::new(),
        }
    }

    pub fn full_citation_text(&self) -> &str {
        &self.full_citation_text
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub text: String,
    pub kind: Option<CitationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationCounts {
    pub footnote_count: usize,
    pub record_count: usize,
    pub blank_count: usize,
    pub no_cite_count: usize,
    pub id_count: usize,
    pub supra_count: usize,
    pub long_form_count: usize,
    pub lookback_count: usize,
    pub source_count: usize,
    pub unresolved_supra_count: usize,
    pub unresolved_lookback_count: usize,
    pub duplicate_source_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub input_path: String,
    pub input_sha256: String,
    pub splitter_platform: String,
    pub num_acknowledgment_footnotes: i64,
    pub output_path: String,
    pub counts: CitationCounts,
    pub warnings: Vec<String>,
}

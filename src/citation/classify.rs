use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::model::{CitationForm, CitationKind, CitationRecord};

// First matching pattern wins.
const PATTERNS: &[(&str, CitationKind, &str)] = &[
    (r"^-?$", CitationKind::NoCite, "no-citation placeholder"),
    (r"^id\b", CitationKind::Id, "id. citation"),
    (
        r"^(?P<shortcite>[^()]+?)[, ]+supra.?( note (?P<reference>[^ ,]+|\. \. \.)([, ].*)?)?$",
        CitationKind::Supra,
        "supra citation",
    ),
    (
        r"^.+ \d+ (WL|LEXIS) \d+,? at [*n.\d\-, ]+ \(.+\d{4}\)",
        CitationKind::LongForm,
        "Westlaw/Lexis full citation",
    ),
    (
        r"^(?P<shortcite>.+?, ??\d+( [A-Z][^ ,]*| \d{1,2}[A-Z]{1,2})*)( \d+,?)?? at [*\d]",
        CitationKind::Lookback5,
        "short case or journal citation",
    ),
    (
        r"^(?P<shortcite>§.*)",
        CitationKind::Lookback5,
        "short statute citation",
    ),
    (
        r"^U\.S\. Const\.",
        CitationKind::LongForm,
        "U.S. Constitution citation",
    ),
    (
        r"^([^ ]{0,25} )?(supra|infra)\b",
        CitationKind::LongForm,
        "internal cross-reference",
    ),
    (
        r"^(?P<shortcite>[^,()]{0,40}?)([, ]+(at)?( (sec\.|¶¶?|art\.|para\.)?[\d\-, ]+)*)?$",
        CitationKind::Lookback5,
        "very short citation",
    ),
];

#[derive(Debug)]
struct CitationPattern {
    regex: Regex,
    kind: CitationKind,
}

#[derive(Debug)]
pub struct CitationClassifier {
    patterns: Vec<CitationPattern>,
    whitespace: Regex,
}

impl CitationClassifier {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(PATTERNS.len());
        for (source, kind, label) in PATTERNS {
            let regex = Regex::new(&format!("(?i){source}"))
                .with_context(|| format!("failed to compile {label} regex"))?;
            patterns.push(CitationPattern { regex, kind: *kind });
        }

        Ok(Self {
            patterns,
            whitespace: Regex::new(r"\s+").context("failed to compile whitespace regex")?,
        })
    }

    pub fn classify(&self, text: &str) -> CitationForm {
        let collapsed = self.whitespace.replace_all(text, " ");
        let text = collapsed.trim();

        for pattern in &self.patterns {
            if let Some(captures) = pattern.regex.captures(text) {
                return build_form(pattern.kind, &captures);
            }
        }

        CitationForm::LongForm
    }

    pub fn record(
        &self,
        footnote_number: i64,
        citation_index: usize,
        text: &str,
    ) -> CitationRecord {
        let (citation_index, form) = if text.is_empty() {
            (0, CitationForm::Blank)
        } else {
            (citation_index, self.classify(text))
        };

        debug!(
            footnote = footnote_number,
            citation = citation_index,
            kind = form.label(),
            text = %text,
            "citation classified"
        );

        CitationRecord {
            footnote_number,
            citation_index,
            text: text.to_string(),
            footnote_text: String::new(),
            form,
            source: None,
            warnings: Vec::new(),
        }
    }
}

fn build_form(kind: CitationKind, captures: &Captures<'_>) -> CitationForm {
    let group = |name: &str| captures.name(name).map(|value| value.as_str().to_string());

    match kind {
        CitationKind::NoCite => CitationForm::NoCite,
        CitationKind::Id => CitationForm::Id,
        CitationKind::LongForm => CitationForm::LongForm,
        CitationKind::Supra => CitationForm::Supra {
            shortcite: group("shortcite").unwrap_or_default(),
            reference: group("reference"),
        },
        CitationKind::Lookback5 => CitationForm::Lookback {
            shortcite: group("shortcite").unwrap_or_default(),
        },
    }
}

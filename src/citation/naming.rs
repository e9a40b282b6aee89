use anyhow::{Context, Result};
use regex::{Captures, Regex};

use super::tagger::{NameTagger, STOP_WORDS};

#[derive(Debug)]
pub(crate) struct SourceNamer {
    punctuation: Regex,
    roman_numeral: Regex,
    single_letters: Regex,
}

impl SourceNamer {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            punctuation: Regex::new(r#"[ ./\\:"_]+"#)
                .context("failed to compile name punctuation regex")?,
            roman_numeral: Regex::new(r"\b(Infra|Supra)(?:\s+\w+)*\s+(Ii|Iii|Iv|v)\b")
                .context("failed to compile roman numeral regex")?,
            single_letters: Regex::new(r"\b[A-Z]\b(?:\s+\b[A-Z]\b)+")
                .context("failed to compile single letter regex")?,
        })
    }

    pub(crate) fn name_for(&self, text: &str, tagger: &dyn NameTagger) -> String {
        self.postprocess(&unprocessed_name(text, tagger))
    }

    pub(crate) fn postprocess(&self, text: &str) -> String {
        let spaced = self.punctuation.replace_all(text, " ");
        let titled = titlecase::titlecase(spaced.trim_matches(' '));

        let numerals = self
            .roman_numeral
            .replace_all(&titled, |captures: &Captures<'_>| {
                let whole = &captures[0];
                let head = whole.rsplit_once(' ').map(|(head, _)| head).unwrap_or(whole);
                format!("{} {}", head, captures[2].to_uppercase())
            });

        self.single_letters
            .replace_all(&numerals, |captures: &Captures<'_>| {
                captures[0].split_whitespace().collect::<String>()
            })
            .into_owned()
    }
}

pub(crate) fn preprocess(text: &str) -> String {
    deunicode::deunicode(text)
        .replace('&', "and")
        .trim()
        .to_string()
}

pub(crate) fn naming_segment(text: &str) -> String {
    let mut end = text.len();
    let mut chars = text.char_indices().peekable();

    while let Some((index, character)) = chars.next() {
        if matches!(character, ',' | ':' | ';') {
            let closes_word = chars
                .peek()
                .map(|(_, next)| next.is_whitespace())
                .unwrap_or(true);
            if closes_word {
                end = index;
                break;
            }
        }
    }

    text[..end].to_lowercase()
}

fn unprocessed_name(text: &str, tagger: &dyn NameTagger) -> String {
    let segment = naming_segment(&preprocess(text));

    if segment.contains(" v ") || segment.contains(" v. ") || segment.starts_with("in re") {
        return segment;
    }

    if segment.starts_with("infra") || segment.starts_with("supra") {
        return segment;
    }

    let trimmed = segment.trim();
    if let Some(surname) = tagger.person_surname(trimmed) {
        return surname;
    }

    if let Some((_, end)) = tagger.first_noun_span(trimmed) {
        return trimmed[..end].trim().to_string();
    }

    segment
}

pub(crate) fn normalized_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            let token = raw.trim_matches(|character: char| {
                matches!(
                    character,
                    ',' | '.' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '!' | '?'
                        | '\u{201c}' | '\u{201d}' | '\u{2018}' | '\u{2019}'
                )
            });

            if !token.chars().any(char::is_alphanumeric) {
                return None;
            }

            let lowered = token.to_lowercase();
            if STOP_WORDS.contains(lowered.as_str()) {
                return None;
            }

            Some(preprocess(&lowered))
        })
        .collect()
}

pub fn matches(query: &str, target: &str) -> bool {
    let target_words = words(target);
    let mut cursor = 0;

    for word in words(query) {
        match target_words[cursor..]
            .iter()
            .position(|candidate| *candidate == word)
        {
            Some(offset) => cursor += offset + 1,
            None => return false,
        }
    }

    true
}

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|character: char| !(character.is_alphanumeric() || character == '_'))
        .filter(|word| !word.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

use std::collections::HashSet;
use std::sync::LazyLock;

pub trait NameTagger {
    fn person_surname(&self, text: &str) -> Option<String>;

    fn first_noun_span(&self, text: &str) -> Option<(usize, usize)>;
}

pub(crate) static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "either", "else", "even", "ever", "every", "few", "for", "from",
        "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
        "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
        "itself", "just", "may", "me", "might", "more", "most", "much", "must", "my", "myself",
        "neither", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
        "other", "our", "ours", "ourselves", "out", "over", "own", "per", "same", "see",
        "several", "she", "should", "since", "so", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "though", "through", "thus", "to", "too", "under", "until", "up", "upon",
        "us", "very", "via", "was", "we", "were", "what", "when", "where", "whether", "which",
        "while", "who", "whom", "whose", "why", "will", "with", "within", "without", "would",
        "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

static NON_NAME_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "act", "administration", "agency", "amendment", "american", "annotated", "article",
        "association", "bar", "bill", "board", "book", "brief", "bureau", "center", "chapter",
        "circuit", "code", "commission", "committee", "company", "congress", "constitution",
        "corp", "corporation", "council", "county", "court", "department", "dictionary",
        "district", "division", "executive", "federal", "foundation", "government", "guide",
        "handbook", "history", "house", "inc", "institute", "journal", "law", "laws", "league",
        "letter", "library", "manual", "memorandum", "national", "news", "office", "opinion",
        "order", "part", "policy", "post", "press", "principles", "project", "record",
        "regulation", "regulations", "report", "reports", "restatement", "review", "rule",
        "rules", "section", "senate", "service", "society", "state", "states", "statute",
        "statutes", "study", "supreme", "times", "title", "treatise", "treaty", "united",
        "university",
    ]
    .into_iter()
    .collect()
});

static GIVEN_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aaron", "adam", "adrian", "alan", "albert", "alexander", "alexandra", "alice", "alison",
        "amanda", "amy", "andrea", "andrew", "angela", "ann", "anna", "anne", "anthony", "antonin",
        "barbara", "benjamin", "beth", "brian", "bruce", "carl", "carol", "caroline", "catharine",
        "catherine", "charles", "christine", "christopher", "clarence", "cass", "daniel", "david",
        "deborah", "dennis", "diane", "donald", "douglas", "edward", "elena", "elizabeth", "ellen",
        "emily", "eric", "eugene", "frank", "frederick", "gary", "george", "gerald", "guido",
        "harold", "harry", "heather", "helen", "henry", "jack", "james", "jane", "janet", "jason",
        "jeffrey", "jennifer", "jeremy", "jessica", "joan", "john", "jonathan", "joseph", "judith",
        "julia", "karen", "katherine", "kathleen", "kenneth", "kevin", "laura", "laurence",
        "lawrence", "lisa", "louis", "margaret", "maria", "mark", "martha", "martin", "mary",
        "matthew", "melissa", "michael", "michelle", "nancy", "nicholas", "oliver", "pamela",
        "patricia", "paul", "peter", "philip", "rachel", "rebecca", "richard", "robert", "ronald",
        "ruth", "samuel", "sandra", "sarah", "scott", "sharon", "stephen", "steven", "susan",
        "thomas", "timothy", "victoria", "walter", "william",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "civil", "common", "free", "good", "great", "modern", "new", "old", "open", "private",
        "public", "true",
    ]
    .into_iter()
    .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["al", "ic", "ive", "ous", "ful", "able", "ible", "ary"];

static SUFFIXED_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "adversary", "alternative", "animal", "anniversary", "approval", "archive", "arrival",
        "beneficiary", "boundary", "canal", "capital", "clinic", "commentary", "constable",
        "critic", "dictionary", "directive", "executive", "glossary", "hospital", "incentive",
        "individual", "initiative", "journal", "judiciary", "library", "logic", "manual",
        "material", "metal", "motive", "music", "narrative", "objective", "official",
        "perspective", "principal", "proposal", "referral", "renewal", "representative",
        "republic", "rival", "salary", "secretary", "summary", "terminal", "topic", "traffic",
        "trial", "tribunal", "variable",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }
}

impl NameTagger for HeuristicTagger {
    fn person_surname(&self, text: &str) -> Option<String> {
        let mut words: Vec<&str> = text.split_whitespace().collect();

        let et_al = words
            .windows(2)
            .position(|pair| pair[0].eq_ignore_ascii_case("et") && pair[1].starts_with("al"));
        if let Some(position) = et_al {
            words.truncate(position);
        }

        let min_words = if et_al.is_some() { 1 } else { 2 };
        if words.len() < min_words || words.len() > 4 {
            return None;
        }

        let all_name_like = words.iter().all(|word| is_initial(word) || is_name_word(word));
        let surname = words.last()?;
        if !all_name_like || is_initial(surname) {
            return None;
        }

        let has_evidence = et_al.is_some()
            || words[..words.len() - 1].iter().any(|word| is_initial(word))
            || GIVEN_NAMES.contains(words[0].to_lowercase().as_str());
        has_evidence.then(|| surname.to_string())
    }

    fn first_noun_span(&self, text: &str) -> Option<(usize, usize)> {
        token_spans(text).into_iter().find_map(|(start, token)| {
            let trimmed = token.trim_end_matches([',', ';', ':', ')', ']', '"']);
            let word = trimmed.trim_start_matches(['(', '[', '"']);
            let lowered = word.to_lowercase();
            let lowered = lowered.trim_end_matches('.');
            let is_noun = word.chars().any(char::is_alphabetic)
                && !STOP_WORDS.contains(lowered)
                && !is_adjective(lowered);
            is_noun.then(|| (start, start + trimmed.len()))
        })
    }
}

fn token_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (index, character) in text.char_indices() {
        match (character.is_whitespace(), start) {
            (true, Some(begin)) => {
                spans.push((begin, &text[begin..index]));
                start = None;
            }
            (false, None) => start = Some(index),
            _ => {}
        }
    }
    if let Some(begin) = start {
        spans.push((begin, &text[begin..]));
    }

    spans
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), None, None) | (Some(letter), Some('.'), None) if letter.is_alphabetic()
    )
}

fn is_name_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    word.chars().count() >= 2
        && word
            .chars()
            .all(|character| character.is_alphabetic() || character == '\'' || character == '-')
        && word.chars().next().is_some_and(char::is_alphabetic)
        && !STOP_WORDS.contains(lowered.as_str())
        && !NON_NAME_WORDS.contains(lowered.as_str())
        && lowered != "v"
}

fn is_adjective(word: &str) -> bool {
    if ADJECTIVES.contains(word) {
        return true;
    }
    !SUFFIXED_NOUNS.contains(word)
        && ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| word.len() >= suffix.len() + 3 && word.ends_with(suffix))
}

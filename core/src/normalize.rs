use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

use crate::index::Term;

/// Part-of-speech classes carried alongside each stem. Two tokens with the
/// same spelling but different tags are distinct terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PosTag {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSat,
}

impl PosTag {
    /// Single-letter spelling used in the index artifact.
    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Noun => "n",
            PosTag::Verb => "v",
            PosTag::Adj => "a",
            PosTag::Adv => "r",
            PosTag::AdjSat => "s",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "n" => Some(PosTag::Noun),
            "v" => Some(PosTag::Verb),
            "a" => Some(PosTag::Adj),
            "r" => Some(PosTag::Adv),
            "s" => Some(PosTag::AdjSat),
            _ => None,
        }
    }
}

/// Linguistic normalization pipeline shared by the build and query paths.
///
/// Construct one per process and pass it by reference everywhere; the regexes
/// and the stemmer are reused across every document and query.
pub struct Normalizer {
    filter: Regex,
    decimal: Regex,
    token: Regex,
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            filter: Regex::new(r"[^A-Za-z0-9.,?!]").expect("valid regex"),
            decimal: Regex::new(r"(\d+)?\.\d+").expect("valid regex"),
            token: Regex::new(r"[A-Za-z0-9][A-Za-z0-9.,]*").expect("valid regex"),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Turn raw text into an ordered stream of terms: NFKC fold, character
    /// filter, decimal-fraction removal, tokenize, lowercase, strip `.`/`,`,
    /// drop single-letter leftovers, POS-tag, lemmatize, stem.
    ///
    /// Queries go through this exact pipeline too, so a query term always
    /// matches the form that was indexed.
    pub fn normalize(&self, text: &str) -> Vec<Term> {
        let folded = text.nfkc().collect::<String>();
        let spaced = self.filter.replace_all(&folded, " ");
        let cleaned = self.decimal.replace_all(&spaced, "");

        let mut terms = Vec::new();
        for mat in self.token.find_iter(&cleaned) {
            let lower = mat.as_str().to_lowercase();
            let bare: String = lower.chars().filter(|c| *c != '.' && *c != ',').collect();
            if bare.is_empty() {
                continue;
            }
            if bare.len() == 1 && bare.chars().all(|c| c.is_ascii_lowercase()) {
                continue;
            }
            let pos = tag(&bare);
            let lemma = lemmatize(&bare, pos);
            let stem = self.stemmer.stem(&lemma).to_string();
            terms.push(Term::new(stem, pos));
        }
        terms
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Suffix-heuristic tagger. Unmatched words default to Noun, matching the
/// contract's fallback tag.
fn tag(w: &str) -> PosTag {
    if w.len() > 3 && w.ends_with("ly") {
        PosTag::Adv
    } else if w.len() > 4
        && ["ing", "ed", "ify", "ize", "ise"].iter().any(|s| w.ends_with(s))
    {
        PosTag::Verb
    } else if w.len() > 4
        && ["ous", "ful", "less", "able", "ible", "ive", "ish", "ic"]
            .iter()
            .any(|s| w.ends_with(s))
    {
        PosTag::Adj
    } else {
        PosTag::Noun
    }
}

/// Light POS-aware lemmatization. Nouns get plural folding; verbal and
/// adjectival inflection is left for the stemmer.
fn lemmatize(word: &str, pos: PosTag) -> String {
    if pos != PosTag::Noun {
        return word.to_string();
    }
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 3
        && ["ses", "xes", "zes", "ches", "shes"].iter().any(|s| word.ends_with(s))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_the_filtered_stream() {
        let n = Normalizer::new();
        let terms = n.normalize("the cat sat");
        let stems: Vec<&str> = terms.iter().map(|t| t.stem.as_str()).collect();
        assert_eq!(stems, vec!["the", "cat", "sat"]);
    }

    #[test]
    fn strips_non_ascii_and_decimals() {
        let n = Normalizer::new();
        let terms = n.normalize("price: 3.14 dollars — cat");
        let stems: Vec<&str> = terms.iter().map(|t| t.stem.as_str()).collect();
        assert!(stems.contains(&"cat"));
        assert!(stems.contains(&"dollar"));
        assert!(!stems.iter().any(|s| s.contains('3') || s.contains("14")));
    }

    #[test]
    fn drops_single_letter_tokens() {
        let n = Normalizer::new();
        let terms = n.normalize("a cat x b");
        let stems: Vec<&str> = terms.iter().map(|t| t.stem.as_str()).collect();
        assert_eq!(stems, vec!["cat"]);
    }

    #[test]
    fn stems_inflected_verbs() {
        let n = Normalizer::new();
        let terms = n.normalize("running");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].stem, "run");
        assert_eq!(terms[0].pos, PosTag::Verb);
    }

    #[test]
    fn folds_plural_nouns() {
        let n = Normalizer::new();
        let terms = n.normalize("cats");
        assert_eq!(terms[0].stem, "cat");
        assert_eq!(terms[0].pos, PosTag::Noun);
    }

    #[test]
    fn stems_never_contain_commas_or_whitespace() {
        let n = Normalizer::new();
        let terms = n.normalize("1,000 dogs, and U.S. law?!");
        for t in &terms {
            assert!(!t.stem.contains(','), "{:?}", t.stem);
            assert!(!t.stem.contains(char::is_whitespace), "{:?}", t.stem);
        }
    }
}

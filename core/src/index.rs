use std::collections::{BTreeMap, HashMap};

use crate::normalize::PosTag;

/// Document identifier: the source file name, compared lexicographically.
/// Never assume these are numeric.
pub type DocId = String;

/// Zero-based offset of a term within its document's normalized token stream.
pub type Position = u32;

/// Composite key for one normalized word sense-class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    pub stem: String,
    pub pos: PosTag,
}

impl Term {
    pub fn new(stem: impl Into<String>, pos: PosTag) -> Self {
        Self { stem: stem.into(), pos }
    }
}

/// All postings for one term: DocId-ascending, positions ascending within
/// each document.
pub type PostingList = BTreeMap<DocId, Vec<Position>>;

/// Term -> posting-list mapping for one corpus snapshot. Built once,
/// immutable after load, held fully in memory during the query session.
#[derive(Debug, Default, PartialEq)]
pub struct InvertedIndex {
    postings: BTreeMap<Term, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn postings(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Term, &PostingList)> {
        self.postings.iter()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub(crate) fn insert(&mut self, term: Term, list: PostingList) {
        self.postings.insert(term, list);
    }
}

/// Corpus totals reported after a build. Not persisted beyond the summary
/// and the meta sidecar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    pub document_count: u64,
    pub token_count: u64,
    pub term_count: u64,
}

/// Accumulates postings one document at a time.
///
/// Postings are appended flat in document-processing order; grouping and the
/// DocId-ascending sort happen once in [`IndexBuilder::finish`], not during
/// accumulation.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    raw: HashMap<Term, Vec<(DocId, Position)>>,
    document_count: u64,
    token_count: u64,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's normalized token stream. Positions are the
    /// sequential indices of `terms`, starting at 0.
    pub fn add_document(&mut self, doc_id: &str, terms: Vec<Term>) {
        self.document_count += 1;
        self.token_count += terms.len() as u64;
        for (position, term) in terms.into_iter().enumerate() {
            self.raw
                .entry(term)
                .or_default()
                .push((doc_id.to_string(), position as Position));
        }
    }

    /// Group the flat postings into the final index and report stats.
    pub fn finish(self) -> (InvertedIndex, CorpusStats) {
        let stats = CorpusStats {
            document_count: self.document_count,
            token_count: self.token_count,
            term_count: self.raw.len() as u64,
        };
        let mut index = InvertedIndex::new();
        for (term, entries) in self.raw {
            let mut list = PostingList::new();
            for (doc_id, position) in entries {
                list.entry(doc_id).or_insert_with(Vec::new).push(position);
            }
            index.insert(term, list);
        }
        (index, stats)
    }
}

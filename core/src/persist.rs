use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::index::{InvertedIndex, Position, PostingList, Term};
use crate::normalize::PosTag;

/// Summary sidecar written next to the index artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub document_count: u64,
    pub token_count: u64,
    pub term_count: u64,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn index(&self) -> PathBuf {
        self.root.join("index.txt")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

/// Serialize the index, one line per term:
/// `stem,tag docId:position docId:position ...`
///
/// Terms are written in ascending (stem, tag) order and postings grouped by
/// DocId ascending with positions ascending, so rebuilding an unchanged
/// corpus produces a byte-identical artifact.
pub fn write_index<W: Write>(w: &mut W, index: &InvertedIndex) -> Result<(), Error> {
    for (term, list) in index.terms() {
        write!(w, "{},{}", term.stem, term.pos.as_str())?;
        for (doc_id, positions) in list {
            for position in positions {
                write!(w, " {doc_id}:{position}")?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<(), Error> {
    create_dir_all(&paths.root)?;
    let mut f = BufWriter::new(File::create(paths.index())?);
    write_index(&mut f, index)?;
    f.flush()?;
    Ok(())
}

/// Parse a serialized index. Any malformed key or posting aborts the whole
/// load; no partial index is returned.
///
/// Per-term postings are regrouped by DocId and sorted DocId-ascending with
/// ascending positions, independent of the order entries appear in the file.
pub fn read_index<R: BufRead>(reader: R) -> Result<InvertedIndex, Error> {
    let mut index = InvertedIndex::new();
    for (i, line) in reader.lines().enumerate() {
        let lineno = i + 1;
        let line = line?;
        let mut fields = line.split_whitespace();
        let key = match fields.next() {
            Some(key) => key,
            None => continue,
        };
        let (stem, tag) = key
            .split_once(',')
            .ok_or_else(|| Error::parse(lineno, format!("term key `{key}` has no comma")))?;
        let pos = PosTag::from_str(tag)
            .ok_or_else(|| Error::parse(lineno, format!("unknown part-of-speech tag `{tag}`")))?;

        let mut list = PostingList::new();
        for entry in fields {
            let (doc_id, position) = entry
                .rsplit_once(':')
                .ok_or_else(|| Error::parse(lineno, format!("posting `{entry}` has no colon")))?;
            if doc_id.is_empty() {
                return Err(Error::parse(lineno, format!("posting `{entry}` has an empty document id")));
            }
            let position: Position = position
                .parse()
                .map_err(|_| Error::parse(lineno, format!("non-numeric position in `{entry}`")))?;
            list.entry(doc_id.to_string()).or_insert_with(Vec::new).push(position);
        }
        for positions in list.values_mut() {
            positions.sort_unstable();
        }
        index.insert(Term::new(stem, pos), list);
    }
    tracing::debug!(terms = index.len(), "index parsed");
    Ok(index)
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex, Error> {
    let f = File::open(paths.index())?;
    read_index(BufReader::new(f))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<(), Error> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile, Error> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

pub mod error;
pub mod index;
pub mod normalize;
pub mod persist;

pub use error::Error;
pub use index::{CorpusStats, DocId, IndexBuilder, InvertedIndex, Position, PostingList, Term};
pub use normalize::{Normalizer, PosTag};

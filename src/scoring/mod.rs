//! Keyword-overlap scoring: extraction, overlap measurement, and the
//! before/after optimization delta.

pub mod delta;
pub mod keywords;
pub mod overlap;
pub mod stopwords;

pub use delta::{KeywordDisposition, OptimizationDelta, SkippedKeyword};
pub use keywords::KeywordExtractor;
pub use overlap::{OverlapScorer, ScoreResult};
pub use stopwords::StopwordList;

pub mod matcher;
pub mod normalize;

pub use matcher::{
  Assessment, DEFAULT_THRESHOLD, GuessMatcher, MatchResult, ShortTitleRule, SimilarityMetric, evaluate,
};
pub use normalize::normalize;

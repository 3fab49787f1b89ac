use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("invalid detection: {0}")]
    InvalidDetection(String),
    #[error(
        "mismatched detection batch: {rects} rects, {scores} scores, {ranges} ranges, \
         {min_heights} min heights, {max_heights} max heights"
    )]
    MismatchedBatch {
        rects: usize,
        scores: usize,
        ranges: usize,
        min_heights: usize,
        max_heights: usize,
    },
    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}

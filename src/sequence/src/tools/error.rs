use thiserror::Error;

use crate::item::MAX_PADDING;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Pattern is empty")]
    EmptyPattern,

    #[error("Pattern contains no padding character '#'")]
    MissingPaddingCharacter,

    #[error("Pattern contains more than one padding run")]
    MultiplePaddingRuns,

    #[error("Padding must be at most {MAX_PADDING} characters wide. Got {0}")]
    PaddingTooLarge(usize),

    #[error("Failed to compile the matcher pattern")]
    InvalidMatcher(#[from] regex::Error),
}

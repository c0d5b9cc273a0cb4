//! Pattern construction, decomposition and matching surface.
//!
//! A pattern is a filename where a run of [`PADDING_CHAR`] stands for a zero-padded
//! sequence index, e.g. `"file-###.png"`. The helpers below are the supported way
//! for callers to build [`Item`]s by hand or to recognize filenames belonging to a
//! sequence.

use regex::{Regex, RegexBuilder};

use crate::item::{Index, Indices, Item, MAX_PADDING, PADDING_CHAR};

mod error;
pub use error::PatternError;

/// Build a pattern from its prefix, suffix and padding width.
///
/// A `padding` of 0 is promoted to 1.
///
/// # Errors
/// Returns [`PatternError::PaddingTooLarge`] if `padding` exceeds [`MAX_PADDING`].
pub fn build_pattern(prefix: &str, suffix: &str, padding: usize) -> Result<String, PatternError> {
    if padding > MAX_PADDING {
        return Err(PatternError::PaddingTooLarge(padding))
    }
    let padding = padding.max(1);
    let mut pattern = String::with_capacity(prefix.len() + padding + suffix.len());
    pattern.push_str(prefix);
    pattern.extend(std::iter::repeat(PADDING_CHAR).take(padding));
    pattern.push_str(suffix);
    Ok(pattern)
}

/// Split a pattern around its single padding run.
///
/// # Errors
/// - [`PatternError::MissingPaddingCharacter`] if the pattern contains no `#`.
/// - [`PatternError::MultiplePaddingRuns`] if two disjoint runs are present.
/// - [`PatternError::PaddingTooLarge`] if the run is wider than [`MAX_PADDING`].
pub fn prefix_and_suffix(pattern: &str) -> Result<(&str, &str), PatternError> {
    let first = pattern.find(PADDING_CHAR).ok_or(PatternError::MissingPaddingCharacter)?;
    let last  = pattern.rfind(PADDING_CHAR).unwrap_or(first);
    let run   = &pattern[first..=last];
    if run.chars().any(|c| c != PADDING_CHAR) {
        return Err(PatternError::MultiplePaddingRuns)
    }
    if run.len() > MAX_PADDING {
        return Err(PatternError::PaddingTooLarge(run.len()))
    }
    Ok((&pattern[..first], &pattern[last + 1..]))
}

/// Return the width of the pattern's single padding run (between 1 and [`MAX_PADDING`]).
///
/// # Errors
/// Same failure modes as [`prefix_and_suffix`].
pub fn padding_of(pattern: &str) -> Result<usize, PatternError> {
    let (prefix, suffix) = prefix_and_suffix(pattern)?;
    Ok(pattern.len() - prefix.len() - suffix.len())
}

/// Create an [`Item`] representing a plain file.
///
/// Returns [`Item::Invalid`] if `filename` is empty or contains the reserved
/// padding character.
#[must_use]
pub fn create_single_file(filename: &str) -> Item {
    if filename.is_empty() || filename.contains(PADDING_CHAR) {
        return Item::Invalid
    }
    Item::Single { filename: filename.to_string() }
}

/// Create an [`Item`] representing a packed sequence over `start..=end`.
///
/// Returns [`Item::Invalid`] if `step` is 0 or `end < start`.
///
/// # Errors
/// Propagates [`PatternError`] when `pattern` does not carry exactly one padding run.
pub fn create_sequence(pattern: &str, start: Index, end: Index, step: u8) -> Result<Item, PatternError> {
    if step == 0 || end < start {
        return Ok(Item::Invalid)
    }
    let padding = padding_of(pattern)? as u8;
    Ok(Item::Packed { pattern: pattern.to_string(), start, end, step, padding })
}

/// Create an [`Item`] carrying an explicit index list.
///
/// # Errors
/// Propagates [`PatternError`] when `pattern` does not carry exactly one padding run.
pub fn create_indiced(pattern: &str, indices: Indices) -> Result<Item, PatternError> {
    let padding = padding_of(pattern)? as u8;
    Ok(Item::Indiced { pattern: pattern.to_string(), indices, padding })
}

/// Compile a pattern into a matcher recognizing the filenames of a sequence.
///
/// `@` is accepted as an alias for `#`, `*` matches any text, and a lone `#`
/// matches a run of any width. The whole filename must match.
///
/// # Errors
/// - [`PatternError::EmptyPattern`] on an empty pattern.
/// - [`PatternError::MissingPaddingCharacter`] if no `#` remains after translation.
/// - [`PatternError::InvalidMatcher`] if the translated expression fails to compile.
pub fn create_matcher(pattern: &str, ignore_case: bool) -> Result<Regex, PatternError> {
    let translated = matcher_string(pattern)?;
    let matcher = RegexBuilder::new(&format!("^{translated}$"))
        .case_insensitive(ignore_case)
        .build()?;
    Ok(matcher)
}

/// Test whether an [`Item`] belongs to the sequence described by `matcher`.
#[must_use]
pub fn matches(matcher: &Regex, candidate: &Item) -> bool {
    matcher.is_match(candidate.filename())
}

/// Translate a matcher pattern into a regular expression body.
fn matcher_string(pattern: &str) -> Result<String, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern)
    }
    let pattern = pattern.replace('@', "#");
    let padding = pattern.matches(PADDING_CHAR).count();
    if padding == 0 {
        return Err(PatternError::MissingPaddingCharacter)
    }
    let mut translated = pattern.replace('.', "\\.").replace('*', ".*");
    if padding == 1 {
        translated = translated.replace('#', "#+");
    }
    Ok(translated)
}

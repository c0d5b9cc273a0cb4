use std::path::MAIN_SEPARATOR;

use crate::item::{Indices, PADDING_CHAR};

use super::index::IndexParser;

/// Replace every convertible digit run of a filename with padding markers.
///
/// Only the leaf component takes part: digits within directory components are
/// left untouched. Runs whose value does not fit an [`crate::Index`] stay
/// literal and emit no index; the returned flag reports whether any run
/// overflowed. Parsed values are appended to `row` (cleared first) in
/// left-to-right order, one per placeholder run of the returned pattern.
///
/// Digits sitting after the final `.` are normalized like any others; deciding
/// whether an extension number is a sequence index is the pivot policy's job.
pub fn normalize_into(path: &str, row: &mut Indices) -> (String, bool) {
    row.clear();
    let leaf_start = path.rfind(MAIN_SEPARATOR).map_or(0, |separator| separator + 1);
    let leaf  = &path[leaf_start..];
    let bytes = leaf.as_bytes();

    let mut pattern = String::with_capacity(path.len());
    pattern.push_str(&path[..leaf_start]);

    let mut overflowed = false;
    let mut pending = 0; // start of the literal text not yet copied out
    let mut cursor  = 0;
    while cursor < bytes.len() {
        if !bytes[cursor].is_ascii_digit() {
            cursor += 1;
            continue
        }
        let run_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        let parser = IndexParser::parse(&leaf[run_start..cursor]);
        if parser.overflowed {
            overflowed = true; // the run stays literal
        } else {
            pattern.push_str(&leaf[pending..run_start]);
            pattern.extend(std::iter::repeat(PADDING_CHAR).take(cursor - run_start));
            pending = cursor;
            row.push(parser.index);
        }
    }
    pattern.push_str(&leaf[pending..]);
    (pattern, overflowed)
}

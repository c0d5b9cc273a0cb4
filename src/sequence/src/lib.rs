//! Core engine collapsing numbered file sequences within a directory listing.
//!
//! Feed [`parse`] a stream of `(filename, is_directory)` records and it returns
//! a [`FolderContent`] where every related group of files is collapsed into one
//! [`Item`] carrying a pattern (the shared filename with its digit runs replaced
//! by `#` markers) and either an explicit index list or packed
//! `[start:end]/step` ranges.
//!
//! The engine is a pure batch transformation: no I/O, no threads, no global
//! state. Enumerating directories and formatting items are the business of the
//! caller.

pub mod item;
pub mod tools;
mod collate;

pub use item::{FolderContent, Index, Indices, Item, MAX_PADDING, PADDING_CHAR};

use log::debug;

use collate::bucket::Bucketizer;
use collate::split::split_all_and_sort;
use collate::split_bucket::merge_compatible_padding;

/// Strategy deciding which digit column of an ambiguous pattern is kept as the
/// sequence index. The retained column is the one that is *not* pivoted on:
/// "retain first" keeps the first number of the filename varying and bakes the
/// others into literals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Never choose: ambiguous sets are flattened into individual files.
    RetainNone,
    /// Keep the first number (the last one starting before the extension).
    RetainFirst,
    /// Keep the last number of the filename.
    RetainLast,
    /// Keep the number with the highest estimated variance; flatten on a tie.
    #[default]
    RetainHighestVariance,
}

/// Engine options. Everything defaults to off, except the split strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub split_strategy: SplitStrategy,
    pub merge_padding : bool,
    pub pack          : bool,
    pub bake_singleton: bool,
    pub sort          : bool,
}

/// One record pulled from a directory enumerator. `filename` is the leaf name;
/// directory components are never scanned for digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemEntry {
    pub filename    : String,
    pub is_directory: bool,
}

/// Collate a stream of filesystem entries into a [`FolderContent`].
///
/// The iterator is Rust's pull protocol: the engine drains it from a single
/// thread, one entry at a time; callers wanting cancellation simply stop
/// yielding. `FolderContent::name` is left empty, to be set by the caller.
///
/// # Behavior
/// Never fails: pathological filenames (reserved `#`, digit runs beyond
/// [`Index::MAX`]) bypass sequence detection and come back verbatim as
/// [`Item::Single`] files.
pub fn parse<I>(config: &Configuration, entries: I) -> FolderContent
where
    I: IntoIterator<Item = FilesystemEntry>,
{
    let mut content = FolderContent::default();

    // ----------------------------- Ingest: normalize and bucket every file.
    let mut bucketizer = Bucketizer::default();
    for entry in entries {
        if entry.is_directory {
            content.directories.push(Item::Single { filename: entry.filename });
        } else if bucketizer.ingest(&entry.filename).is_none() {
            // Reserved character or integer overflow: the raw name stands alone.
            content.files.push(Item::Single { filename: entry.filename });
        }
    }

    // ----------------------------- Split recursively until one column remains.
    let mut buckets = split_all_and_sort(config.split_strategy, bucketizer.transfer());
    debug!("Collated {} file pattern(s)", buckets.len());

    // ----------------------------- Merge differing paddings on request.
    if config.merge_padding && buckets.len() >= 2 {
        merge_compatible_padding(&mut buckets);
    }

    // ----------------------------- Pack indices into ranges on request.
    if config.pack {
        for bucket in &mut buckets {
            bucket.pack();
        }
    }

    // ----------------------------- Emit the typed items.
    for bucket in buckets {
        bucket.emit(config.bake_singleton, |item| content.files.push(item));
    }

    // ----------------------------- Sort in canonical order on request.
    if config.sort {
        content.directories.sort_unstable();
        content.files.sort_unstable();
    }
    content
}

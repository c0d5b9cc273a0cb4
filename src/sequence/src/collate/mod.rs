//! Internals of the collation pipeline: ingest (normalize + bucket), then
//! reduce (split + merge + pack) into presentable items.

pub mod index;
pub mod normalize;
pub mod pattern;
pub mod estimate;
pub mod bucket;
pub mod split;
pub mod split_bucket;

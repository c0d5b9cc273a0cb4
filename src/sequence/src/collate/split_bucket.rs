use itertools::Itertools;

use crate::item::{Index, Indices, Item};

use super::bucket::Bucket;
use super::pattern::placeholder_span;

/// Widest step representable by an [`Item::Packed`].
const MAX_STEP: Index = 127;

/// A fully split bucket: at most one column remains, its indices sorted.
///
/// - `pattern`        : the bucket's pattern; at most one placeholder run.
/// - `sorted_indices` : ascending indices; drained into `ranges` by [`Self::pack`].
/// - `ranges`         : packed `(start, end)` ranges sharing `step`.
/// - `padding`        : the run's width, or 0 once padding-merged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitBucket {
    pub pattern       : String,
    pub sorted_indices: Indices,
    pub ranges        : Vec<(Index, Index)>,
    pub step          : Option<u8>,
    pub padding       : u8,
}

impl From<Bucket> for SplitBucket {
    fn from(bucket: Bucket) -> Self {
        debug_assert!(!bucket.splittable());
        let mut sorted_indices = bucket.columns.into_iter().next().unwrap_or_default();
        sorted_indices.sort_unstable();
        let padding = placeholder_span(&bucket.pattern)
            .map_or(0, |(start, end)| (end - start) as u8);
        Self {
            pattern: bucket.pattern,
            sorted_indices,
            ranges : Vec::new(),
            step   : None,
            padding,
        }
    }
}

impl SplitBucket {
    /// Whether `other` may be folded into `self`: both patterns carry a
    /// placeholder run, they agree outside of it, and the index sets are
    /// disjoint.
    pub fn can_merge(&self, other: &Self) -> bool {
        let (Some(span), Some(other_span)) =
            (placeholder_span(&self.pattern), placeholder_span(&other.pattern)) else {
                return false
            };
        self.pattern[..span.0] == other.pattern[..other_span.0]
            && self.pattern[span.1..] == other.pattern[other_span.1..]
            && disjoint(&self.sorted_indices, &other.sorted_indices)
    }

    /// Absorb `other`, collapsing the placeholder run to a single `#` and
    /// flagging the padding as variable-width.
    pub fn merge(&mut self, other: Self) {
        debug_assert!(self.can_merge(&other));
        if let Some((start, end)) = placeholder_span(&self.pattern) {
            self.pattern.replace_range(start..end, "#");
            self.sorted_indices.extend(other.sorted_indices);
            self.sorted_indices.sort_unstable();
            self.padding = 0;
        }
    }

    /// Drain the sorted indices into `(start, end)` ranges sharing the
    /// minimum consecutive step.
    ///
    /// Stays index-listed (no range is built) when fewer than two indices are
    /// present, when duplicates zero the minimum difference, or when the
    /// minimum difference does not fit the narrow step type.
    pub fn pack(&mut self) {
        let Some(step) = step_of(&self.sorted_indices) else {
            return
        };
        self.step = Some(step);

        let step  = Index::from(step);
        let mut start    = self.sorted_indices[0];
        let mut previous = start;
        for &index in &self.sorted_indices[1..] {
            if index - previous != step {
                self.ranges.push((start, previous));
                start = index;
            }
            previous = index;
        }
        self.ranges.push((start, previous));
        self.sorted_indices.clear();
    }

    /// Bake `value` over the placeholder run. A width-1 run grows to fit;
    /// wider runs zero-pad.
    fn baked_pattern(&self, value: Index) -> String {
        let Some((start, end)) = placeholder_span(&self.pattern) else {
            return self.pattern.clone()
        };
        let width = end - start;
        let baked = format!("{value:0width$}");
        assert!(width == 1 || baked.len() == width,
                "index {value} does not fit a padding of {width}");
        format!("{}{baked}{}", &self.pattern[..start], &self.pattern[end..])
    }

    /// Emit this bucket's items.
    ///
    /// Packed buckets yield one [`Item::Packed`] per range; unpacked ones a
    /// single [`Item::Indiced`]; unit buckets an [`Item::Single`]. With
    /// `bake_singleton`, one-element ranges and one-index lists are rewritten
    /// back into plain filenames.
    pub fn emit(self, bake_singleton: bool, mut push: impl FnMut(Item)) {
        if !self.ranges.is_empty() {
            let step = self.step.unwrap_or(1);
            for &(start, end) in &self.ranges {
                if start == end && bake_singleton {
                    push(Item::Single { filename: self.baked_pattern(start) });
                } else {
                    push(Item::Packed {
                        pattern: self.pattern.clone(),
                        start, end, step,
                        padding: self.padding,
                    });
                }
            }
            return
        }
        match self.sorted_indices.len() {
            0 => push(Item::Single { filename: self.pattern }),
            1 if bake_singleton => {
                push(Item::Single { filename: self.baked_pattern(self.sorted_indices[0]) });
            },
            _ => push(Item::Indiced {
                pattern: self.pattern,
                indices: self.sorted_indices,
                padding: self.padding,
            }),
        }
    }
}

/// Merge adjacent buckets differing only by padding width (disjoint indices
/// required). The list must be pattern-sorted; a linear accumulator scan
/// absorbs each compatible successor.
pub fn merge_compatible_padding(buckets: &mut Vec<SplitBucket>) {
    debug_assert!(buckets.windows(2).all(|pair| pair[0].pattern <= pair[1].pattern));
    let mut merged: Vec<SplitBucket> = Vec::with_capacity(buckets.len());
    for bucket in buckets.drain(..) {
        match merged.last_mut() {
            Some(last) if last.can_merge(&bucket) => last.merge(bucket),
            _ => merged.push(bucket),
        }
    }
    *buckets = merged;
}

/// The step of a sorted index list: its minimum consecutive difference, if
/// that difference is representable (`1..=127`).
fn step_of(sorted_indices: &[Index]) -> Option<u8> {
    sorted_indices
        .iter()
        .tuple_windows()
        .map(|(previous, next)| next - previous)
        .min()
        .filter(|step| (1..=MAX_STEP).contains(step))
        .map(|step| step as u8)
}

/// Whether two sorted index lists share no value.
fn disjoint(left: &[Index], right: &[Index]) -> bool {
    let (mut l, mut r) = (0, 0);
    while l < left.len() && r < right.len() {
        match left[l].cmp(&right[r]) {
            std::cmp::Ordering::Less    => l += 1,
            std::cmp::Ordering::Greater => r += 1,
            std::cmp::Ordering::Equal   => return false,
        }
    }
    true
}

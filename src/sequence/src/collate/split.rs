use log::trace;

use crate::SplitStrategy;

use super::bucket::Bucket;
use super::estimate::DistinctEstimator;
use super::pattern::placeholders;
use super::split_bucket::SplitBucket;

/// Flatten every multi-column bucket into unit files.
pub fn retain_none(_bucket: &Bucket) -> Option<usize> {
    None
}

/// Pivot on the first column, so the last number becomes the sequence index.
pub fn retain_last(_bucket: &Bucket) -> Option<usize> {
    Some(0)
}

/// Pivot on the last column, so the first number becomes the sequence index.
/// Prefers the last column starting before the final `.`, so that a number
/// within the extension (`file##.dp#`) is never the one retained. A hidden
/// file whose only dot is its leading one falls back to the last column.
pub fn retain_first(bucket: &Bucket) -> Option<usize> {
    debug_assert!(!bucket.columns.is_empty());
    let last = bucket.columns.len() - 1;
    let Some(dot) = bucket.pattern.rfind('.') else {
        return Some(last)
    };
    placeholders(&bucket.pattern)
        .iter()
        .rposition(|span| span.0 < dot)
        .or(Some(last))
}

/// Pivot on the column with the fewest distinct values, so the most varied
/// column becomes the sequence index. Refuses to choose when two or more
/// columns tie for the highest distinct count.
pub fn retain_highest_variance(bucket: &Bucket, estimator: &mut DistinctEstimator) -> Option<usize> {
    debug_assert!(!bucket.columns.is_empty());
    let estimates: Vec<usize> = bucket.columns
        .iter()
        .map(|column| estimator.estimate(column))
        .collect();

    let highest = *estimates.iter().max()?;
    if estimates.iter().filter(|&&estimate| estimate == highest).count() > 1 {
        return None // ambiguous: flatten rather than guess
    }
    let lowest = *estimates.iter().min()?;
    estimates.iter().position(|&estimate| estimate == lowest)
}

/// Apply the configured strategy to a splittable bucket.
pub fn pivot_index(
    strategy : SplitStrategy,
    bucket   : &Bucket,
    estimator: &mut DistinctEstimator
) -> Option<usize> {
    match strategy {
        SplitStrategy::RetainNone            => retain_none(bucket),
        SplitStrategy::RetainFirst           => retain_first(bucket),
        SplitStrategy::RetainLast            => retain_last(bucket),
        SplitStrategy::RetainHighestVariance => retain_highest_variance(bucket, estimator),
    }
}

/// Recursively split buckets until each holds at most one column, then sort
/// the outcome by pattern.
///
/// # Behavior
/// Worklist reduction: a splittable bucket is partitioned along its pivot
/// column (or flattened into unit files when the strategy refuses to pick);
/// a single-file bucket bakes its remaining columns away; anything else is
/// done and becomes a [`SplitBucket`].
pub fn split_all_and_sort(strategy: SplitStrategy, mut worklist: Vec<Bucket>) -> Vec<SplitBucket> {
    let mut estimator = DistinctEstimator::new();
    let mut out = Vec::with_capacity(worklist.len());
    while let Some(bucket) = worklist.pop() {
        if bucket.splittable() {
            match pivot_index(strategy, &bucket, &mut estimator) {
                Some(pivot) => {
                    trace!("Splitting '{}' along column {pivot}", bucket.pattern);
                    bucket.split(pivot, |child| worklist.push(child));
                },
                None => bucket.flatten(|unit| worklist.push(unit)),
            }
        } else if bucket.single() {
            bucket.flatten(|unit| worklist.push(unit));
        } else {
            out.push(SplitBucket::from(bucket));
        }
    }
    out.sort_unstable_by(|a, b| a.pattern.cmp(&b.pattern));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Indices;

    fn bucket() -> Bucket {
        let mut bucket = Bucket::new("/path_101/file-##-##.jpg");
        bucket.columns = vec![vec![1, 1, 2, 3], vec![1, 2, 2, 2]];
        bucket
    }

    fn split_and_sort(strategy: SplitStrategy, bucket: Bucket) -> Vec<SplitBucket> {
        split_all_and_sort(strategy, vec![bucket])
    }

    #[test]
    fn retain_none_refuses() {
        assert_eq!(retain_none(&bucket()), None);
    }

    #[test]
    fn retain_last_takes_the_first_column() {
        assert_eq!(retain_last(&bucket()), Some(0));
    }

    #[test]
    fn retain_first_takes_the_last_column() {
        assert_eq!(retain_first(&bucket()), Some(1));
    }

    #[test]
    fn retain_first_skips_extension_numbers() {
        let mut set = Bucket::new("file##-##-##.dpx");
        set.columns = vec![Indices::new(); 3];
        assert_eq!(retain_first(&set), Some(2));

        let mut set = Bucket::new("file##-##.dp#");
        set.columns = vec![Indices::new(); 3];
        assert_eq!(retain_first(&set), Some(1));
    }

    #[test]
    fn retain_first_hidden_files() {
        let mut set = Bucket::new(".file##-##-##.dpx");
        set.columns = vec![Indices::new(); 3];
        assert_eq!(retain_first(&set), Some(2));

        let mut set = Bucket::new(".file##-##.dp#");
        set.columns = vec![Indices::new(); 3];
        assert_eq!(retain_first(&set), Some(1));

        // No placeholder before the only (leading) dot: fall back to the last column.
        let mut set = Bucket::new(".foo##-##");
        set.columns = vec![Indices::new(); 2];
        assert_eq!(retain_first(&set), Some(1));
    }

    #[test]
    fn retain_highest_variance_picks_the_lowest_count() {
        let mut estimator = DistinctEstimator::new();
        assert_eq!(retain_highest_variance(&bucket(), &mut estimator), Some(1));

        let mut set = Bucket::new("");
        set.columns = vec![vec![0, 0, 0], vec![1, 2, 3]];
        assert_eq!(retain_highest_variance(&set, &mut estimator), Some(0));

        let mut set = Bucket::new("");
        set.columns = vec![vec![1, 2], vec![0, 0]];
        assert_eq!(retain_highest_variance(&set, &mut estimator), Some(1));
    }

    #[test]
    fn retain_highest_variance_refuses_ambiguous_maxima() {
        let mut estimator = DistinctEstimator::new();
        let mut set = Bucket::new("");
        set.columns = vec![vec![0, 1], vec![1, 2], vec![2, 2]];
        assert_eq!(retain_highest_variance(&set, &mut estimator), None);
    }

    #[test]
    fn retain_highest_variance_breaks_minimum_ties_on_the_first() {
        let mut estimator = DistinctEstimator::new();
        let mut set = Bucket::new("CP-sq####sq####_##-v###.####.jpg");
        set.columns = vec![Indices::new(); 5];
        for index in 1..15 {
            for (column, value) in set.columns.iter_mut().zip([88, 87, 2, 1, index]) {
                column.push(value);
            }
        }
        assert_eq!(retain_highest_variance(&set, &mut estimator), Some(0));
    }

    #[test]
    fn split_all_retain_none() {
        let results = split_and_sort(SplitStrategy::RetainNone, bucket());
        let patterns: Vec<&str> = results.iter().map(|result| result.pattern.as_str()).collect();
        assert_eq!(patterns, vec![
            "/path_101/file-01-01.jpg",
            "/path_101/file-01-02.jpg",
            "/path_101/file-02-02.jpg",
            "/path_101/file-03-02.jpg",
        ]);
        assert!(results.iter().all(|result| result.sorted_indices.is_empty()));
    }

    #[test]
    fn split_all_retain_first() {
        let results = split_and_sort(SplitStrategy::RetainFirst, bucket());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].pattern, "/path_101/file-##-02.jpg");
        assert_eq!(results[0].sorted_indices, vec![1, 2, 3]);
        assert_eq!(results[1].pattern, "/path_101/file-01-01.jpg");
        assert_eq!(results[1].sorted_indices, Indices::new());
    }

    #[test]
    fn split_all_retain_last() {
        let results = split_and_sort(SplitStrategy::RetainLast, bucket());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].pattern, "/path_101/file-01-##.jpg");
        assert_eq!(results[0].sorted_indices, vec![1, 2]);
        assert_eq!(results[1].pattern, "/path_101/file-02-02.jpg");
        assert_eq!(results[1].sorted_indices, Indices::new());
        assert_eq!(results[2].pattern, "/path_101/file-03-02.jpg");
        assert_eq!(results[2].sorted_indices, Indices::new());
    }

    #[test]
    fn split_all_retain_highest_variance() {
        let results = split_and_sort(SplitStrategy::RetainHighestVariance, bucket());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].pattern, "/path_101/file-##-02.jpg");
        assert_eq!(results[0].sorted_indices, vec![1, 2, 3]);
        assert_eq!(results[1].pattern, "/path_101/file-01-01.jpg");
        assert_eq!(results[1].sorted_indices, Indices::new());
    }

    #[test]
    fn split_all_bakes_lone_multi_placeholder_files() {
        let mut bucket = Bucket::new("a#b####c");
        bucket.columns = vec![vec![1], vec![2010]];
        let results = split_and_sort(SplitStrategy::RetainHighestVariance, bucket);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pattern, "a1b2010c");
        assert_eq!(results[0].sorted_indices, Indices::new());
    }
}

use ahash::AHashMap;

use crate::item::{Index, Indices, PADDING_CHAR};

use super::normalize::normalize_into;
use super::pattern::{bake_span, placeholders};

/// Groups every index ingested for a particular pattern.
///
/// The pattern is the normalized filename, e.g. `"file##_###.cr#"`. Each
/// placeholder run owns one column; row `i` across all columns is the set of
/// values contributed by the `i`-th filename ingested into this bucket.
///
/// Invariants: either `columns` is empty (unit file, no placeholder left) or
/// every column has the same length, and the number of columns equals the
/// number of placeholder runs in `pattern`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub pattern: String,
    pub columns: Vec<Indices>,
}

impl Bucket {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), columns: Vec::new() }
    }

    /// Append one row of indices, one value per column.
    pub fn ingest(&mut self, row: &[Index]) {
        if self.columns.is_empty() {
            self.columns.resize(row.len(), Indices::new());
        }
        debug_assert_eq!(self.columns.len(), row.len());
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.push(*value);
        }
    }

    /// Whether this bucket holds a single file: columns exist, each of length one.
    pub fn single(&self) -> bool {
        self.columns.first().is_some_and(|column| column.len() == 1)
    }

    /// Whether this bucket still needs splitting: several columns, several rows.
    pub fn splittable(&self) -> bool {
        self.columns.len() > 1 && self.columns[0].len() > 1
    }

    /// Split along the pivot column: one child bucket per distinct pivot value,
    /// with that value baked into the child's pattern (original run width) and
    /// the pivot column dropped.
    pub fn split(&self, pivot: usize, mut push: impl FnMut(Bucket)) {
        debug_assert!(pivot < self.columns.len());
        let spans = placeholders(&self.pattern);
        let mut children: AHashMap<Index, Bucket> = AHashMap::new();
        let mut row = Indices::with_capacity(self.columns.len() - 1);
        for (index, &value) in self.columns[pivot].iter().enumerate() {
            let child = children.entry(value).or_insert_with(|| {
                let mut pattern = self.pattern.clone();
                bake_span(&mut pattern, spans[pivot], value);
                Bucket::new(pattern)
            });
            row.clear();
            for (column, values) in self.columns.iter().enumerate() {
                if column != pivot {
                    row.push(values[index]);
                }
            }
            child.ingest(&row);
        }
        for (_, child) in children {
            push(child);
        }
    }

    /// Push one unit bucket per row, every column baked into its pattern.
    pub fn flatten(&self, mut push: impl FnMut(Bucket)) {
        debug_assert!(!self.columns.is_empty());
        let spans = placeholders(&self.pattern);
        for row in 0..self.columns[0].len() {
            let mut pattern = self.pattern.clone();
            for (column, values) in self.columns.iter().enumerate() {
                bake_span(&mut pattern, spans[column], values[row]);
            }
            push(Bucket::new(pattern));
        }
    }
}

/// Hash-keyed multimap from normalized patterns to their [`Bucket`].
///
/// Two filenames land in the same bucket exactly when their normalized
/// patterns are identical (identical patterns imply an identical placeholder,
/// hence column, count).
#[derive(Debug, Default)]
pub struct Bucketizer {
    buckets: AHashMap<String, Bucket>,
    row    : Indices, // row buffer, reused across ingests
}

impl Bucketizer {
    /// Normalize a filename and append its row to the matching bucket.
    ///
    /// Returns `None` without touching any bucket when the filename cannot
    /// take part in sequence detection: it contains the reserved padding
    /// character, or one of its digit runs overflowed. The caller then emits
    /// the raw name as a plain file.
    pub fn ingest(&mut self, filename: &str) -> Option<&Bucket> {
        if filename.contains(PADDING_CHAR) {
            return None
        }
        let (pattern, overflowed) = normalize_into(filename, &mut self.row);
        if overflowed {
            return None
        }
        let bucket = self.buckets
            .entry(pattern)
            .or_insert_with_key(|pattern| Bucket::new(pattern.clone()));
        bucket.ingest(&self.row);
        Some(bucket)
    }

    /// Drain every bucket out, resetting the bucketizer.
    pub fn transfer(&mut self) -> Vec<Bucket> {
        self.buckets.drain().map(|(_, bucket)| bucket).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_rows() {
        let mut bucketizer = Bucketizer::default();

        let bucket = bucketizer.ingest("p1/numbers1_5.jpg").expect("bucketed");
        assert_eq!(bucket.pattern, "p1/numbers#_#.jpg");
        assert_eq!(bucket.columns, vec![vec![1], vec![5]]);

        let bucket = bucketizer.ingest("p1/numbers1_6.jpg").expect("bucketed");
        assert_eq!(bucket.pattern, "p1/numbers#_#.jpg");
        assert_eq!(bucket.columns, vec![vec![1, 1], vec![5, 6]]);
    }

    #[test]
    fn ingest_rejects_overflows() {
        let mut bucketizer = Bucketizer::default();
        assert!(bucketizer.ingest("numbers4294967296_12.jpg").is_none());
        assert!(bucketizer.transfer().is_empty());
    }

    #[test]
    fn ingest_rejects_reserved_characters() {
        let mut bucketizer = Bucketizer::default();
        assert!(bucketizer.ingest("file#1.png").is_none());
        assert!(bucketizer.transfer().is_empty());
    }

    #[test]
    fn transfer_drains() {
        let mut bucketizer = Bucketizer::default();
        bucketizer.ingest("numbers1_5.jpg");
        bucketizer.ingest("numbers1_6.jpg");

        let buckets = bucketizer.transfer();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].pattern, "numbers#_#.jpg");
        assert_eq!(buckets[0].columns, vec![vec![1, 1], vec![5, 6]]);
        assert!(bucketizer.transfer().is_empty());
    }

    #[test]
    fn single_and_splittable() {
        let mut bucket = Bucket::new("f#_#");
        assert!(!bucket.single());
        assert!(!bucket.splittable());

        bucket.ingest(&[1, 2]);
        assert!(bucket.single());
        assert!(!bucket.splittable());

        bucket.ingest(&[1, 3]);
        assert!(!bucket.single());
        assert!(bucket.splittable());
    }

    #[test]
    fn split_on_a_constant_column() {
        let mut bucket = Bucket::new("/path/file###.cr#");
        bucket.columns = vec![vec![1, 2, 3], vec![2, 2, 2]];

        let mut children = Vec::new();
        bucket.split(1, |child| children.push(child));

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].pattern, "/path/file###.cr2");
        assert_eq!(children[0].columns, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn split_on_a_linear_column() {
        let mut bucket = Bucket::new("/path/file###.cr#");
        bucket.columns = vec![vec![1, 2, 3], vec![2, 2, 2]];

        let mut children = Vec::new();
        bucket.split(0, |child| children.push(child));
        children.sort_by(|a, b| a.pattern.cmp(&b.pattern));

        assert_eq!(children.len(), 3);
        for (child, expected) in children.iter().zip(["001", "002", "003"]) {
            assert_eq!(child.pattern, format!("/path/file{expected}.cr#"));
            assert_eq!(child.columns, vec![vec![2]]);
        }
    }

    #[test]
    fn flatten_bakes_every_row() {
        let mut bucket = Bucket::new("a#b####c");
        bucket.columns = vec![vec![1, 2], vec![2010, 2011]];

        let mut units = Vec::new();
        bucket.flatten(|unit| units.push(unit));
        units.sort_by(|a, b| a.pattern.cmp(&b.pattern));

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].pattern, "a1b2010c");
        assert_eq!(units[1].pattern, "a2b2011c");
        assert!(units.iter().all(|unit| unit.columns.is_empty()));
    }
}

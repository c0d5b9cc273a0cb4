use std::fmt::{self, Display, Formatter};

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A sequence index. Digit runs whose value does not fit are never normalized.
pub type Index = u32;

/// An ordered list of [`Index`].
pub type Indices = Vec<Index>;

/// Reserved character standing for a single digit of a numeric placeholder.
pub const PADDING_CHAR: char = '#';

/// Maximum width of a placeholder run: 4,294,967,295 is 10 characters long.
pub const MAX_PADDING: usize = 10;

/// A collated directory entry.
///
/// - `Single`  : a plain file (or directory), stored verbatim.
/// - `Indiced` : a numbered sequence carrying its explicit index list. `pattern` contains
///               exactly one run of [`PADDING_CHAR`], whose length is `padding`.
///               `padding == 0` flags a padding-merged sequence with varying widths.
/// - `Packed`  : a contiguous range of indices `start..=end` advancing by `step`.
/// - `Invalid` : constructor-failure sentinel.
///
/// The derived ordering is the canonical presentation order: variants rank
/// `Single < Indiced < Packed < Invalid`, ties broken by pattern, then indices
/// (resp. `(start, end, step, padding)`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Item {
    Single  { filename: String },
    Indiced { pattern: String, indices: Indices, padding: u8 },
    Packed  { pattern: String, start: Index, end: Index, step: u8, padding: u8 },
    Invalid,
}

impl Item {
    /// Return the stored filename, or the pattern for sequence variants.
    /// `Invalid` items carry no name and return an empty string.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Single { filename } => filename,
            Self::Indiced { pattern, .. } | Self::Packed { pattern, .. } => pattern,
            Self::Invalid => "",
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Lowercase tag used by the presenters ("single", "indiced", "packed", "invalid").
    #[must_use]
    pub fn type_str(&self) -> &'static str {
        match self {
            Self::Single  { .. } => "single",
            Self::Indiced { .. } => "indiced",
            Self::Packed  { .. } => "packed",
            Self::Invalid        => "invalid",
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { filename } => write!(f, "{filename}"),
            Self::Invalid             => write!(f, "invalid"),
            Self::Indiced { pattern, indices, padding } => {
                write!(f, "{pattern} ({}) {padding}", indices.len())
            },
            Self::Packed { pattern, start, end, step: 1, padding } => {
                write!(f, "{pattern} [{start}:{end}] #{padding}")
            },
            Self::Packed { pattern, start, end, step, padding } => {
                write!(f, "{pattern} [{start}:{end}]/{step} #{padding}")
            },
        }
    }
}

impl Serialize for Item {
    /// Serialize into the canonical presenter object: `{type, filename, padding?,
    /// indices? | start, end, step?}`. Sequence variants expose their pattern
    /// under the `filename` key.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single { filename } => {
                let mut state = serializer.serialize_struct("Item", 2)?;
                state.serialize_field("type", self.type_str())?;
                state.serialize_field("filename", filename)?;
                state.end()
            },
            Self::Indiced { pattern, indices, padding } => {
                let mut state = serializer.serialize_struct("Item", 4)?;
                state.serialize_field("type", self.type_str())?;
                state.serialize_field("filename", pattern)?;
                state.serialize_field("padding", padding)?;
                state.serialize_field("indices", indices)?;
                state.end()
            },
            Self::Packed { pattern, start, end, step, padding } => {
                let mut state = serializer.serialize_struct("Item", 6)?;
                state.serialize_field("type", self.type_str())?;
                state.serialize_field("filename", pattern)?;
                state.serialize_field("padding", padding)?;
                state.serialize_field("start", start)?;
                state.serialize_field("end", end)?;
                state.serialize_field("step", step)?;
                state.end()
            },
            Self::Invalid => {
                let mut state = serializer.serialize_struct("Item", 1)?;
                state.serialize_field("type", self.type_str())?;
                state.end()
            },
        }
    }
}

/// The parsed contents of a single folder. Directories always carry `Single` items.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FolderContent {
    #[serde(rename = "path")]
    pub name       : String,
    pub directories: Vec<Item>,
    pub files      : Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(filename: &str) -> Item {
        Item::Single { filename: filename.to_string() }
    }

    #[test]
    fn filenames() {
        assert_eq!(single("file").filename(), "file");
        assert_eq!(Item::Invalid.filename(), "");
        let item = Item::Indiced { pattern: "f#.jpg".to_string(), indices: vec![1], padding: 1 };
        assert_eq!(item.filename(), "f#.jpg");
    }

    #[test]
    fn canonical_order_ranks_variants() {
        let mut items = vec![
            Item::Invalid,
            Item::Packed { pattern: "f#".to_string(), start: 0, end: 1, step: 1, padding: 1 },
            Item::Indiced { pattern: "f#".to_string(), indices: vec![0, 1], padding: 1 },
            single("zz"),
        ];
        items.sort();
        assert_eq!(items[0], single("zz"));
        assert!(matches!(items[1], Item::Indiced { .. }));
        assert!(matches!(items[2], Item::Packed  { .. }));
        assert_eq!(items[3], Item::Invalid);
    }

    #[test]
    fn canonical_order_ties_on_pattern_then_fields() {
        let a = Item::Packed { pattern: "f#".to_string(), start: 0, end: 4, step: 1, padding: 1 };
        let b = Item::Packed { pattern: "f#".to_string(), start: 6, end: 9, step: 1, padding: 1 };
        let c = Item::Packed { pattern: "g#".to_string(), start: 0, end: 1, step: 1, padding: 1 };
        assert!(a < b && b < c);
    }

    #[test]
    fn display_formats() {
        assert_eq!(single("file.jpg").to_string(), "file.jpg");
        assert_eq!(Item::Invalid.to_string(), "invalid");

        let indiced = Item::Indiced { pattern: "f#.jpg".to_string(), indices: vec![1, 2], padding: 1 };
        assert_eq!(indiced.to_string(), "f#.jpg (2) 1");

        let packed = Item::Packed { pattern: "f##.jpg".to_string(), start: 2, end: 4, step: 1, padding: 2 };
        assert_eq!(packed.to_string(), "f##.jpg [2:4] #2");

        let stepped = Item::Packed { pattern: "f##.jpg".to_string(), start: 1, end: 7, step: 2, padding: 2 };
        assert_eq!(stepped.to_string(), "f##.jpg [1:7]/2 #2");
    }
}

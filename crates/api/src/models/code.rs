use serde::{Deserialize, Serialize};

/// Opaque handle for a position in a method body.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// Expanded frame, as produced when frames are decompressed.
    New,
    Full,
    Append,
    Chop,
    Same,
    Same1,
}

/// A verification type in a stack map frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FrameItem {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,
    /// Internal name of a reference type.
    Object(String),
    /// Value created by the `NEW` instruction at `Label`.
    Uninitialized(Label),
}

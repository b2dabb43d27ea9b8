use serde::{Deserialize, Serialize};

/// A constant carried by a field's `ConstantValue`, an `ldc` instruction or
/// an annotation element.
///
/// Only [`Value::Type`] holds a symbolic reference; every other variant is a
/// plain literal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Byte(i8),
    Boolean(bool),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A class literal, as a type descriptor (`La/B;`, `[I`).
    Type(String),
}

impl Value {
    pub fn is_type(&self) -> bool {
        matches!(self, Value::Type(_))
    }
}

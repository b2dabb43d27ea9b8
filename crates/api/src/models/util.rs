//! Serde adapters for the class-file access flag types, which only expose
//! their raw bit words.

use ristretto_classfile::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use serde::{Deserialize, Deserializer, Serializer};

pub mod serde_class_access {
    use super::*;

    pub fn serialize<S>(flags: &ClassAccessFlags, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(flags.bits())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ClassAccessFlags, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(ClassAccessFlags::from_bits_retain(bits))
    }
}

pub mod serde_field_access {
    use super::*;

    pub fn serialize<S>(flags: &FieldAccessFlags, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(flags.bits())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<FieldAccessFlags, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(FieldAccessFlags::from_bits_retain(bits))
    }
}

pub mod serde_method_access {
    use super::*;

    pub fn serialize<S>(flags: &MethodAccessFlags, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(flags.bits())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<MethodAccessFlags, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(MethodAccessFlags::from_bits_retain(bits))
    }
}

use super::util::{serde_class_access, serde_field_access, serde_method_access};
use super::value::Value;
use ristretto_classfile::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use serde::{Deserialize, Serialize};

/// The header event of a class traversal.
///
/// `name` identifies the class for the whole traversal. `super_name` is only
/// absent for `java/lang/Object`, and `interfaces` keeps the distinction
/// between "no interfaces attribute" and "an empty list".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassHeader {
    /// Raw class-file version word: `major | minor << 16`.
    pub version: u32,
    #[serde(with = "serde_class_access")]
    pub access: ClassAccessFlags,
    pub name: String,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    #[serde(with = "serde_field_access")]
    pub access: FieldAccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub value: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    #[serde(with = "serde_method_access")]
    pub access: MethodAccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub exceptions: Option<Vec<String>>,
}

/// One entry of the `InnerClasses` attribute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InnerClassLink {
    pub name: String,
    pub outer_name: Option<String>,
    /// Simple (unqualified) name; absent for anonymous classes.
    pub inner_name: Option<String>,
    /// Raw `inner_class_access_flags` word. It carries `PRIVATE`/`STATIC`
    /// bits that top-level class flags cannot express.
    pub access: u16,
}

/// The `EnclosingMethod` attribute of a local or anonymous class.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OuterClassLink {
    pub owner: String,
    pub name: Option<String>,
    pub descriptor: Option<String>,
}

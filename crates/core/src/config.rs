//! Mapping files.
//!
//! ```json
//! {
//!   "classes": { "a/B": "x/Y" },
//!   "fields": [{ "owner": "a/B", "name": "f", "descriptor": "La/B;", "to": "g" }],
//!   "methods": [{ "owner": "a/B", "name": "run", "to": "execute" }],
//!   "strict_packages": ["a/"]
//! }
//! ```
//!
//! All names are in internal form (`a/B`, not `a.B`) and refer to the
//! original, pre-remapping identifiers. A member entry without `descriptor`
//! applies to every overload.

use crate::error::{ClassmapError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    /// Original internal class name to new internal class name.
    pub classes: BTreeMap<String, String>,
    pub fields: Vec<MemberMapping>,
    pub methods: Vec<MemberMapping>,
    /// Package prefixes whose classes must all be mapped. Looking up an
    /// unmapped class under one of them is an error.
    pub strict_packages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MemberMapping {
    pub owner: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    pub to: String,
}

impl MappingConfig {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading mapping file {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: MappingConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (from, to) in &self.classes {
            check_internal_name("class", from)?;
            check_internal_name("class", to)?;
        }
        for (kind, members) in [("field", &self.fields), ("method", &self.methods)] {
            for member in members {
                check_internal_name(kind, &member.owner)?;
                if member.name.is_empty() || member.to.is_empty() {
                    return Err(ClassmapError::InvalidMapping(format!(
                        "{} mapping on {} has an empty name",
                        kind, member.owner
                    )));
                }
                if member.descriptor.as_deref() == Some("") {
                    return Err(ClassmapError::InvalidMapping(format!(
                        "{} mapping {}.{} has an empty descriptor",
                        kind, member.owner, member.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }
}

fn check_internal_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ClassmapError::InvalidMapping(format!("empty {} name", kind)));
    }
    if name.contains('.') || name.contains(';') {
        return Err(ClassmapError::InvalidMapping(format!(
            "{} name `{}` is not in internal form (use `a/B`)",
            kind, name
        )));
    }
    Ok(())
}

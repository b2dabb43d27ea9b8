use super::Remapper;
use crate::config::MappingConfig;
use classmap_api::{VisitError, VisitResult};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemberKey {
    owner: String,
    name: String,
    /// `None` matches every descriptor.
    descriptor: Option<String>,
}

/// Table-driven [`Remapper`].
///
/// Member lookups try the exact `(owner, name, descriptor)` entry first and
/// fall back to the descriptor-less entry for `(owner, name)`.
#[derive(Debug, Clone, Default)]
pub struct SimpleRemapper {
    classes: HashMap<String, String>,
    fields: HashMap<MemberKey, String>,
    methods: HashMap<MemberKey, String>,
    strict_packages: Vec<String>,
}

impl SimpleRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MappingConfig) -> Self {
        let mut remapper = Self::new();
        for (from, to) in &config.classes {
            remapper = remapper.with_class(from, to);
        }
        for field in &config.fields {
            remapper = remapper.with_field(
                &field.owner,
                &field.name,
                field.descriptor.as_deref(),
                &field.to,
            );
        }
        for method in &config.methods {
            remapper = remapper.with_method(
                &method.owner,
                &method.name,
                method.descriptor.as_deref(),
                &method.to,
            );
        }
        remapper.strict_packages = config.strict_packages.clone();
        remapper
    }

    pub fn with_class(mut self, from: &str, to: &str) -> Self {
        self.classes.insert(from.to_string(), to.to_string());
        self
    }

    pub fn with_field(
        mut self,
        owner: &str,
        name: &str,
        descriptor: Option<&str>,
        to: &str,
    ) -> Self {
        self.fields.insert(MemberKey::new(owner, name, descriptor), to.to_string());
        self
    }

    pub fn with_method(
        mut self,
        owner: &str,
        name: &str,
        descriptor: Option<&str>,
        to: &str,
    ) -> Self {
        self.methods.insert(MemberKey::new(owner, name, descriptor), to.to_string());
        self
    }

    pub fn with_strict_package(mut self, prefix: &str) -> Self {
        self.strict_packages.push(prefix.to_string());
        self
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    fn lookup_member<'a>(
        table: &'a HashMap<MemberKey, String>,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Option<&'a String> {
        // An empty descriptor means the caller had none; only name-only
        // entries apply.
        let exact = match descriptor {
            "" => None,
            descriptor => table.get(&MemberKey::new(owner, name, Some(descriptor))),
        };
        exact.or_else(|| table.get(&MemberKey::new(owner, name, None)))
    }
}

impl MemberKey {
    fn new(owner: &str, name: &str, descriptor: Option<&str>) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.map(str::to_string),
        }
    }
}

impl Remapper for SimpleRemapper {
    fn map(&self, internal_name: &str) -> VisitResult<Option<String>> {
        if let Some(mapped) = self.classes.get(internal_name) {
            return Ok(Some(mapped.clone()));
        }
        if self
            .strict_packages
            .iter()
            .any(|prefix| internal_name.starts_with(prefix.as_str()))
        {
            return Err(VisitError::Unmapped(internal_name.to_string()));
        }
        Ok(None)
    }

    fn map_field_name(&self, owner: &str, name: &str, descriptor: &str) -> VisitResult<String> {
        Ok(Self::lookup_member(&self.fields, owner, name, descriptor)
            .cloned()
            .unwrap_or_else(|| name.to_string()))
    }

    fn map_method_name(&self, owner: &str, name: &str, descriptor: &str) -> VisitResult<String> {
        Ok(Self::lookup_member(&self.methods, owner, name, descriptor)
            .cloned()
            .unwrap_or_else(|| name.to_string()))
    }
}

//! Identifier mapping policies.
//!
//! A [`Remapper`] only has to answer [`Remapper::map`] (and optionally the
//! member-name lookups); descriptors, generic signatures and constant values
//! are rewritten by the provided methods on top of those answers.

mod descriptor;
mod signature;
mod simple;

pub use simple::SimpleRemapper;

use classmap_api::{Value, VisitResult};

pub trait Remapper {
    /// Looks up the new internal name of a class. `None` keeps the name.
    fn map(&self, _internal_name: &str) -> VisitResult<Option<String>> {
        Ok(None)
    }

    /// Maps a field name, keyed by the field's original owner and descriptor.
    fn map_field_name(&self, _owner: &str, name: &str, _descriptor: &str) -> VisitResult<String> {
        Ok(name.to_string())
    }

    /// Maps a method name, keyed by the method's original owner and descriptor.
    fn map_method_name(&self, _owner: &str, name: &str, _descriptor: &str) -> VisitResult<String> {
        Ok(name.to_string())
    }

    /// Maps a type name as it appears in class references.
    ///
    /// Array types (`[La/B;`) and descriptor-shaped names (`La/B;`) go
    /// through [`Remapper::map_desc`]; `;` cannot occur in an internal name,
    /// so the two forms never collide.
    fn map_type(&self, type_name: &str) -> VisitResult<String> {
        if type_name.starts_with('[') || (type_name.starts_with('L') && type_name.ends_with(';')) {
            return self.map_desc(type_name);
        }
        Ok(self
            .map(type_name)?
            .unwrap_or_else(|| type_name.to_string()))
    }

    fn map_types(&self, type_names: &[String]) -> VisitResult<Vec<String>> {
        type_names.iter().map(|name| self.map_type(name)).collect()
    }

    /// Maps a field type descriptor.
    fn map_desc(&self, descriptor: &str) -> VisitResult<String> {
        let field_type = descriptor::parse_field(descriptor)?;
        let mapped = descriptor::remap_field_type(self, field_type)?;
        Ok(mapped.descriptor())
    }

    /// Maps a method descriptor, parameter and return types alike.
    fn map_method_desc(&self, descriptor: &str) -> VisitResult<String> {
        let (parameters, return_type) = descriptor::parse_method(descriptor)?;
        let parameters = parameters
            .into_iter()
            .map(|ty| descriptor::remap_field_type(self, ty))
            .collect::<VisitResult<Vec<_>>>()?;
        let return_type = return_type
            .map(|ty| descriptor::remap_field_type(self, ty))
            .transpose()?;
        Ok(descriptor::method_descriptor(&parameters, return_type.as_ref()))
    }

    /// Maps a generic signature. `is_field` selects the type-signature
    /// grammar (fields, local variables) over the class/method one.
    fn map_signature(
        &self,
        signature: Option<&str>,
        is_field: bool,
    ) -> VisitResult<Option<String>> {
        signature
            .map(|signature| signature::remap(self, signature, is_field))
            .transpose()
    }

    /// Maps a constant. Only type literals carry a name to rewrite.
    fn map_value(&self, value: &Value) -> VisitResult<Value> {
        match value {
            Value::Type(descriptor) => Ok(Value::Type(self.map_desc(descriptor)?)),
            other => Ok(other.clone()),
        }
    }
}

impl<R: Remapper + ?Sized> Remapper for &R {
    fn map(&self, internal_name: &str) -> VisitResult<Option<String>> {
        (**self).map(internal_name)
    }

    fn map_field_name(&self, owner: &str, name: &str, descriptor: &str) -> VisitResult<String> {
        (**self).map_field_name(owner, name, descriptor)
    }

    fn map_method_name(&self, owner: &str, name: &str, descriptor: &str) -> VisitResult<String> {
        (**self).map_method_name(owner, name, descriptor)
    }

    fn map_type(&self, type_name: &str) -> VisitResult<String> {
        (**self).map_type(type_name)
    }

    fn map_types(&self, type_names: &[String]) -> VisitResult<Vec<String>> {
        (**self).map_types(type_names)
    }

    fn map_desc(&self, descriptor: &str) -> VisitResult<String> {
        (**self).map_desc(descriptor)
    }

    fn map_method_desc(&self, descriptor: &str) -> VisitResult<String> {
        (**self).map_method_desc(descriptor)
    }

    fn map_signature(
        &self,
        signature: Option<&str>,
        is_field: bool,
    ) -> VisitResult<Option<String>> {
        (**self).map_signature(signature, is_field)
    }

    fn map_value(&self, value: &Value) -> VisitResult<Value> {
        (**self).map_value(value)
    }
}

/// Maps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRemapper;

impl Remapper for IdentityRemapper {}

use super::Remapper;
use classmap_api::{VisitError, VisitResult};
use ristretto_classfile::FieldType;

pub(super) fn parse_field(descriptor: &str) -> VisitResult<FieldType> {
    FieldType::parse(descriptor)
        .map_err(|e| VisitError::malformed_descriptor(descriptor, e.to_string()))
}

pub(super) fn parse_method(descriptor: &str) -> VisitResult<(Vec<FieldType>, Option<FieldType>)> {
    FieldType::parse_method_descriptor(descriptor)
        .map_err(|e| VisitError::malformed_descriptor(descriptor, e.to_string()))
}

pub(super) fn remap_field_type<R: Remapper + ?Sized>(
    remapper: &R,
    field_type: FieldType,
) -> VisitResult<FieldType> {
    Ok(match field_type {
        FieldType::Object(name) => FieldType::Object(remapper.map_type(&name)?),
        FieldType::Array(component) => {
            FieldType::Array(Box::new(remap_field_type(remapper, *component)?))
        }
        base => base,
    })
}

/// A method descriptor from its parts; no return type renders as `V`.
pub(super) fn method_descriptor(
    parameters: &[FieldType],
    return_type: Option<&FieldType>,
) -> String {
    let parameters: String = parameters.iter().map(FieldType::descriptor).collect();
    let return_type = return_type.map_or_else(|| "V".to_string(), FieldType::descriptor);
    format!("({parameters}){return_type}")
}

use classmap_core::{MappingConfig, Remapper, SimpleRemapper};
use std::path::Path;

pub enum Lookup {
    Type(String),
    Desc(String),
    MethodDesc(String),
    Signature {
        value: String,
        field: bool,
    },
    Field {
        owner: String,
        name: String,
        descriptor: String,
    },
    Method {
        owner: String,
        name: String,
        descriptor: String,
    },
}

impl Lookup {
    pub fn resolve(&self, remapper: &dyn Remapper) -> classmap_api::VisitResult<String> {
        match self {
            Lookup::Type(value) => remapper.map_type(value),
            Lookup::Desc(value) => remapper.map_desc(value),
            Lookup::MethodDesc(value) => remapper.map_method_desc(value),
            Lookup::Signature { value, field } => Ok(remapper
                .map_signature(Some(value.as_str()), *field)?
                .unwrap_or_default()),
            Lookup::Field {
                owner,
                name,
                descriptor,
            } => remapper.map_field_name(owner, name, descriptor),
            Lookup::Method {
                owner,
                name,
                descriptor,
            } => remapper.map_method_name(owner, name, descriptor),
        }
    }
}

pub fn run(mapping: &Path, lookup: Lookup) -> Result<(), Box<dyn std::error::Error>> {
    let config = MappingConfig::load(mapping)?;
    let remapper = SimpleRemapper::from_config(&config);
    println!("{}", lookup.resolve(&remapper)?);
    Ok(())
}

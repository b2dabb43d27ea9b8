use classmap_core::{MappingConfig, SimpleRemapper};
use std::path::Path;
use tracing::info;

pub fn run(mapping: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = MappingConfig::load(mapping)?;
    let remapper = SimpleRemapper::from_config(&config);

    info!("Mapping file {} is valid", mapping.display());
    println!("classes: {}", remapper.class_count());
    println!("fields:  {}", remapper.field_count());
    println!("methods: {}", remapper.method_count());
    if !config.strict_packages.is_empty() {
        println!("strict:  {}", config.strict_packages.join(", "));
    }
    Ok(())
}

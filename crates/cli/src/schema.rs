use classmap_core::MappingConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(MappingConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

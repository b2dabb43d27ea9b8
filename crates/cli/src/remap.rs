use classmap_core::recording::ClassEvent;
use classmap_core::{ClassRemapper, MappingConfig, Recorder, SimpleRemapper, replay};
use std::path::Path;
use tracing::info;

pub fn run(
    mapping: &Path,
    events: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = MappingConfig::load(mapping)?;
    let remapper = SimpleRemapper::from_config(&config);

    let content = std::fs::read_to_string(events)?;
    let recorded: Vec<ClassEvent> = serde_json::from_str(&content)?;
    info!(
        "Remapping {} events from {}",
        recorded.len(),
        events.display()
    );

    let remapped = remap_events(&recorded, remapper)?;
    let json = serde_json::to_string_pretty(&remapped)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Wrote remapped events to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn remap_events(
    events: &[ClassEvent],
    remapper: SimpleRemapper,
) -> classmap_core::Result<Vec<ClassEvent>> {
    let mut adapter = ClassRemapper::new(Recorder::new(), remapper);
    replay(events, &mut adapter)?;
    Ok(adapter.into_inner().into_events())
}

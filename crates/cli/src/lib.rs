mod check;
mod lookup;
mod remap;
mod schema;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "classmap",
    version,
    about = "Remap class, field and method identifiers in class-structure event streams",
    long_about = "classmap applies a JSON mapping file to the identifiers of compiled classes: \
                  type names, member names, descriptors and generic signatures. The subcommands \
                  help authoring and checking mapping files and remap recorded traversals."
)]
pub struct Cli {
    /// Log remapping decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a mapping file and summarize it
    Check {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
    },
    /// Remap an internal type name (array types and descriptors are accepted too)
    Type {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        #[arg(value_name = "TYPE")]
        value: String,
    },
    /// Remap a field type descriptor
    Desc {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        #[arg(value_name = "DESCRIPTOR")]
        value: String,
    },
    /// Remap a method descriptor
    MethodDesc {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        #[arg(value_name = "DESCRIPTOR")]
        value: String,
    },
    /// Remap a generic signature
    Signature {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        #[arg(value_name = "SIGNATURE")]
        value: String,
        /// Parse as a field/local variable type signature
        #[arg(long)]
        field: bool,
    },
    /// Remap a field name
    Field {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        owner: String,
        name: String,
        descriptor: String,
    },
    /// Remap a method name
    Method {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        owner: String,
        name: String,
        descriptor: String,
    },
    /// Remap a recorded class traversal (JSON event list)
    #[command(
        long_about = "Reads a JSON array of class events, drives it through the remapping \
                            adapter and writes the remapped events as JSON."
    )]
    Remap {
        #[arg(value_name = "MAPPING")]
        mapping: PathBuf,
        #[arg(value_name = "EVENTS")]
        events: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON schema of mapping files
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = classmap_core::logging::init_logging("cli", true, cli.verbose);

    match cli.command {
        Commands::Check { mapping } => check::run(&mapping),
        Commands::Type { mapping, value } => lookup::run(&mapping, lookup::Lookup::Type(value)),
        Commands::Desc { mapping, value } => lookup::run(&mapping, lookup::Lookup::Desc(value)),
        Commands::MethodDesc { mapping, value } => {
            lookup::run(&mapping, lookup::Lookup::MethodDesc(value))
        }
        Commands::Signature {
            mapping,
            value,
            field,
        } => lookup::run(&mapping, lookup::Lookup::Signature { value, field }),
        Commands::Field {
            mapping,
            owner,
            name,
            descriptor,
        } => lookup::run(
            &mapping,
            lookup::Lookup::Field {
                owner,
                name,
                descriptor,
            },
        ),
        Commands::Method {
            mapping,
            owner,
            name,
            descriptor,
        } => lookup::run(
            &mapping,
            lookup::Lookup::Method {
                owner,
                name,
                descriptor,
            },
        ),
        Commands::Remap {
            mapping,
            events,
            output,
        } => remap::run(&mapping, &events, output.as_deref()),
        Commands::Schema => schema::run(),
    }
}

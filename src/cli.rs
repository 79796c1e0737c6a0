use cabinetkit_layout::{ConstructionType, Section, SectionType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CabinetKit - cabinet opening layout engine
#[derive(Parser, Debug)]
#[command(name = "cabinetkit")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Settings file (.toml or .json); defaults to the user config directory
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Resolve the usable opening(s) of a cabinet
    Resolve(ResolveArgs),

    /// Replay a JSON layout script and print the resulting opening
    Layout {
        /// Layout script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// List the auto-arrange strategies
    Strategies,

    /// Print the effective settings as TOML
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Parser)]
pub(crate) struct ResolveArgs {
    /// Cabinet outer width, e.g. '36' or '35 1/2'
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) width: String,

    /// Cabinet outer height, e.g. '30' or '30-3/4'
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) height: String,

    /// Construction type (face_frame or frameless); defaults to settings
    #[arg(long, value_name = "TYPE")]
    pub(crate) construction: Option<ConstructionType>,

    /// Face frame stile width
    #[arg(long)]
    pub(crate) stile: Option<String>,

    /// Face frame rail width
    #[arg(long)]
    pub(crate) rail: Option<String>,

    /// Frameless margin per side, as a fraction (e.g. 0.02)
    #[arg(long)]
    pub(crate) margin: Option<f64>,

    /// Sections left to right, e.g. 'Left:door:0.5,Right:drawer:0.5'
    #[arg(long, value_parser = parse_section, value_delimiter = ',')]
    pub(crate) sections: Vec<Section>,

    /// Scale section ratios to sum to one instead of rejecting them
    #[arg(long)]
    pub(crate) normalize: bool,

    /// Include the face frame cut list
    #[arg(long)]
    pub(crate) cut_list: bool,

    /// JSON output
    #[arg(long)]
    pub(crate) json: bool,
}

/// Parse `name:type:ratio`
fn parse_section(input: &str) -> Result<Section, String> {
    let parts: Vec<&str> = input.split(':').map(str::trim).collect();
    let [name, section_type, ratio] = parts.as_slice() else {
        return Err(format!("expected name:type:ratio, got '{}'", input));
    };
    if name.is_empty() {
        return Err("section name is empty".to_string());
    }
    let section_type: SectionType = section_type.parse()?;
    let ratio: f64 = ratio
        .parse()
        .map_err(|_| format!("invalid ratio '{}'", ratio))?;
    Ok(Section::new(*name, section_type, ratio))
}

mod cli;

use anyhow::{bail, Context, Result};
use cabinetkit::{init_logging, run_script, LayoutScript, BUILD_DATE, VERSION};
use cabinetkit_core::units::{format_length, parse_length, to_fraction};
use cabinetkit_core::MeasurementSystem;
use cabinetkit_layout::{
    face_frame_cut_list, normalize_ratios, resolve_opening, resolve_sections, Construction,
    ConstructionType, FramePart, OpeningSize, SectionOpening,
};
use cabinetkit_settings::Config;
use clap::Parser;
use cli::{Cli, Command, ResolveArgs};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    debug!(version = VERSION, build_date = BUILD_DATE, "Starting cabinetkit");

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading settings from {}", config_path.display()))?;

    match cli.command {
        Command::Resolve(args) => resolve(&args, &config),
        Command::Layout { script, compact } => layout(script, compact, &config),
        Command::Strategies => {
            let default = &config.arrange.default_strategy;
            for (name, label) in config.registry().catalog() {
                let marker = if &name == default { " (default)" } else { "" };
                println!("{:<24}{}{}", name, label, marker);
            }
            Ok(())
        }
        Command::Config { init } => {
            if init {
                config.save_to_file(&config_path)?;
                eprintln!("Wrote {}", config_path.display());
            }
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ResolveOutput {
    construction: Construction,
    opening: OpeningSize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sections: Vec<SectionOpening>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cut_list: Vec<FramePart>,
}

fn resolve(args: &ResolveArgs, config: &Config) -> Result<()> {
    let system = config.display.measurement_system;
    let length = |name: &str, input: &str| -> Result<f64> {
        parse_length(input, system)
            .map_err(|e| anyhow::anyhow!("invalid {} '{}': {}", name, input, e))
    };

    let width = length("width", &args.width)?;
    let height = length("height", &args.height)?;

    let mut frame = config.frame;
    if let Some(construction) = args.construction {
        frame.construction = construction;
    }
    if let Some(stile) = &args.stile {
        frame.stile_width = length("stile", stile)?;
    }
    if let Some(rail) = &args.rail {
        frame.rail_width = length("rail", rail)?;
    }
    if let Some(margin) = args.margin {
        frame.frameless_margin = margin;
    }
    let construction = frame.construction();

    let opening = resolve_opening(width, height, &construction)?;

    let mut sections = args.sections.clone();
    if args.normalize {
        normalize_ratios(&mut sections);
    }
    let sections = resolve_sections(width, height, &construction, &sections)?;

    let cut_list = if args.cut_list {
        if frame.construction != ConstructionType::FaceFrame {
            bail!("a cut list needs face frame construction");
        }
        let count = u32::try_from(sections.len().max(1))?;
        face_frame_cut_list(width, height, frame.stile_width, frame.rail_width, count)?
    } else {
        Vec::new()
    };

    let output = ResolveOutput {
        construction,
        opening,
        sections,
        cut_list,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let len = |inches: f64| show_length(inches, config);
    println!(
        "{} cabinet {} x {}",
        construction.construction_type(),
        len(width),
        len(height)
    );
    println!("Opening: {} x {}", len(opening.width), len(opening.height));
    if !output.sections.is_empty() {
        println!("Sections:");
        for section in &output.sections {
            println!(
                "  {} ({}): {} wide at {}, {} high",
                section.name,
                section.section_type,
                len(section.width),
                len(section.offset_x),
                len(section.height)
            );
        }
    }
    if !output.cut_list.is_empty() {
        println!("Cut list:");
        for part in &output.cut_list {
            println!(
                "  {} x{}: {} x {}",
                part.part,
                part.quantity,
                len(part.width),
                len(part.length)
            );
        }
    }
    Ok(())
}

fn layout(script: PathBuf, compact: bool, config: &Config) -> Result<()> {
    let script = LayoutScript::from_file(&script)
        .with_context(|| format!("reading layout script {}", script.display()))?;
    let output = run_script(&script, config)?;

    let json = if compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", json);

    if !output.view.is_valid {
        eprintln!("{}", output.summary);
    }
    Ok(())
}

fn show_length(inches: f64, config: &Config) -> String {
    match config.display.measurement_system {
        MeasurementSystem::Imperial => {
            format!("{}\"", to_fraction(inches, config.display.fraction_precision))
        }
        MeasurementSystem::Metric => {
            format!("{} mm", format_length(inches, MeasurementSystem::Metric))
        }
    }
}

//! mask2coco: turn per-image object masks into a COCO dataset.
//!
//! Source databases yield RGB images, each with an ordered list of binary
//! object masks labelled by category name. Every mask is turned into a
//! polygon annotation (area, bounding box, boundary rings), filtered by
//! minimum-size thresholds, and numbered. Images that keep at least one
//! annotation are re-encoded as `images/00000.png`, `images/00001.png`, ...
//! and described, together with their annotations, in one COCO JSON file.
//!
//! # Modules
//!
//! - [`ir`]: COCO document records, binary masks, category table, writer
//! - [`geometry`]: run-length encoding, area, bounding box, polygons
//! - [`validation`]: annotation admission thresholds
//! - [`annotation`]: mask → annotation record
//! - [`aggregate`]: id assignment across databases
//! - [`source`]: the source-database trait and file-backed sources
//! - [`conversion`]: the end-to-end run and its report
//! - [`config`]: run configuration
//! - [`error`]: error types

pub mod aggregate;
pub mod annotation;
pub mod config;
pub mod conversion;
pub mod error;
pub mod geometry;
pub mod ir;
pub mod source;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use config::{FormatterConfig, InvalidMaskPolicy};
pub use conversion::{convert, ConversionReport};
pub use error::Mask2CocoError;
pub use source::{DirectoryDatabase, ImageEntry, InMemoryDatabase, ManifestDatabase, MaskAnnotation, SourceDatabase};

use crate::ir::{Category, CategoryId};

/// The mask2coco CLI application.
#[derive(Parser)]
#[command(name = "mask2coco")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert source databases into a COCO dataset.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Configuration file (YAML or JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON manifest source; repeat to process several, in order.
    #[arg(long = "manifest")]
    manifests: Vec<PathBuf>,

    /// Scene-folder source; processed after all manifests, in order.
    #[arg(long = "scene-dir")]
    scene_dirs: Vec<PathBuf>,

    /// Extra category as NAME=ID; appended to the configured list.
    #[arg(long = "category", value_parser = parse_category)]
    categories: Vec<Category>,

    /// Output document base name (overrides the config).
    #[arg(long, env = "MASK2COCO_DB_NAME")]
    db_name: Option<String>,

    /// Output root folder (overrides the config).
    #[arg(long, env = "MASK2COCO_BASE_FOLDER")]
    base_folder: Option<PathBuf>,

    /// Minimum annotation area.
    #[arg(long)]
    area_threshold: Option<f64>,

    /// Minimum bounding-box width.
    #[arg(long)]
    min_box_width: Option<f64>,

    /// Minimum bounding-box height.
    #[arg(long)]
    min_box_height: Option<f64>,

    /// Abort on a mask that does not fit its image instead of skipping it.
    #[arg(long)]
    abort_on_invalid_mask: bool,

    /// Indent the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn parse_category(s: &str) -> Result<Category, String> {
    let (name, id) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=ID, got '{}'", s))?;
    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| format!("category id '{}' is not a non-negative integer", id))?;
    if name.trim().is_empty() {
        return Err("category name must not be empty".to_string());
    }
    Ok(Category::new(CategoryId::new(id), name.trim()))
}

/// Run the mask2coco CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Mask2CocoError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("mask2coco {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert object masks into a COCO dataset.");
            println!();
            println!("Run 'mask2coco --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), Mask2CocoError> {
    let mut config = match &args.config {
        Some(path) => FormatterConfig::load(path)?,
        None => FormatterConfig::default(),
    };

    if let Some(db_name) = args.db_name {
        config.db_name = db_name;
    }
    if let Some(base_folder) = args.base_folder {
        config.base_folder = base_folder;
    }
    if let Some(v) = args.area_threshold {
        config.area_threshold = v;
    }
    if let Some(v) = args.min_box_width {
        config.min_box_width = v;
    }
    if let Some(v) = args.min_box_height {
        config.min_box_height = v;
    }
    if args.abort_on_invalid_mask {
        config.invalid_mask_policy = InvalidMaskPolicy::Abort;
    }
    if args.pretty {
        config.pretty = true;
    }
    config.categories.extend(args.categories);

    // Fail on a bad configuration before opening any source.
    config.validate()?;

    let mut databases: Vec<Box<dyn SourceDatabase>> = Vec::new();
    for path in &args.manifests {
        databases.push(Box::new(ManifestDatabase::open(path)?));
    }
    for path in &args.scene_dirs {
        databases.push(Box::new(DirectoryDatabase::open(path)?));
    }
    let refs: Vec<&dyn SourceDatabase> = databases.iter().map(|db| db.as_ref()).collect();

    let report = convert(&config, &refs)?;
    print!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        let cat = parse_category("shoe=3").expect("parse");
        assert_eq!(cat.name, "shoe");
        assert_eq!(cat.id, CategoryId(3));
        assert!(parse_category("shoe").is_err());
        assert!(parse_category("=3").is_err());
        assert!(parse_category("shoe=x").is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

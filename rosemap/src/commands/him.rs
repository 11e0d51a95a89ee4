//! HIM heightmap command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use prettytable::row;
use std::path::{Path, PathBuf};

use rose_him::{
    HIM_GRID_SIZE, HeightBounds, Heightmap, HimParser, QuadrantLayout, TerrainBounds,
    compute_bounds,
};

use crate::commands::write_json;
use crate::utils::{create_table, format_bytes, format_meters};

#[derive(Subcommand)]
pub enum HimCommands {
    /// Display information about a HIM file
    Info {
        /// Path to the HIM file
        file: PathBuf,
    },

    /// Rewrite a HIM file, recomputing its bounding heights
    Rebuild {
        /// Path to the input HIM file
        input: PathBuf,

        /// Path to write the rebuilt HIM file
        output: PathBuf,

        /// Fill the 85 quadrants as a quad tree over the patch grid
        #[arg(long)]
        quad_tree: bool,
    },

    /// Export a HIM file as JSON
    Export {
        /// Path to the HIM file
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: HimCommands) -> Result<()> {
    match command {
        HimCommands::Info { file } => execute_info(&file),
        HimCommands::Rebuild {
            input,
            output,
            quad_tree,
        } => execute_rebuild(&input, &output, quad_tree),
        HimCommands::Export { file, output } => {
            let heightmap = load(&file)?;
            write_json(&heightmap, output.as_deref())
        }
    }
}

fn load(path: &Path) -> Result<Heightmap> {
    Heightmap::load(path)
        .with_context(|| format!("Failed to open HIM file: {}", path.display()))
}

fn span(bounds: &[HeightBounds]) -> Option<(f32, f32)> {
    bounds.iter().fold(None, |range, b| {
        let (lo, hi) = range.unwrap_or((b.minimum_height, b.maximum_height));
        Some((lo.min(b.minimum_height), hi.max(b.maximum_height)))
    })
}

/// Number of stored patch bounds that differ from the heights
fn stale_patches(heightmap: &Heightmap, stored: &TerrainBounds) -> Option<usize> {
    let fresh = compute_bounds(heightmap, &QuadrantLayout::default()).ok()?;
    if fresh.patches.len() != stored.patches.len() {
        return Some(fresh.patches.len());
    }
    Some(
        fresh
            .patches
            .iter()
            .zip(&stored.patches)
            .filter(|(a, b)| a != b)
            .count(),
    )
}

fn execute_info(path: &Path) -> Result<()> {
    let heightmap = load(path)?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("\n{}", style("HIM File Information").bold().underlined());
    println!("File: {} ({})", style(path.display()).cyan(), format_bytes(size));
    println!(
        "Grid: {}x{}",
        style(heightmap.width).green(),
        style(heightmap.height).green()
    );
    println!(
        "Grid count: {}  Grid size: {}",
        style(heightmap.grid_count).yellow(),
        style(heightmap.grid_size).yellow()
    );
    if let Some((lo, hi)) = heightmap.height_range() {
        println!(
            "Heights: {} to {}",
            style(format_meters(lo)).green(),
            style(format_meters(hi)).green()
        );
    }
    if heightmap.width < HIM_GRID_SIZE || heightmap.height < HIM_GRID_SIZE {
        println!(
            "{}",
            style(format!(
                "Grid is smaller than {0}x{0} and cannot be saved",
                HIM_GRID_SIZE
            ))
            .red()
        );
    }

    let Some(bounds) = &heightmap.bounds else {
        println!("Bounding heights: {}", style("none").dim());
        return Ok(());
    };

    println!("\n{}", style("Bounding Heights (cm)").bold());
    let mut table = create_table(&["Section", "Entries", "Lowest", "Highest"]);
    for (name, entries) in [("Patches", &bounds.patches), ("Quadrants", &bounds.quadrants)] {
        let (lo, hi) = span(entries).map_or(("-".to_string(), "-".to_string()), |(lo, hi)| {
            (format!("{lo:.0}"), format!("{hi:.0}"))
        });
        table.add_row(row![name, entries.len(), lo, hi]);
    }
    table.printstd();

    if let Some(stale) = stale_patches(&heightmap, bounds) {
        if stale == 0 {
            println!("Patch bounds: {}", style("up to date").green());
        } else {
            println!(
                "Patch bounds: {} out of date, run `rosemap him rebuild`",
                style(stale).red()
            );
        }
    }

    Ok(())
}

fn execute_rebuild(input: &Path, output: &Path, quad_tree: bool) -> Result<()> {
    let heightmap = load(input)?;

    let layout = if quad_tree {
        QuadrantLayout::quad_tree()
    } else {
        QuadrantLayout::unpopulated()
    };
    HimParser::new()
        .with_quadrant_layout(layout)
        .save(output, &heightmap)
        .with_context(|| format!("Failed to write HIM file: {}", output.display()))?;

    println!(
        "✓ Rebuilt {} -> {}",
        style(input.display()).cyan(),
        style(output.display()).green()
    );
    Ok(())
}

//! MOV walkability command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use std::path::{Path, PathBuf};

use rose_mov::{MOV_GRID_SIZE, Walkability};

use crate::commands::write_json;
use crate::utils::format_percentage;

#[derive(Subcommand)]
pub enum MovCommands {
    /// Display information about a MOV file
    Info {
        /// Path to the MOV file
        file: PathBuf,
    },

    /// Print the walkability grid, `#` for walkable cells
    Show {
        /// Path to the MOV file
        file: PathBuf,
    },

    /// Export a MOV file as JSON
    Export {
        /// Path to the MOV file
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: MovCommands) -> Result<()> {
    match command {
        MovCommands::Info { file } => execute_info(&file),
        MovCommands::Show { file } => execute_show(&file),
        MovCommands::Export { file, output } => write_json(&load(&file)?, output.as_deref()),
    }
}

fn load(path: &Path) -> Result<Walkability> {
    Walkability::load(path)
        .with_context(|| format!("Failed to open MOV file: {}", path.display()))
}

fn execute_info(path: &Path) -> Result<()> {
    let grid = load(path)?;
    let total = grid.width * grid.height;
    let walkable = grid.walkable_count();

    println!("\n{}", style("MOV File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Grid: {}x{}",
        style(grid.width).green(),
        style(grid.height).green()
    );
    println!(
        "Walkable: {}/{} ({})",
        style(walkable).green(),
        style(total).dim(),
        format_percentage(if total == 0 {
            0.0
        } else {
            walkable as f64 / total as f64 * 100.0
        })
    );
    if grid.width < MOV_GRID_SIZE || grid.height < MOV_GRID_SIZE {
        println!(
            "{}",
            style(format!(
                "Grid is smaller than {0}x{0} and cannot be saved",
                MOV_GRID_SIZE
            ))
            .red()
        );
    }

    Ok(())
}

fn execute_show(path: &Path) -> Result<()> {
    let grid = load(path)?;
    for row in grid.rows() {
        let line: String = row
            .iter()
            .map(|&cell| if cell != 0 { '#' } else { '.' })
            .collect();
        println!("{line}");
    }
    Ok(())
}

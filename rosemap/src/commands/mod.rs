//! Command implementations for each file format

pub mod him;
pub mod ifo;
pub mod mov;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty JSON to `output`, or to stdout when no path is given
pub(crate) fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to write JSON")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to write JSON")?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

//! IFO scene command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use prettytable::row;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rose_ifo::validation::validate_ifo_file;
use rose_ifo::{BlockType, IfoFile, IfoParser, ObjectPayload, SceneObject, read_block_table};

use crate::commands::write_json;
use crate::utils::{
    NodeType, RefType, TreeNode, TreeOptions, create_table, detect_ref_type, format_bytes,
    format_position, render_tree,
};

#[derive(Subcommand)]
pub enum IfoCommands {
    /// Display the block table of an IFO file
    Info {
        /// Path to the IFO file
        file: PathBuf,
    },

    /// Show tree structure of an IFO file
    Tree {
        /// Path to the IFO file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(long)]
        depth: Option<usize>,

        /// Hide external file references
        #[arg(long)]
        no_external_refs: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show compact metadata inline
        #[arg(long)]
        compact: bool,
    },

    /// Validate an IFO file
    Validate {
        /// Path to the IFO file
        file: PathBuf,
    },

    /// Rewrite an IFO file with a fresh offset table
    Rebuild {
        /// Path to the input IFO file
        input: PathBuf,

        /// Path to write the rebuilt IFO file
        output: PathBuf,
    },

    /// Export an IFO file as JSON
    Export {
        /// Path to the IFO file
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: IfoCommands) -> Result<()> {
    match command {
        IfoCommands::Info { file } => execute_info(&file),
        IfoCommands::Tree {
            file,
            depth,
            no_external_refs,
            no_color,
            compact,
        } => {
            let options = TreeOptions {
                max_depth: depth,
                show_external_refs: !no_external_refs,
                no_color,
                show_metadata: true,
                compact,
            };
            execute_tree(&file, &options)
        }
        IfoCommands::Validate { file } => execute_validate(&file),
        IfoCommands::Rebuild { input, output } => execute_rebuild(&input, &output),
        IfoCommands::Export { file, output } => write_json(&load(&file)?, output.as_deref()),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn load(path: &Path) -> Result<IfoFile> {
    IfoParser::new()
        .parse(&mut open(path)?)
        .with_context(|| format!("Failed to parse IFO file: {}", path.display()))
}

/// Short summary of a block's contents
fn block_summary(ifo: &IfoFile, block: BlockType) -> String {
    match block {
        BlockType::MapInfo => format!("\"{}\"", ifo.map_info.map_name),
        BlockType::WideWater => format!("{}x{}", ifo.wide_water.width, ifo.wide_water.height),
        BlockType::Water => ifo.water.planes.len().to_string(),
        _ => ifo.objects(block).len().to_string(),
    }
}

fn execute_info(path: &Path) -> Result<()> {
    let table_entries = read_block_table(&mut open(path)?)
        .with_context(|| format!("Failed to read block table: {}", path.display()))?;
    let ifo = load(path)?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("\n{}", style("IFO File Information").bold().underlined());
    println!("File: {} ({})", style(path.display()).cyan(), format_bytes(size));
    println!("Blocks: {}", style(table_entries.len()).green());
    println!(
        "Map: {} cell ({}, {})",
        style(&ifo.map_info.map_name).yellow(),
        ifo.map_info.map_cell_x,
        ifo.map_info.map_cell_y
    );
    println!("Objects: {}", style(ifo.object_count()).green());

    println!("\n{}", style("Block Table").bold());
    let mut table = create_table(&["Tag", "Block", "Offset", "Contents"]);
    for entry in &table_entries {
        match entry.kind() {
            Some(block) => {
                table.add_row(row![
                    entry.block_type,
                    style(block).cyan(),
                    entry.offset,
                    block_summary(&ifo, block)
                ]);
            }
            None => {
                table.add_row(row![
                    entry.block_type,
                    style("unknown").red(),
                    entry.offset,
                    "skipped"
                ]);
            }
        }
    }
    table.printstd();

    Ok(())
}

fn object_node(index: usize, object: &SceneObject) -> TreeNode {
    let header = &object.header;
    let name = if header.description.is_empty() {
        format!("[{}] object {}", index, header.object_id)
    } else {
        format!("[{}] {} ({})", index, header.description, header.object_id)
    };
    let p = header.position;
    let mut node = TreeNode::new(name, NodeType::Object)
        .with_metadata("type", format!("{:?}", header.object_type))
        .with_metadata("position", format_position(p.x, p.y, p.z));
    if header.warp_id != 0 {
        node = node.with_metadata("warp", header.warp_id);
    }
    if header.event_id != 0 {
        node = node.with_metadata("event", header.event_id);
    }

    match &object.payload {
        ObjectPayload::None => node,
        ObjectPayload::Npc {
            ai_pattern_index,
            path,
        } => node
            .with_metadata("ai", ai_pattern_index)
            .with_external_ref(path, detect_ref_type(path)),
        ObjectPayload::Sound {
            path,
            range,
            interval,
        } => node
            .with_metadata("range", range)
            .with_metadata("interval", interval)
            .with_external_ref(path, RefType::Sound),
        ObjectPayload::Effect { path } => node.with_external_ref(path, RefType::Effect),
        ObjectPayload::MonsterSpawn(spawn) => {
            let mut node = node
                .with_metadata("spawn", &spawn.name)
                .with_metadata("interval", spawn.interval)
                .with_metadata("limit", spawn.limit);
            for (label, entries) in [("basic", &spawn.basic), ("tactic", &spawn.tactic)] {
                for monster in entries {
                    node = node.add_child(
                        TreeNode::new(
                            format!("{} monster {} x{}", label, monster.id, monster.count),
                            NodeType::Property,
                        ),
                    );
                }
            }
            node
        }
        ObjectPayload::EventTrigger {
            qsd_trigger,
            lua_trigger,
        } => node
            .with_external_ref(qsd_trigger, RefType::Quest)
            .with_external_ref(lua_trigger, RefType::Script),
    }
}

fn execute_tree(path: &Path, options: &TreeOptions) -> Result<()> {
    let ifo = load(path)?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
    let mut root = TreeNode::new(file_name, NodeType::Root)
        .with_size(size)
        .with_metadata("objects", ifo.object_count());

    let info = &ifo.map_info;
    root = root.add_child(
        TreeNode::new(BlockType::MapInfo.name(), NodeType::Header)
            .with_metadata("name", &info.map_name)
            .with_metadata("size", format!("{}x{}", info.width, info.height))
            .with_metadata("cell", format!("{}, {}", info.map_cell_x, info.map_cell_y)),
    );

    for block in BlockType::ALL {
        let node = match block {
            BlockType::MapInfo => continue,
            BlockType::WideWater => TreeNode::new(block.name(), NodeType::Block)
                .with_metadata("size", block_summary(&ifo, block)),
            BlockType::Water => {
                let mut node = TreeNode::new(block.name(), NodeType::Block)
                    .with_metadata("count", ifo.water.planes.len());
                for (index, plane) in ifo.water.planes.iter().enumerate() {
                    let (a, b) = (plane.minimum, plane.maximum);
                    node = node.add_child(
                        TreeNode::new(format!("[{}] plane", index), NodeType::Object)
                            .with_metadata("min", format_position(a.x, a.y, a.z))
                            .with_metadata("max", format_position(b.x, b.y, b.z)),
                    );
                }
                node
            }
            _ => {
                let objects = ifo.objects(block);
                let mut node = TreeNode::new(block.name(), NodeType::Block)
                    .with_metadata("count", objects.len());
                for (index, object) in objects.iter().enumerate() {
                    node = node.add_child(object_node(index, object));
                }
                node
            }
        };
        root = root.add_child(node);
    }

    print!("{}", render_tree(&root, options));
    Ok(())
}

fn execute_validate(path: &Path) -> Result<()> {
    let ifo = load(path)?;

    match validate_ifo_file(&ifo) {
        Ok(warnings) => {
            for warning in &warnings {
                println!("{} {}", style("warning:").yellow(), warning);
            }
            println!(
                "✓ IFO file '{}' is valid ({} objects, {} warnings)",
                style(path.display()).cyan(),
                ifo.object_count(),
                warnings.len()
            );
            Ok(())
        }
        Err(err) => anyhow::bail!("Validation failed: {}", err),
    }
}

fn execute_rebuild(input: &Path, output: &Path) -> Result<()> {
    let ifo = load(input)?;
    ifo.save(output)
        .with_context(|| format!("Failed to write IFO file: {}", output.display()))?;

    println!(
        "✓ Rebuilt {} -> {} ({} objects)",
        style(input.display()).cyan(),
        style(output.display()).green(),
        ifo.object_count()
    );
    Ok(())
}

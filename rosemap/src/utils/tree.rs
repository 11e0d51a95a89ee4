//! Tree structure rendering for map file visualization

use console::Style;

use super::format::format_bytes;

/// Represents a node in a tree structure
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub size: Option<u64>,
    pub children: Vec<TreeNode>,
    /// Key/value pairs, rendered in insertion order
    pub metadata: Vec<(String, String)>,
    pub external_refs: Vec<ExternalRef>,
}

/// Types of nodes in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Root,
    Header,
    Block,
    Object,
    Property,
}

/// Reference to a file outside the map block
#[derive(Debug, Clone)]
pub struct ExternalRef {
    pub path: String,
    pub ref_type: RefType,
}

/// Types of external references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Model,
    Sound,
    Effect,
    Script,
    Quest,
    Unknown,
}

/// Options for tree rendering
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub show_external_refs: bool,
    pub no_color: bool,
    pub show_metadata: bool,
    pub compact: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_external_refs: true,
            no_color: false,
            show_metadata: true,
            compact: false,
        }
    }
}

impl TreeNode {
    /// Create a new tree node
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            size: None,
            children: Vec::new(),
            metadata: Vec::new(),
            external_refs: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the size of this node
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }

    /// Add an external reference, ignoring empty paths
    pub fn with_external_ref(mut self, path: &str, ref_type: RefType) -> Self {
        if !path.is_empty() {
            self.external_refs.push(ExternalRef {
                path: path.to_string(),
                ref_type,
            });
        }
        self
    }
}

impl ExternalRef {
    /// Get emoji icon for reference type
    pub fn icon(&self) -> &'static str {
        match self.ref_type {
            RefType::Model => "🏗️",
            RefType::Sound => "🔊",
            RefType::Effect => "✨",
            RefType::Script => "📄",
            RefType::Quest => "📜",
            RefType::Unknown => "📁",
        }
    }
}

impl NodeType {
    /// Get emoji icon for node type
    pub fn icon(&self) -> &'static str {
        match self {
            NodeType::Root => "📁",
            NodeType::Header => "📋",
            NodeType::Block => "📦",
            NodeType::Object => "🔹",
            NodeType::Property => "🏷️",
        }
    }

    /// Get color style for node type
    pub fn style(&self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                NodeType::Root => Style::new().bold().cyan(),
                NodeType::Header => Style::new().bold().yellow(),
                NodeType::Block => Style::new().blue(),
                NodeType::Object => Style::new().green(),
                NodeType::Property => Style::new().dim(),
            }
        }
    }
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let icon = node.node_type.icon();
    let style = node.node_type.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let mut line = format!(
        "{}{}{} {}",
        prefix,
        connector,
        icon,
        style.apply_to(&node.name)
    );

    if let Some(size) = node.size {
        line.push_str(&format!(" ({})", format_bytes(size)));
    }

    if options.show_metadata && options.compact && !node.metadata.is_empty() {
        let meta_parts: Vec<String> = node
            .metadata
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        line.push_str(&format!(" [{}]", meta_parts.join(", ")));
    }

    output.push_str(&line);
    output.push('\n');

    let child_prefix = if depth == 0 {
        ""
    } else if is_last {
        "    "
    } else {
        "│   "
    };

    if options.show_metadata && !options.compact {
        let meta_prefix = format!("{prefix}{child_prefix}    ");
        let meta_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        for (key, value) in &node.metadata {
            output.push_str(&format!(
                "{}🏷️  {}: {}\n",
                meta_prefix,
                meta_style.apply_to(key),
                value
            ));
        }
    }

    if options.show_external_refs {
        let ref_prefix = format!("{prefix}{child_prefix}    ");
        let ref_style = if options.no_color {
            Style::new()
        } else {
            Style::new().yellow()
        };
        for ext_ref in &node.external_refs {
            output.push_str(&format!(
                "{}└─→ {} {}\n",
                ref_prefix,
                ext_ref.icon(),
                ref_style.apply_to(&ext_ref.path)
            ));
        }
    }

    if !node.children.is_empty() {
        let new_prefix = if depth == 0 {
            String::new()
        } else {
            format!("{prefix}{child_prefix}")
        };

        for (i, child) in node.children.iter().enumerate() {
            let is_last_child = i == node.children.len() - 1;
            render_node(
                child,
                output,
                &new_prefix,
                is_last_child,
                depth + 1,
                options,
            );
        }
    }
}

/// Detect reference type from file extension
pub fn detect_ref_type(path: &str) -> RefType {
    let path_lower = path.to_lowercase();

    if path_lower.ends_with(".zsc") || path_lower.ends_with(".zms") || path_lower.ends_with(".zmd")
    {
        RefType::Model
    } else if path_lower.ends_with(".wav") || path_lower.ends_with(".ogg") {
        RefType::Sound
    } else if path_lower.ends_with(".eft") || path_lower.ends_with(".ptl") {
        RefType::Effect
    } else if path_lower.ends_with(".con") || path_lower.ends_with(".lua") {
        RefType::Script
    } else if path_lower.ends_with(".qsd") {
        RefType::Quest
    } else {
        RefType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_rendering() {
        let root = TreeNode::new("30_30.ifo", NodeType::Root)
            .with_size(1024)
            .with_metadata("blocks", 13)
            .add_child(TreeNode::new("MapInfo", NodeType::Header).with_metadata("name", "Zant"))
            .add_child(
                TreeNode::new("Sound", NodeType::Block).add_child(
                    TreeNode::new("[0] object 4", NodeType::Object)
                        .with_external_ref("SOUND/WIND.WAV", RefType::Sound),
                ),
            );

        let options = TreeOptions {
            no_color: true,
            ..TreeOptions::default()
        };
        let output = render_tree(&root, &options);

        assert!(output.contains("30_30.ifo"));
        assert!(output.contains("├── 📋 MapInfo"));
        assert!(output.contains("└── 📦 Sound"));
        assert!(output.contains("blocks: 13"));
        assert!(output.contains("SOUND/WIND.WAV"));
    }

    #[test]
    fn test_max_depth() {
        let root = TreeNode::new("root", NodeType::Root)
            .add_child(TreeNode::new("child", NodeType::Block).add_child(TreeNode::new(
                "grandchild",
                NodeType::Object,
            )));
        let options = TreeOptions {
            max_depth: Some(1),
            no_color: true,
            ..TreeOptions::default()
        };

        let output = render_tree(&root, &options);
        assert!(output.contains("child"));
        assert!(!output.contains("grandchild"));
    }

    #[test]
    fn test_ref_type_detection() {
        assert_eq!(detect_ref_type("3DDATA/JUNON/DECO.ZSC"), RefType::Model);
        assert_eq!(detect_ref_type("sound/wind.wav"), RefType::Sound);
        assert_eq!(detect_ref_type("3DDATA/EFFECT/FIRE.EFT"), RefType::Effect);
        assert_eq!(detect_ref_type("QUESTDATA/NPC.CON"), RefType::Script);
        assert_eq!(detect_ref_type("readme.txt"), RefType::Unknown);
    }
}

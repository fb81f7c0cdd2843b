use serde::{Deserialize, Serialize};

use crate::workspace::Workspace;

// ────────────────────────────────────────────────────────────────────────────
// WorkspaceDoc – persisted workspace wrapper
// ────────────────────────────────────────────────────────────────────────────

const BINARY_MAGIC: &[u8; 11] = b"BLOCKSTUDIO";
const BINARY_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceDoc {
    pub workspace: Workspace,
}

impl WorkspaceDoc {
    /// Save the WorkspaceDoc to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, BINARY_MAGIC)?;
        std::io::Write::write_all(&mut writer, &BINARY_VERSION.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        std::io::Write::flush(&mut writer)?;
        Ok(())
    }

    /// Load a WorkspaceDoc from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 11];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != BINARY_MAGIC {
            anyhow::bail!("Invalid magic bytes: expected 'BLOCKSTUDIO'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != BINARY_VERSION {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let doc: WorkspaceDoc =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(doc)
    }

    /// Save as pretty-printed JSON.
    pub fn save_to_json<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_json<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let doc: WorkspaceDoc = serde_json::from_str(&text)?;
        Ok(doc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Categories and ports
// ────────────────────────────────────────────────────────────────────────────

/// Palette category a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Variables,
    Control,
    Io,
    Functions,
    Lists,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Variables,
        Category::Control,
        Category::Io,
        Category::Functions,
        Category::Lists,
    ];

    /// Human-readable palette heading.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Variables => "Variables & Math",
            Category::Control => "Control Flow",
            Category::Io => "Input/Output",
            Category::Functions => "Functions",
            Category::Lists => "Lists & Data",
        }
    }

    /// Color key shared by the category header and its blocks.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Variables => "bg-blue-500",
            Category::Control => "bg-green-500",
            Category::Io => "bg-purple-500",
            Category::Functions => "bg-orange-500",
            Category::Lists => "bg-pink-500",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Variables => "Calculator",
            Category::Control => "GitBranch",
            Category::Io => "MessageSquare",
            Category::Functions => "Zap",
            Category::Lists => "List",
        }
    }
}

/// Declared kind of an input or output port. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    String,
    Number,
    Boolean,
    #[default]
    Any,
}

/// An editable, named input of a block. Its value is substituted for the
/// `{id}` placeholder in the block template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInput {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: PortKind,
    #[serde(default)]
    pub value: Option<String>,
}

impl BlockInput {
    /// The current value, treating an empty string as unset.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// A descriptive output port. No data flows through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockOutput {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: PortKind,
}

// ────────────────────────────────────────────────────────────────────────────
// Block
// ────────────────────────────────────────────────────────────────────────────

/// A block placed on the workspace canvas.
///
/// The template part (`block_type` through `outputs`) is cloned from a
/// [`BlockTemplate`](crate::catalog::BlockTemplate) when the block is dropped;
/// `x`, `y` and the input values change as the user edits the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub category: Category,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub inputs: Vec<BlockInput>,
    #[serde(default)]
    pub outputs: Vec<BlockOutput>,
}

impl Block {
    pub fn input(&self, input_id: &str) -> Option<&BlockInput> {
        self.inputs.iter().find(|i| i.id == input_id)
    }

    /// Inputs that still have no value. The canvas flags such blocks.
    pub fn missing_inputs(&self) -> Vec<&BlockInput> {
        self.inputs.iter().filter(|i| i.value().is_none()).collect()
    }

    /// Placeholder names in the template that no input provides.
    pub fn unmatched_placeholders(&self) -> Vec<String> {
        let Some(template) = self.template.as_deref() else {
            return Vec::new();
        };
        let mut names = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else { break };
            let name = &after[..close];
            let is_ident = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if is_ident && self.input(name).is_none() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            rest = &after[close + 1..];
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with(template: &str, inputs: &[(&str, Option<&str>)]) -> Block {
        Block {
            id: "b1".into(),
            block_type: "custom".into(),
            category: Category::Variables,
            label: "Custom".into(),
            icon: "Square".into(),
            color: "bg-blue-500".into(),
            x: 0.0,
            y: 0.0,
            template: Some(template.into()),
            inputs: inputs
                .iter()
                .map(|(id, value)| BlockInput {
                    id: (*id).into(),
                    label: id.to_uppercase(),
                    kind: PortKind::Any,
                    value: value.map(str::to_string),
                })
                .collect(),
            outputs: Vec::new(),
        }
    }

    #[test]
    fn test_missing_inputs_treats_empty_as_unset() {
        let b = block_with("{a} = {b}", &[("a", Some("x")), ("b", Some(""))]);
        let missing: Vec<&str> = b.missing_inputs().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(missing, vec!["b"]);
    }

    #[test]
    fn test_unmatched_placeholders() {
        let b = block_with("{a} = {b} + {c} {c}", &[("a", None), ("b", None)]);
        assert_eq!(b.unmatched_placeholders(), vec!["c".to_string()]);
        let b = block_with("print({msg})", &[("msg", None)]);
        assert!(b.unmatched_placeholders().is_empty());
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::Io).unwrap();
        assert_eq!(json, "\"io\"");
        let kind: PortKind = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(kind, PortKind::Boolean);
    }
}

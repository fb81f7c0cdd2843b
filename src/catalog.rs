//! Template catalog: the fixed set of blocks offered by the palette.
//!
//! Each [`BlockTemplate`] describes a statement kind: its category, label,
//! visual keys, source template and the inputs (with defaults) the user fills
//! in. Dropping a template on the canvas clones it into a [`Block`]
//! (see [`crate::workspace::Workspace::add_block`]).
//!
//! # Usage
//!
//! ```rust
//! use blockstudio::catalog::{block_catalog, find_template};
//!
//! let print = find_template("print").unwrap();
//! assert_eq!(print.template.as_deref(), Some("print({message})"));
//! assert_eq!(block_catalog().len(), 9);
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::{Block, BlockInput, BlockOutput, Category, PortKind};

/// A palette entry. Everything a [`Block`] has except its id and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTemplate {
    #[serde(rename = "type")]
    pub block_type: String,
    pub category: Category,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub template: Option<String>,
    pub inputs: Vec<BlockInput>,
    pub outputs: Vec<BlockOutput>,
}

impl BlockTemplate {
    /// Check if this entry matches a search query (case-insensitive substring match
    /// on block type, label, or category name).
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.block_type.to_lowercase().contains(&q)
            || self.label.to_lowercase().contains(&q)
            || self.category.display_name().to_lowercase().contains(&q)
    }

    /// Clone the template into a block with the given id and position.
    pub fn instantiate(&self, id: String, x: f64, y: f64) -> Block {
        Block {
            id,
            block_type: self.block_type.clone(),
            category: self.category,
            label: self.label.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            x,
            y,
            template: self.template.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        }
    }
}

/// The templates of one category, in palette order.
#[derive(Debug, Clone)]
pub struct CatalogCategory {
    pub category: Category,
    pub templates: Vec<BlockTemplate>,
}

fn input(id: &str, label: &str, kind: PortKind, value: &str) -> BlockInput {
    BlockInput {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        value: Some(value.to_string()),
    }
}

fn output(id: &str, label: &str, kind: PortKind) -> BlockOutput {
    BlockOutput {
        id: id.to_string(),
        label: label.to_string(),
        kind,
    }
}

/// Helper to create a catalog entry concisely. Color comes from the category.
fn entry(
    block_type: &str,
    category: Category,
    label: &str,
    icon: &str,
    template: &str,
    inputs: Vec<BlockInput>,
    outputs: Vec<BlockOutput>,
) -> BlockTemplate {
    BlockTemplate {
        block_type: block_type.to_string(),
        category,
        label: label.to_string(),
        icon: icon.to_string(),
        color: category.color().to_string(),
        template: Some(template.to_string()),
        inputs,
        outputs,
    }
}

/// Returns every template in palette order.
///
/// The catalog is lazily initialized on first access and cached for the
/// lifetime of the process.
pub fn block_catalog() -> &'static [BlockTemplate] {
    static CATALOG: Lazy<Vec<BlockTemplate>> = Lazy::new(build_catalog);
    &CATALOG
}

/// Returns the catalog grouped by category, categories in first-seen order.
pub fn block_catalog_by_category() -> &'static [CatalogCategory] {
    static CATEGORIES: Lazy<Vec<CatalogCategory>> = Lazy::new(|| {
        let mut by_cat: IndexMap<Category, Vec<BlockTemplate>> = IndexMap::new();
        for t in block_catalog() {
            by_cat.entry(t.category).or_default().push(t.clone());
        }
        by_cat
            .into_iter()
            .map(|(category, templates)| CatalogCategory {
                category,
                templates,
            })
            .collect()
    });
    &CATEGORIES
}

/// Look up a template by its block type.
pub fn find_template(block_type: &str) -> Option<&'static BlockTemplate> {
    block_catalog().iter().find(|t| t.block_type == block_type)
}

fn build_catalog() -> Vec<BlockTemplate> {
    use Category::*;
    use PortKind::{Any, Boolean, Number, String};

    let mut c = Vec::with_capacity(9);

    // ── Variables & Math ────────────────────────────────────────────────
    c.push(entry(
        "set_variable",
        Variables,
        "Set Variable",
        "Calculator",
        "{variable} = {value}",
        vec![
            input("variable", "Variable Name", String, "x"),
            input("value", "Value", Any, "10"),
        ],
        vec![],
    ));
    c.push(entry(
        "math_operation",
        Variables,
        "Math Operation",
        "Plus",
        "{left} {operator} {right}",
        vec![
            input("left", "Left", Number, "5"),
            input("operator", "Operation", String, "+"),
            input("right", "Right", Number, "3"),
        ],
        vec![output("result", "Result", Number)],
    ));

    // ── Control Flow ────────────────────────────────────────────────────
    c.push(entry(
        "if_statement",
        Control,
        "If Statement",
        "GitBranch",
        "if {condition}:\n    {action}",
        vec![
            input("condition", "Condition", Boolean, "x > 5"),
            input("action", "Action", Any, "print(\"Yes!\")"),
        ],
        vec![],
    ));
    c.push(entry(
        "for_loop",
        Control,
        "For Loop",
        "RotateCcw",
        "for {variable} in range({start}, {end}):\n    {action}",
        vec![
            input("variable", "Variable", String, "i"),
            input("start", "Start", Number, "0"),
            input("end", "End", Number, "5"),
            input("action", "Action", Any, "print(i)"),
        ],
        vec![],
    ));

    // ── Input/Output ────────────────────────────────────────────────────
    c.push(entry(
        "print",
        Io,
        "Print",
        "MessageSquare",
        "print({message})",
        vec![input("message", "Message", Any, "\"Hello World!\"")],
        vec![],
    ));
    c.push(entry(
        "input",
        Io,
        "Get Input",
        "Keyboard",
        "input({prompt})",
        vec![input("prompt", "Prompt", String, "\"Enter something: \"")],
        vec![output("result", "Input", String)],
    ));

    // ── Functions ───────────────────────────────────────────────────────
    c.push(entry(
        "define_function",
        Functions,
        "Define Function",
        "Zap",
        "def {name}({parameters}):\n    {body}\n    return {return_value}",
        vec![
            input("name", "Function Name", String, "my_function"),
            input("parameters", "Parameters", String, "x, y"),
            input("body", "Body", Any, "result = x + y"),
            input("return_value", "Return", Any, "result"),
        ],
        vec![],
    ));

    // ── Lists & Data ────────────────────────────────────────────────────
    c.push(entry(
        "create_list",
        Lists,
        "Create List",
        "List",
        "[{items}]",
        vec![input("items", "Items", String, "1, 2, 3, 4, 5")],
        vec![output("list", "List", Any)],
    ));
    c.push(entry(
        "append_to_list",
        Lists,
        "Add to List",
        "ListPlus",
        "{list}.append({item})",
        vec![
            input("list", "List", Any, "my_list"),
            input("item", "Item", Any, "6"),
        ],
        vec![],
    ));

    c
}

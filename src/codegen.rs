//! Source synthesis: turn placed blocks into program text.
//!
//! Blocks are emitted top to bottom by their `y` coordinate. Each block
//! contributes one fragment (possibly several lines), fragments are separated
//! by a blank line.

use crate::model::Block;

/// Text shown when the workspace holds no blocks.
pub const EMPTY_PROGRAM_PLACEHOLDER: &str =
    "# Your code will appear here!\n# Drag blocks to the workspace to get started.";

/// Synthesize the program text for `blocks`.
pub fn synthesize(blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return EMPTY_PROGRAM_PLACEHOLDER.to_string();
    }

    // `sort_by` is stable: blocks on the same row keep their insertion order.
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    sorted
        .into_iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render a single block's fragment.
///
/// Blocks without a template or without inputs render as a comment naming the
/// block. Otherwise each `{input_id}` placeholder is replaced by the input's
/// value, or by its quoted label when the value is empty. Placeholders that no
/// input claims are left as they are.
pub fn render_block(block: &Block) -> String {
    let template = match block.template.as_deref() {
        Some(t) if !t.is_empty() && !block.inputs.is_empty() => t,
        _ => return format!("# {}", block.label),
    };

    let mut code = template.to_string();
    for input in &block.inputs {
        let placeholder = format!("{{{}}}", input.id);
        let value = match input.value() {
            Some(v) => v.to_string(),
            None => format!("\"{}\"", input.label),
        };
        code = code.replace(&placeholder, &value);
    }
    code
}

/// The synthesized program split into lines.
pub fn source_lines(blocks: &[Block]) -> Vec<String> {
    synthesize(blocks).lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockInput, Category, PortKind};

    fn block(label: &str, y: f64, template: Option<&str>, inputs: Vec<BlockInput>) -> Block {
        Block {
            id: label.to_lowercase(),
            block_type: "test".into(),
            category: Category::Io,
            label: label.into(),
            icon: "Square".into(),
            color: "bg-purple-500".into(),
            x: 0.0,
            y,
            template: template.map(str::to_string),
            inputs,
            outputs: Vec::new(),
        }
    }

    fn inp(id: &str, label: &str, value: Option<&str>) -> BlockInput {
        BlockInput {
            id: id.into(),
            label: label.into(),
            kind: PortKind::Any,
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_is_placeholder() {
        assert_eq!(synthesize(&[]), EMPTY_PROGRAM_PLACEHOLDER);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let b = block("Twice", 0.0, Some("{v} = {v} + 1"), vec![inp("v", "Var", Some("n"))]);
        assert_eq!(render_block(&b), "n = n + 1");
    }

    #[test]
    fn test_empty_value_falls_back_to_quoted_label() {
        let b = block("Print", 0.0, Some("print({message})"), vec![inp("message", "Message", Some(""))]);
        assert_eq!(render_block(&b), "print(\"Message\")");
        let b = block("Print", 0.0, Some("print({message})"), vec![inp("message", "Message", None)]);
        assert_eq!(render_block(&b), "print(\"Message\")");
    }

    #[test]
    fn test_no_template_or_inputs_renders_comment() {
        assert_eq!(render_block(&block("Mystery", 0.0, None, vec![])), "# Mystery");
        assert_eq!(
            render_block(&block("Bare", 0.0, Some("pass"), vec![])),
            "# Bare"
        );
        assert_eq!(
            render_block(&block("Blank", 0.0, Some(""), vec![inp("a", "A", None)])),
            "# Blank"
        );
    }

    #[test]
    fn test_unmatched_placeholder_passes_through() {
        let b = block("P", 0.0, Some("{a} {other}"), vec![inp("a", "A", Some("1"))]);
        assert_eq!(render_block(&b), "1 {other}");
    }

    #[test]
    fn test_ordering_and_stable_ties() {
        let blocks = vec![
            block("C", 80.0, None, vec![]),
            block("A", 20.0, None, vec![]),
            block("B1", 40.0, None, vec![]),
            block("B2", 40.0, None, vec![]),
        ];
        assert_eq!(synthesize(&blocks), "# A\n\n# B1\n\n# B2\n\n# C");
    }
}

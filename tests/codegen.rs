use blockstudio::catalog::find_template;
use blockstudio::codegen::{EMPTY_PROGRAM_PLACEHOLDER, source_lines, synthesize};
use blockstudio::workspace::Workspace;

fn template(block_type: &str) -> &'static blockstudio::catalog::BlockTemplate {
    find_template(block_type).unwrap_or_else(|| panic!("missing template {}", block_type))
}

#[test]
fn empty_workspace_gives_placeholder_comment() {
    let ws = Workspace::new();
    assert_eq!(synthesize(&ws.blocks), EMPTY_PROGRAM_PLACEHOLDER);
    assert!(source_lines(&ws.blocks).iter().all(|l| l.starts_with('#')));
}

#[test]
fn catalog_defaults_render_as_expected() {
    let mut ws = Workspace::new();
    ws.add_block(template("for_loop"), 0.0, 100.0);
    ws.add_block(template("set_variable"), 0.0, 0.0);
    ws.add_block(template("if_statement"), 40.0, 200.0);

    assert_eq!(
        synthesize(&ws.blocks),
        "x = 10\n\nfor i in range(0, 5):\n    print(i)\n\nif x > 5:\n    print(\"Yes!\")"
    );
}

#[test]
fn fragments_follow_vertical_order_with_stable_ties() {
    let mut ws = Workspace::new();
    let a = ws.add_block(template("print"), 0.0, 60.0);
    let b = ws.add_block(template("print"), 300.0, 20.0);
    let c = ws.add_block(template("print"), 0.0, 60.0);
    ws.update_input(&a, "message", "'a'").unwrap();
    ws.update_input(&b, "message", "'b'").unwrap();
    ws.update_input(&c, "message", "'c'").unwrap();

    assert_eq!(source_lines(&ws.blocks), vec!["print('b')", "", "print('a')", "", "print('c')"]);

    ws.move_block(&c, 0.0, 0.0).unwrap();
    assert_eq!(synthesize(&ws.blocks), "print('c')\n\nprint('b')\n\nprint('a')");
}

#[test]
fn cleared_input_falls_back_to_label() {
    let mut ws = Workspace::new();
    let id = ws.add_block(template("set_variable"), 0.0, 0.0);
    ws.update_input(&id, "value", "").unwrap();
    assert_eq!(synthesize(&ws.blocks), "x = \"Value\"");
    let block = ws.block(&id).unwrap();
    assert_eq!(block.missing_inputs().len(), 1);
}

#[test]
fn synthesis_is_deterministic() {
    let mut ws = Workspace::new();
    ws.add_block(template("define_function"), 0.0, 0.0);
    ws.add_block(template("create_list"), 0.0, 80.0);
    ws.add_block(template("append_to_list"), 0.0, 160.0);
    assert_eq!(synthesize(&ws.blocks), synthesize(&ws.blocks.clone()));
}

use blockstudio::catalog::find_template;
use blockstudio::simulator::SimulatorConfig;
use blockstudio::studio::{ConsoleLineKind, NO_CODE_MESSAGE, SUCCESS_MESSAGE, Studio};

fn studio() -> Studio {
    Studio::new(SimulatorConfig::default())
}

#[test]
fn run_default_program() {
    let mut s = studio();
    let ws = &mut s.workspace;
    ws.add_block(find_template("set_variable").unwrap(), 0.0, 0.0);
    ws.add_block(find_template("if_statement").unwrap(), 0.0, 80.0);
    ws.add_block(find_template("for_loop").unwrap(), 0.0, 160.0);
    ws.add_block(find_template("append_to_list").unwrap(), 0.0, 240.0);

    let console = s.run_code().unwrap().to_vec();
    assert_eq!(
        console,
        vec![
            SUCCESS_MESSAGE,
            "Condition \"x > 5\" is true",
            "Yes!",
            "i = 0",
            "i = 1",
            "i = 2",
            "i = 3",
            "i = 4",
            "4",
            "Added 6 to my_list",
        ]
    );
}

#[test]
fn fault_puts_error_first() {
    let mut s = studio();
    let id = s.workspace.add_block(find_template("set_variable").unwrap(), 0.0, 0.0);
    s.workspace.update_input(&id, "value", "10 / 0").unwrap();
    s.workspace.add_block(find_template("print").unwrap(), 0.0, -40.0);

    let console = s.run_code().unwrap().to_vec();
    assert_eq!(console.len(), 2);
    assert_eq!(ConsoleLineKind::classify(&console[0]), ConsoleLineKind::Error);
    assert_eq!(console[1], "Hello World!");
}

#[test]
fn empty_workspace_and_clear() {
    let mut s = studio();
    assert_eq!(s.run_code().unwrap(), [NO_CODE_MESSAGE.to_string()]);
    s.clear_console();
    assert!(s.console().is_empty());
    assert!(s.code_preview().starts_with("# Your code will appear here!"));
}

#[test]
fn input_block_echo_lines() {
    let mut s = studio();
    s.workspace.add_block(find_template("input").unwrap(), 0.0, 0.0);
    let console = s.run_code().unwrap().to_vec();
    let kinds: Vec<ConsoleLineKind> = console.iter().map(|l| ConsoleLineKind::classify(l)).collect();
    assert_eq!(
        kinds,
        vec![ConsoleLineKind::Output, ConsoleLineKind::Echo, ConsoleLineKind::Output]
    );
    assert_eq!(console[1], ">>> Enter something: ");
}

#[test]
fn demo_workspace_runs() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/first_program.json");
    let doc = blockstudio::model::WorkspaceDoc::load_from_json(path).expect("load demo");
    let mut s = Studio::with_workspace(doc.workspace, SimulatorConfig::default());
    let console = s.run_code().unwrap().to_vec();
    assert_eq!(
        console,
        vec![
            SUCCESS_MESSAGE,
            "Condition \"score > 5\" is true",
            "You win!",
            "i = 1",
            "i = 2",
            "i = 3",
            "21",
        ]
    );
}

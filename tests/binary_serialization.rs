use anyhow::Result;
use blockstudio::catalog::find_template;
use blockstudio::codegen::synthesize;
use blockstudio::model::WorkspaceDoc;
use blockstudio::workspace::Workspace;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_workspace() -> Workspace {
    let mut ws = Workspace::new();
    ws.add_block(find_template("set_variable").unwrap(), 20.0, 40.0);
    let id = ws.add_block(find_template("print").unwrap(), 20.0, 120.0);
    ws.update_input(&id, "message", "x").unwrap();
    ws.select_block(Some(&id));
    ws
}

#[test]
fn test_binary_serialization() -> Result<()> {
    let doc = WorkspaceDoc {
        workspace: sample_workspace(),
    };

    let temp_file = NamedTempFile::new()?;
    let temp_path = temp_file.path();

    doc.save_to_binary(temp_path)?;
    let loaded = WorkspaceDoc::load_from_binary(temp_path)?;

    assert_eq!(loaded.workspace, doc.workspace);
    assert_eq!(synthesize(&loaded.workspace.blocks), "x = 10\n\nprint(x)");
    Ok(())
}

#[test]
fn test_json_serialization() -> Result<()> {
    let doc = WorkspaceDoc {
        workspace: sample_workspace(),
    };
    let temp_file = NamedTempFile::new()?;
    doc.save_to_json(temp_file.path())?;
    let loaded = WorkspaceDoc::load_from_json(temp_file.path())?;
    assert_eq!(loaded.workspace, doc.workspace);
    Ok(())
}

#[test]
fn test_json_uses_editor_field_names() -> Result<()> {
    let json = r#"{
      "workspace": {
        "blocks": [
          {
            "id": "abc123xyz",
            "type": "print",
            "category": "io",
            "label": "Print",
            "icon": "MessageSquare",
            "color": "bg-purple-500",
            "x": 0,
            "y": 20,
            "template": "print({message})",
            "inputs": [
              { "id": "message", "label": "Message", "type": "any", "value": "\"hey\"" }
            ]
          }
        ]
      }
    }"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;
    let doc = WorkspaceDoc::load_from_json(file.path())?;
    assert_eq!(doc.workspace.blocks.len(), 1);
    assert!(doc.workspace.selected_block_id.is_none());
    assert_eq!(synthesize(&doc.workspace.blocks), "print(\"hey\")");
    Ok(())
}

#[test]
fn test_rejects_bad_magic() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"NOTAWORKSPACEFILE")?;
    assert!(WorkspaceDoc::load_from_binary(file.path()).is_err());
    Ok(())
}

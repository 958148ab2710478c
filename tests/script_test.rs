use schema_builder::command::script::{load_script, parse_script};
use schema_builder::terminal::{run_interactive, run_script};
use schema_builder::{EditCommand, EditorSession, FieldPath, FieldType, SessionOptions};
use std::fs;
use tempfile::TempDir;

const EXPECTED: &str = "{\n  \"user\": {\n    \"age\": \"number\"\n  }\n}\n";

fn empty_session() -> EditorSession {
    EditorSession::new(SessionOptions {
        initial_fields: 0,
        ..SessionOptions::default()
    })
}

#[test]
fn test_scripts_in_every_format_agree() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let json = r#"
[
    {"op": "append"},
    {"op": "set_key", "path": [0], "key": "user"},
    {"op": "set_type", "path": [0], "type": "nested"},
    {"op": "append", "parent": [0]},
    {"op": "set_key", "path": [0, 0], "key": "age"},
    {"op": "set_type", "path": [0, 0], "type": "number"}
]
"#;
    fs::write(root.join("edits.json"), json)?;

    let yaml = r#"
edit:
  - op: append
  - op: set_key
    path: [0]
    key: user
  - op: set_type
    path: [0]
    type: nested
  - op: append
    parent: [0]
  - op: set_key
    path: [0, 0]
    key: age
  - op: set_type
    path: [0, 0]
    type: number
"#;
    fs::write(root.join("edits.yaml"), yaml)?;

    let toml = r#"
[[edit]]
op = "append"

[[edit]]
op = "set_key"
path = [0]
key = "user"

[[edit]]
op = "set_type"
path = [0]
type = "nested"

[[edit]]
op = "append"
parent = [0]

[[edit]]
op = "set_key"
path = [0, 0]
key = "age"

[[edit]]
op = "set_type"
path = [0, 0]
type = "number"
"#;
    fs::write(root.join("edits.toml"), toml)?;

    let from_json = load_script(&root.join("edits.json"))?;
    assert_eq!(from_json.len(), 6);
    assert_eq!(load_script(&root.join("edits.yaml"))?, from_json);
    assert_eq!(load_script(&root.join("edits.toml"))?, from_json);

    let mut session = empty_session();
    let mut out = Vec::new();
    run_script(&mut session, &from_json, &mut out, true)?;
    assert_eq!(String::from_utf8(out)?, EXPECTED);

    Ok(())
}

#[test]
fn test_unsupported_extension_is_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("edits.txt");
    fs::write(&path, "add\n")?;

    let err = load_script(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Unsupported edit script format"));
    assert!(load_script(&temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn test_failing_script_stops_at_the_bad_edit() -> anyhow::Result<()> {
    let commands = parse_script(
        r#"[{"op": "append"}, {"op": "append", "parent": [0]}, {"op": "remove", "path": [0]}]"#,
        "json",
    )?;

    let mut session = empty_session();
    let mut out = Vec::new();
    let err = run_script(&mut session, &commands, &mut out, false).unwrap_err();
    assert!(err.to_string().contains("Edit #2 (add 0) failed"));

    // The first edit stays applied and was previewed
    assert_eq!(session.forest().len(), 1);
    assert_eq!(String::from_utf8(out)?, "{}\n");
    Ok(())
}

#[test]
fn test_line_form_matches_script_form() -> anyhow::Result<()> {
    let input = "add\nkey 0 user\ntype 0 nested\nadd 0\nkey 0.0 age\ntype 0.0 number\n";

    let mut session = empty_session();
    let mut out = Vec::new();
    let mut err = Vec::new();
    run_interactive(&mut session, input.as_bytes(), &mut out, &mut err)?;

    assert!(err.is_empty());
    assert!(String::from_utf8(out)?.ends_with(EXPECTED));
    assert_eq!(
        session.forest().get(&FieldPath::from(vec![0, 0])).map(|n| n.field_type()),
        Some(FieldType::Number)
    );

    let commands: Vec<String> = [
        EditCommand::Append { parent: FieldPath::root() },
        EditCommand::SetType { path: FieldPath::from(vec![0, 0]), ty: FieldType::Number },
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();
    assert_eq!(commands, vec!["add", "type 0.0 number"]);
    Ok(())
}

//! Terminal front end
//!
//! Plays the part of the form UI: it turns typed lines or script entries into
//! edits on an [`EditorSession`] and writes the refreshed preview after each
//! one. Previews go to `out`; rejected lines are reported on `err` and the
//! session carries on.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::command::{EditCommand, LineCommand};
use crate::session::EditorSession;

/// Read commands line by line until end of input.
///
/// A line that is not valid UTF-8 is reported like any other bad line.
pub fn run_interactive<R, W, E>(
    session: &mut EditorSession,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    writeln!(out, "{}", session.preview())?;

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if input
            .read_until(b'\n', &mut buf)
            .context("Failed to read command")?
            == 0
        {
            break;
        }
        line_no += 1;

        let Ok(line) = std::str::from_utf8(&buf) else {
            writeln!(err, "line {}: invalid UTF-8", line_no)?;
            continue;
        };

        let command = match LineCommand::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(err, "line {}: {}", line_no, e)?;
                continue;
            }
        };

        match command {
            LineCommand::Show => writeln!(out, "{}", session.preview())?,
            LineCommand::Tree => write!(out, "{}", session.forest())?,
            LineCommand::Edit(edit) => match session.apply(&edit) {
                Ok(()) => writeln!(out, "{}", session.preview())?,
                Err(e) => writeln!(err, "line {}: {}: {}", line_no, edit, e)?,
            },
        }
        out.flush()?;
    }

    Ok(())
}

/// Replay a script, stopping at the first edit that fails.
///
/// Prints the preview after every edit, or once at the end when
/// `final_only` is set (or the script is empty).
pub fn run_script<W: Write>(
    session: &mut EditorSession,
    commands: &[EditCommand],
    out: &mut W,
    final_only: bool,
) -> Result<()> {
    for (index, command) in commands.iter().enumerate() {
        session
            .apply(command)
            .with_context(|| format!("Edit #{} ({}) failed", index + 1, command))?;
        if !final_only {
            writeln!(out, "{}", session.preview())?;
        }
    }

    if final_only || commands.is_empty() {
        writeln!(out, "{}", session.preview())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldPath;
    use crate::session::SessionOptions;

    fn run(input: &str) -> (String, String) {
        run_bytes(input.as_bytes())
    }

    fn run_bytes(input: &[u8]) -> (String, String) {
        let mut session = EditorSession::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_interactive(&mut session, input, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_preview_after_each_edit() {
        let (out, err) = run("key 0 name\nadd\nkey 1 age\ntype 1 number\n");
        assert!(err.is_empty());
        // initial preview plus one per edit
        assert_eq!(out.matches('{').count(), 5);
        assert!(out.ends_with("{\n  \"name\": \"string\",\n  \"age\": \"number\"\n}\n"));
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let (out, err) = run("bogus\nadd 0\nrm 7\nkey 0 ok\n");
        assert!(err.contains("line 1: Unknown command: bogus"));
        assert!(err.contains("line 2: add 0:"));
        assert!(err.contains("line 3: rm 7:"));
        assert!(out.ends_with("{\n  \"ok\": \"string\"\n}\n"));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let (out, err) = run_bytes(b"key 0 a\n\xff\xfe\nkey 0 b\n");
        assert_eq!(err, "line 2: invalid UTF-8\n");
        assert!(out.ends_with("{\n  \"b\": \"string\"\n}\n"));
    }

    #[test]
    fn test_last_line_without_newline() {
        let (out, err) = run("key 0 a\r\nkey 0 z");
        assert!(err.is_empty());
        assert!(out.ends_with("{\n  \"z\": \"string\"\n}\n"));
    }

    #[test]
    fn test_comments_show_and_tree() {
        let (out, err) = run("# comment\n\nshow\ntree\n");
        assert!(err.is_empty());
        assert_eq!(out, "{}\n{}\n0  (unnamed): string\n");
    }

    #[test]
    fn test_run_script_final_only() {
        let mut session = EditorSession::new(SessionOptions {
            initial_fields: 0,
            ..SessionOptions::default()
        });
        let commands = vec![
            EditCommand::Append { parent: FieldPath::root() },
            EditCommand::SetKey {
                path: FieldPath::from(vec![0]),
                key: "id".to_string(),
            },
        ];
        let mut out = Vec::new();
        run_script(&mut session, &commands, &mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": \"string\"\n}\n");
    }

    #[test]
    fn test_run_script_reports_failing_edit() {
        let mut session = EditorSession::default();
        let commands = vec![EditCommand::Remove { path: FieldPath::from(vec![3]) }];
        let mut out = Vec::new();
        let err = run_script(&mut session, &commands, &mut out, false).unwrap_err();
        assert!(err.to_string().contains("Edit #1 (rm 3) failed"));
    }
}

//! Replay of line-oriented session scripts.
//!
//! One command per line; `#` starts a comment. Commands map one-to-one onto
//! [`PaletteState`] operations:
//!
//! ```text
//! brand #FF5722          regenerate [#HEX]       insert <i>
//! gray #777777 | auto    method <name>           remove <i>
//! lock #HEX              replace <i> #HEX        reorder <from> <to>
//! adjust <h> <s> <b> <t> commit-adjustments      cancel-adjustments
//! simulate <deficiency>  commit-simulation       cancel-simulation
//! undo   redo   goto <i> reset                   import <path>
//! theme light|dark       font <family>           ai ["#HEX", ...]
//! ```
//!
//! Rejected operations do not stop the replay; they show up as
//! notifications in the report.

use std::path::{Path, PathBuf};

use huekit_color::Color;
use huekit_engine::{
    Adjustments, HarmonyMethod, Notification, PaletteDocument, PaletteState, ThemeMode,
    VisionDeficiency,
};
use serde::Serialize;

use crate::error::{CliError, Result};

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Brand(Color),
    Gray(Color),
    GrayAuto,
    Method(HarmonyMethod),
    Regenerate(Option<Color>),
    Insert(usize),
    Remove(usize),
    Reorder(usize, usize),
    Replace(usize, Color),
    Lock(Color),
    Adjust(Adjustments),
    CommitAdjustments,
    CancelAdjustments,
    Simulate(VisionDeficiency),
    CommitSimulation,
    CancelSimulation,
    Undo,
    Redo,
    GoTo(usize),
    Reset,
    Import(PathBuf),
    Theme(ThemeMode),
    Font(String),
    Ai(serde_json::Value),
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> std::result::Result<Option<ScriptCommand>, String> {
    let line = strip_comment(line.trim());
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "brand" => ScriptCommand::Brand(color_arg(&args, 0)?),
        "gray" if args.first() == Some(&"auto") => ScriptCommand::GrayAuto,
        "gray" => ScriptCommand::Gray(color_arg(&args, 0)?),
        "method" => ScriptCommand::Method(parse_arg(&args, 0)?),
        "regenerate" => ScriptCommand::Regenerate(match args.first() {
            Some(_) => Some(color_arg(&args, 0)?),
            None => None,
        }),
        "insert" => ScriptCommand::Insert(parse_arg(&args, 0)?),
        "remove" => ScriptCommand::Remove(parse_arg(&args, 0)?),
        "reorder" => ScriptCommand::Reorder(parse_arg(&args, 0)?, parse_arg(&args, 1)?),
        "replace" => ScriptCommand::Replace(parse_arg(&args, 0)?, color_arg(&args, 1)?),
        "lock" => ScriptCommand::Lock(color_arg(&args, 0)?),
        "adjust" => ScriptCommand::Adjust(Adjustments::new(
            parse_arg(&args, 0)?,
            parse_arg(&args, 1)?,
            parse_arg(&args, 2)?,
            parse_arg(&args, 3)?,
        )),
        "commit-adjustments" => ScriptCommand::CommitAdjustments,
        "cancel-adjustments" => ScriptCommand::CancelAdjustments,
        "simulate" => ScriptCommand::Simulate(parse_arg(&args, 0)?),
        "commit-simulation" => ScriptCommand::CommitSimulation,
        "cancel-simulation" => ScriptCommand::CancelSimulation,
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "goto" => ScriptCommand::GoTo(parse_arg(&args, 0)?),
        "reset" => ScriptCommand::Reset,
        "import" if !rest.is_empty() => ScriptCommand::Import(PathBuf::from(rest)),
        "theme" => ScriptCommand::Theme(parse_arg(&args, 0)?),
        "font" if !rest.is_empty() => ScriptCommand::Font(rest.to_string()),
        "ai" => ScriptCommand::Ai(serde_json::from_str(rest).map_err(|e| e.to_string())?),
        "import" | "font" => return Err(format!("{verb} needs an argument")),
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Some(command))
}

/// `#` also starts hex colors: it opens a comment at line start, or after
/// whitespace unless the `#` and the digits after it form one color token.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            let token = line[i..].split(char::is_whitespace).next().unwrap_or("#");
            let is_color = i > 0 && Color::is_valid(token);
            if !is_color {
                return line[..i].trim_end();
            }
        }
    }
    line
}

fn parse_arg<T: std::str::FromStr>(args: &[&str], index: usize) -> std::result::Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing argument {}", index + 1))?;
    raw.parse().map_err(|e: T::Err| format!("{raw:?}: {e}"))
}

fn color_arg(args: &[&str], index: usize) -> std::result::Result<Color, String> {
    parse_arg(args, index)
}

/// Parse a whole script, reporting the first bad line.
pub fn parse_script(path: &Path, source: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (i, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(message) => {
                return Err(CliError::Script {
                    path: path.to_path_buf(),
                    line: i + 1,
                    message,
                });
            }
        }
    }
    Ok(commands)
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub document: PaletteDocument,
    pub displayed: Vec<Color>,
    pub names: Vec<&'static str>,
    pub history_len: usize,
    pub cursor: usize,
    pub notifications: Vec<Notification>,
}

/// Run `commands` against `state`. Only I/O failures abort the replay.
pub fn replay(state: &mut PaletteState, commands: &[ScriptCommand]) -> Result<SessionReport> {
    for command in commands {
        tracing::debug!(target: "huekit.session", ?command, "replaying");
        // Rejections are queued as notifications; the replay carries on.
        let _ = apply(state, command)?;
    }
    Ok(SessionReport {
        document: state.export_document(),
        displayed: state.displayed_palette(),
        names: state.color_names(),
        history_len: state.history().len(),
        cursor: state.history().cursor(),
        notifications: state.take_notifications(),
    })
}

fn apply(state: &mut PaletteState, command: &ScriptCommand) -> Result<huekit_engine::Result<()>> {
    let outcome = match command {
        ScriptCommand::Brand(color) => {
            state.update_brand_color(*color);
            Ok(())
        }
        ScriptCommand::Gray(color) => {
            state.set_gray_color(*color);
            Ok(())
        }
        ScriptCommand::GrayAuto => {
            state.set_gray_auto(true);
            Ok(())
        }
        ScriptCommand::Method(method) => {
            state.set_method(*method);
            Ok(())
        }
        ScriptCommand::Regenerate(base) => {
            state.regenerate(*base);
            Ok(())
        }
        ScriptCommand::Insert(at) => state.insert_color(*at).map(drop),
        ScriptCommand::Remove(at) => state.remove_color(*at).map(drop),
        ScriptCommand::Reorder(from, to) => state.reorder(*from, *to),
        ScriptCommand::Replace(at, color) => state.replace_color(*at, *color),
        ScriptCommand::Lock(color) => state.toggle_lock(*color).map(drop),
        ScriptCommand::Adjust(adjustments) => {
            state.set_adjustments(*adjustments);
            Ok(())
        }
        ScriptCommand::CommitAdjustments => state.commit_adjustments(),
        ScriptCommand::CancelAdjustments => {
            state.cancel_adjustments();
            Ok(())
        }
        ScriptCommand::Simulate(deficiency) => {
            state.start_simulation(*deficiency);
            Ok(())
        }
        ScriptCommand::CommitSimulation => state.commit_simulation(),
        ScriptCommand::CancelSimulation => {
            state.cancel_simulation();
            Ok(())
        }
        ScriptCommand::Undo => {
            state.undo();
            Ok(())
        }
        ScriptCommand::Redo => {
            state.redo();
            Ok(())
        }
        ScriptCommand::GoTo(index) => state.go_to(*index),
        ScriptCommand::Reset => {
            state.reset();
            Ok(())
        }
        ScriptCommand::Import(path) => {
            let source = std::fs::read_to_string(path)?;
            state.import_json(&source)
        }
        ScriptCommand::Theme(theme) => {
            state.set_theme(*theme);
            Ok(())
        }
        ScriptCommand::Font(font) => {
            state.set_font(font.clone());
            Ok(())
        }
        ScriptCommand::Ai(raw) => state.apply_ai_palette(raw),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huekit_engine::EngineConfig;

    #[test]
    fn parses_commands_and_skips_comments() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# just a note"), Ok(None));
        assert_eq!(
            parse_line("brand #ff5722"),
            Ok(Some(ScriptCommand::Brand(Color::from_u32(0xFF5722))))
        );
        assert_eq!(
            parse_line("replace 2 #00FF00  # make it green"),
            Ok(Some(ScriptCommand::Replace(2, Color::from_u32(0x00FF00))))
        );
        assert_eq!(parse_line("gray auto"), Ok(Some(ScriptCommand::GrayAuto)));
        assert_eq!(parse_line("regenerate"), Ok(Some(ScriptCommand::Regenerate(None))));
        assert_eq!(
            parse_line("method split-complement"),
            Ok(Some(ScriptCommand::Method(HarmonyMethod::SplitComplement)))
        );
        assert_eq!(
            parse_line("adjust 400 0 -20 10"),
            Ok(Some(ScriptCommand::Adjust(Adjustments::new(180, 0, -20, 10))))
        );
    }

    #[test]
    fn trailing_comments_starting_with_hex_words_are_stripped() {
        assert_eq!(parse_line("remove 1 # bad idea"), Ok(Some(ScriptCommand::Remove(1))));
        assert_eq!(parse_line("regenerate # fed up"), Ok(Some(ScriptCommand::Regenerate(None))));
        assert_eq!(
            parse_line("lock #abc # abc is fine"),
            Ok(Some(ScriptCommand::Lock(Color::from_u32(0xAABBCC))))
        );
    }

    #[test]
    fn rejects_unknown_and_malformed_lines() {
        assert!(parse_line("paint #FF0000").unwrap_err().contains("unknown command"));
        assert!(parse_line("insert").unwrap_err().contains("missing argument"));
        assert!(parse_line("brand #XYZXYZ").is_err());
        assert!(parse_line("font").is_err());
    }

    #[test]
    fn parse_script_reports_line_numbers() {
        let err = parse_script(Path::new("s.hk"), "undo\n\nbogus\n").unwrap_err();
        match err {
            CliError::Script { line, .. } => assert_eq!(line, 3),
            other => panic!("expected Script error, got {other}"),
        }
    }

    #[test]
    fn replay_applies_commands_and_collects_rejections() {
        let mut state = PaletteState::new(EngineConfig::seeded(12));
        let commands = parse_script(
            Path::new("inline"),
            "method triad\nregenerate #336699\nremove 0\nremove 0\nremove 0\nremove 0\nundo\n",
        )
        .unwrap();
        let report = replay(&mut state, &commands).unwrap();
        // Five colors, three removals succeed, the fourth is rejected, one undo.
        assert_eq!(report.document.explorer_palette.len(), 3);
        assert_eq!(report.notifications.len(), 1);
        assert_eq!(report.names.len(), 3);
        assert_eq!(report.history_len, 5);
        assert_eq!(report.cursor, 3);
    }

    #[test]
    fn replay_applies_ai_proposals() {
        let mut state = PaletteState::new(EngineConfig {
            default_count: 2,
            ..EngineConfig::seeded(1)
        });
        let commands = parse_script(Path::new("inline"), r##"ai ["#FF0000", "#0000FF"]"##).unwrap();
        let report = replay(&mut state, &commands).unwrap();
        assert_eq!(
            report.document.explorer_palette,
            vec![Color::from_u32(0xFF0000), Color::from_u32(0x0000FF)]
        );
    }
}

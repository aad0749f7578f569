//! Rule-file parsing.
//!
//! Turns line-oriented rule text into an adjacency map and a command map:
//! - `name: dep1 dep2` declares a target (no leading whitespace, one colon)
//! - a tab-indented line appends a command to the current target's recipe
//! - `#` comments and blank lines are skipped
//!
//! Anything else is a format error carrying its 1-based line number.

use super::error::{FormatIssue, MakeError};
use super::types::*;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// Classification of a single rule-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Command(&'a str),
    Target { name: &'a str, deps: Vec<&'a str> },
    Invalid,
}

/// Classify one line of a rule file.
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with(COMMENT_MARKER) {
        return Line::Comment;
    }
    if line.starts_with(COMMAND_INDENT) {
        return Line::Command(trimmed);
    }
    match split_target(line) {
        Some((name, deps)) => Line::Target { name, deps },
        None => Line::Invalid,
    }
}

/// Split a target line into its name and dependency list.
///
/// Returns `None` for lines with leading whitespace, a colon count other than
/// one, or a name that is empty or contains whitespace.
fn split_target(line: &str) -> Option<(&str, Vec<&str>)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let (name, deps) = line.split_once(':')?;
    if deps.contains(':') {
        return None;
    }
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, deps.split_whitespace().collect()))
}

/// Whether a command string has nothing left once the silent marker is removed.
fn is_empty_command(command: &str) -> bool {
    command
        .strip_prefix(SILENT_MARKER)
        .unwrap_or(command)
        .trim()
        .is_empty()
}

/// Parse rule-file text held in memory.
pub fn parse_rules(text: &str, options: &ParseOptions) -> Result<(Adjacency, CommandMap), MakeError> {
    parse_reader(text.as_bytes(), options)
}

/// Parse a rule file from disk.
pub fn parse_rule_file(
    path: &Path,
    options: &ParseOptions,
) -> Result<(Adjacency, CommandMap), MakeError> {
    let file = std::fs::File::open(path).map_err(|source| MakeError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading rule file");
    parse_reader(std::io::BufReader::new(file), options).map_err(|e| match e {
        MakeError::Io(source) => MakeError::ReadFile {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse rule-file lines from any buffered reader.
pub fn parse_reader<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> Result<(Adjacency, CommandMap), MakeError> {
    let mut adjacency = Adjacency::new();
    let mut commands = CommandMap::new();
    let mut current: Option<String> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        match classify(&line) {
            Line::Blank | Line::Comment => {}
            Line::Target { name, deps } => {
                if adjacency.contains_key(name) {
                    match options.duplicates {
                        DuplicatePolicy::Reject => {
                            return Err(MakeError::DuplicateTarget {
                                name: name.to_string(),
                                line: line_no,
                            });
                        }
                        DuplicatePolicy::Overwrite => {
                            warn!(name, line = line_no, "overriding recipe for target");
                        }
                    }
                }
                adjacency.insert(
                    name.to_string(),
                    deps.into_iter().map(str::to_string).collect(),
                );
                commands.insert(name.to_string(), Vec::new());
                current = Some(name.to_string());
            }
            Line::Command(command) => {
                let Some(target) = current.as_deref() else {
                    return Err(MakeError::Format {
                        line: line_no,
                        issue: FormatIssue::GlobalCommand,
                    });
                };
                if is_empty_command(command) {
                    return Err(MakeError::Format {
                        line: line_no,
                        issue: FormatIssue::EmptyCommand,
                    });
                }
                if let Some(recipe) = commands.get_mut(target) {
                    recipe.push(command.to_string());
                }
            }
            Line::Invalid => {
                return Err(MakeError::Format {
                    line: line_no,
                    issue: FormatIssue::Unrecognized,
                });
            }
        }
    }

    debug!(targets = adjacency.len(), "parsed rule file");
    Ok((adjacency, commands))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<(Adjacency, CommandMap), MakeError> {
        parse_rules(text, &ParseOptions::default())
    }

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_valid() {
        let text = "run: build\n\techo run\n# comment\nbuild:\n\techo build\n";
        let (adj, cmds) = parse(text).unwrap();

        assert_eq!(adj.len(), 2);
        assert_eq!(adj["run"], strs(&["build"]));
        assert!(adj["build"].is_empty());
        assert_eq!(cmds["run"], strs(&["echo run"]));
        assert_eq!(cmds["build"], strs(&["echo build"]));
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let text = "zeta:\n\ttrue\nalpha: zeta\n\ttrue\n";
        let (adj, cmds) = parse(text).unwrap();
        let keys: Vec<_> = adj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        let cmd_keys: Vec<_> = cmds.keys().map(String::as_str).collect();
        assert_eq!(keys, cmd_keys);
    }

    #[test]
    fn test_parse_multiple_deps_and_duplicates_kept() {
        let (adj, _) = parse("all: a  b\ta a\n").unwrap();
        assert_eq!(adj["all"], strs(&["a", "b", "a", "a"]));
    }

    #[test]
    fn test_parse_empty_recipe() {
        let (adj, cmds) = parse("noop:\n").unwrap();
        assert!(adj["noop"].is_empty());
        assert!(cmds["noop"].is_empty());
    }

    #[test]
    fn test_parse_global_command() {
        let err = parse("\necho test\nrun:\n\techo run").unwrap_err();
        assert!(matches!(
            err,
            MakeError::Format {
                line: 2,
                issue: FormatIssue::Unrecognized
            }
        ));

        let err = parse("# header\n\techo test\nrun:\n").unwrap_err();
        assert!(matches!(
            err,
            MakeError::Format {
                line: 2,
                issue: FormatIssue::GlobalCommand
            }
        ));
    }

    #[test]
    fn test_parse_tab_before_target_is_global_command() {
        let err = parse("\n\trun:\n\techo run").unwrap_err();
        assert!(matches!(
            err,
            MakeError::Format {
                line: 2,
                issue: FormatIssue::GlobalCommand
            }
        ));
    }

    #[test]
    fn test_parse_too_many_colons() {
        let err = parse("run: dep1 :dep2\n").unwrap_err();
        assert!(matches!(err, MakeError::Format { line: 1, .. }));
    }

    #[test]
    fn test_parse_multi_word_target() {
        let err = parse("run fast: build\n").unwrap_err();
        assert!(matches!(
            err,
            MakeError::Format {
                line: 1,
                issue: FormatIssue::Unrecognized
            }
        ));
    }

    #[test]
    fn test_parse_space_indented_line_rejected() {
        let err = parse("run:\n    echo run\n").unwrap_err();
        assert!(matches!(err, MakeError::Format { line: 2, .. }));
    }

    #[test]
    fn test_parse_silent_marker_alone() {
        let err = parse("run:\n\t@\n").unwrap_err();
        assert!(matches!(
            err,
            MakeError::Format {
                line: 2,
                issue: FormatIssue::EmptyCommand
            }
        ));
    }

    #[test]
    fn test_parse_silent_command_kept_verbatim() {
        let (_, cmds) = parse("run:\n\t@echo quiet\n").unwrap();
        assert_eq!(cmds["run"], strs(&["@echo quiet"]));
    }

    #[test]
    fn test_parse_indented_comment_skipped() {
        let (_, cmds) = parse("run:\n\t# not a command\n\techo run\n").unwrap();
        assert_eq!(cmds["run"], strs(&["echo run"]));
    }

    #[test]
    fn test_parse_command_with_colon() {
        let (_, cmds) = parse("run:\n\techo a:b:c\n").unwrap();
        assert_eq!(cmds["run"], strs(&["echo a:b:c"]));
    }

    #[test]
    fn test_parse_duplicate_overwrites() {
        let text = "run: a\n\techo one\nbuild:\n\ttrue\nrun: b\n\techo two\n";
        let (adj, cmds) = parse(text).unwrap();
        assert_eq!(adj["run"], strs(&["b"]));
        assert_eq!(cmds["run"], strs(&["echo two"]));
        // redefinition keeps the first position
        assert_eq!(adj.get_index_of("run"), Some(0));
    }

    #[test]
    fn test_parse_duplicate_clears_recipe() {
        let (_, cmds) = parse("run:\n\techo one\nrun:\n").unwrap();
        assert!(cmds["run"].is_empty());
    }

    #[test]
    fn test_parse_duplicate_rejected_when_strict() {
        let err = parse_rules("run:\n\ttrue\n\nrun:\n", &ParseOptions::strict()).unwrap_err();
        match err {
            MakeError::DuplicateTarget { name, line } => {
                assert_eq!(name, "run");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_deterministic() {
        let text = "c: a b\n\techo c\na:\n\techo a\nb: a\n\techo b\n";
        let first = parse(text).unwrap();
        let second = parse(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_empty_input() {
        let (adj, cmds) = parse("").unwrap();
        assert!(adj.is_empty());
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("echo run"), Line::Invalid);
        assert_eq!(
            classify("run: build"),
            Line::Target {
                name: "run",
                deps: vec!["build"]
            }
        );
        assert_eq!(classify("\t echo hi "), Line::Command("echo hi"));
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("  # note"), Line::Comment);
        assert_eq!(classify(":dep"), Line::Invalid);
        assert_eq!(classify(" run:"), Line::Invalid);
    }

    #[test]
    fn test_parse_rule_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Makefile");
        std::fs::write(&path, "run:\n\techo run\n").unwrap();
        let (adj, _) = parse_rule_file(&path, &ParseOptions::default()).unwrap();
        assert!(adj.contains_key("run"));
    }

    #[test]
    fn test_parse_rule_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Makefile");
        std::fs::write(&path, "").unwrap();
        let (adj, _) = parse_rule_file(&path, &ParseOptions::default()).unwrap();
        assert!(adj.is_empty());
    }

    #[test]
    fn test_parse_rule_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        let err = parse_rule_file(&path, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MakeError::ReadFile { .. }));
    }
}

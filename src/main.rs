// SPDX-License-Identifier: MIT
//
// quire — phrase search, word boundaries and line editing from the command
// line.
//
// This binary is a thin shell over quire-engine. Each subcommand loads one
// text, opens it as a document, runs one engine operation and prints the
// result:
//
//   file / stdin → Document → engine operation → stdout
//
// Options use the engine's `--set` syntax (`--set "matchcase mh=500"`).
// Diagnostics go to stderr through tracing; `QUIRE_LOG` takes priority over
// `RUST_LOG`.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use quire_engine::case::CaseTransform;
use quire_engine::document::Document;
use quire_engine::highlight::HighlightStyle;
use quire_engine::options::SearchOptions;
use quire_engine::position::Span;
use quire_engine::word::JumpDirection;

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Option directives in `--set` syntax, e.g. "matchcase maxhighlight=500".
    #[arg(long = "set", global = true, value_name = "DIRECTIVES")]
    set: Vec<String>,

    /// Match case (same as `--set matchcase`).
    #[arg(long, global = true)]
    match_case: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every occurrence of a phrase.
    Find {
        /// File to read, or `-` for stdin.
        file: PathBuf,
        phrase: String,
        /// Caret offset the current occurrence is anchored to.
        #[arg(long, default_value_t = 0)]
        caret: usize,
        /// Selection as START:END.
        #[arg(long, value_parser = parse_range)]
        select: Option<(usize, usize)>,
        /// Step to the next occurrence this many times.
        #[arg(long, default_value_t = 0)]
        next: usize,
        /// Step to the previous occurrence this many times.
        #[arg(long, default_value_t = 0)]
        prev: usize,
        /// Print the highlight commands instead of the occurrence listing.
        #[arg(long)]
        plan: bool,
    },

    /// Print the span a double-click at OFFSET selects.
    SelectWord { file: PathBuf, offset: usize },

    /// Print the caret offset after a word jump from OFFSET.
    JumpWord {
        file: PathBuf,
        offset: usize,
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Duplicate the caret's line (or the selection) and print the text.
    DuplicateLine {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        caret: usize,
        #[arg(long, value_parser = parse_range)]
        select: Option<(usize, usize)>,
    },

    /// Join the caret's line with the next one and print the text.
    JoinLines {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        caret: usize,
    },

    /// Replace every occurrence of a phrase and print the text.
    Replace {
        file: PathBuf,
        phrase: String,
        replacement: String,
    },

    /// Change the case of the selection (or the letters at the caret) and
    /// print the text.
    Case {
        file: PathBuf,
        #[arg(value_enum)]
        transform: Transform,
        #[arg(long, default_value_t = 0)]
        caret: usize,
        #[arg(long, value_parser = parse_range)]
        select: Option<(usize, usize)>,
    },

    /// Print every option value.
    Options,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl From<Direction> for JumpDirection {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Transform {
    Switch,
    Alternate,
    Uniform,
}

impl From<Transform> for CaseTransform {
    fn from(t: Transform) -> Self {
        match t {
            Transform::Switch => Self::Switch,
            Transform::Alternate => Self::Alternate,
            Transform::Uniform => Self::Uniform,
        }
    }
}

/// Parse `START:END`.
fn parse_range(s: &str) -> Result<(usize, usize), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got `{s}`"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("bad start `{start}`: {e}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("bad end `{end}`: {e}"))?;
    Ok((start, end))
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Filter priority: `QUIRE_LOG` > `RUST_LOG` > warn globally, info for quire.
fn log_filter() -> EnvFilter {
    if let Ok(quire_log) = std::env::var("QUIRE_LOG") {
        if quire_log.contains(['=', ',', ':']) {
            return EnvFilter::new(quire_log);
        }
        return EnvFilter::new(format!(
            "warn,quire={quire_log},quire_engine={quire_log}"
        ));
    }
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new("warn,quire=info,quire_engine=info")
}

fn init_logging() {
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .try_init();
}

// ─── Commands ───────────────────────────────────────────────────────────────

/// Options from `--set` directives and `--match-case`. Query output from
/// the directives is appended to `out`.
fn resolve_options(cli: &Cli, out: &mut String) -> Result<SearchOptions> {
    let mut options = SearchOptions::default();
    for directives in &cli.set {
        for line in options
            .apply_str(directives)
            .with_context(|| format!("invalid --set \"{directives}\""))?
        {
            if !line.is_empty() {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }
    if cli.match_case {
        options.match_case = true;
    }
    Ok(options)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn input_path(command: &Command) -> Option<&PathBuf> {
    match command {
        Command::Find { file, .. }
        | Command::SelectWord { file, .. }
        | Command::JumpWord { file, .. }
        | Command::DuplicateLine { file, .. }
        | Command::JoinLines { file, .. }
        | Command::Replace { file, .. }
        | Command::Case { file, .. } => Some(file),
        Command::Options => None,
    }
}

fn select(doc: &mut Document, range: Option<(usize, usize)>) -> Result<()> {
    if let Some((start, end)) = range {
        doc.select_bounds(start, end)
            .with_context(|| format!("cannot select {start}:{end}"))?;
    }
    Ok(())
}

/// Run `cli` over `text` and return what should be printed.
fn execute(cli: &Cli, text: &str) -> Result<String> {
    let mut out = String::new();
    let options = resolve_options(cli, &mut out)?;
    let mut doc = Document::new(text, &options);

    match &cli.command {
        Command::Find {
            phrase,
            caret,
            select: range,
            next,
            prev,
            plan,
            ..
        } => {
            doc.set_caret(*caret);
            select(&mut doc, *range)?;
            doc.session_mut().set_visible(true);
            doc.set_phrase(phrase);
            for _ in 0..*next {
                doc.next();
            }
            for _ in 0..*prev {
                doc.prev();
            }
            if *plan {
                render_plan(&doc, &mut out);
            } else {
                render_occurrences(&doc, &mut out);
            }
        }
        Command::SelectWord { offset, .. } => {
            let span = doc.select_word_at(*offset);
            let _ = writeln!(out, "{span}\t{}", doc.buffer().slice(span));
        }
        Command::JumpWord {
            offset, direction, ..
        } => {
            let target = doc.jump_word(*offset, (*direction).into());
            let _ = writeln!(out, "{target}");
        }
        Command::DuplicateLine {
            caret,
            select: range,
            ..
        } => {
            doc.set_caret(*caret);
            select(&mut doc, *range)?;
            let caret = doc.duplicate_line();
            info!(caret, "duplicated");
            out.push_str(&doc.text());
        }
        Command::JoinLines { caret, .. } => {
            doc.set_caret(*caret);
            let caret = doc.join_lines();
            info!(caret, "joined");
            out.push_str(&doc.text());
        }
        Command::Replace {
            phrase,
            replacement,
            ..
        } => {
            let replaced = doc.replace_all(phrase, replacement);
            info!(replaced, "replaced");
            out.push_str(&doc.text());
        }
        Command::Case {
            transform,
            caret,
            select: range,
            ..
        } => {
            doc.set_caret(*caret);
            select(&mut doc, *range)?;
            let span = doc.transform_case((*transform).into());
            info!(%span, "changed case");
            out.push_str(&doc.text());
        }
        Command::Options => {
            out.extend(options_listing(&options));
        }
    }

    Ok(out)
}

fn options_listing(options: &SearchOptions) -> Option<String> {
    let mut options = *options;
    options
        .apply_str("all")
        .ok()
        .map(|lines| lines.join("\n") + "\n")
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Width of the `"* 12345:1234  "` prefix in the occurrence listing.
const PREFIX_WIDTH: usize = 14;

/// One line per occurrence with its line text and a `^` underline. The
/// current occurrence is marked with `*`.
fn render_occurrences(doc: &Document, out: &mut String) {
    let buf = doc.buffer();
    let current = doc.session().current();

    let _ = writeln!(out, "{}", doc.count_label());
    for occurrence in doc.session().occurrences() {
        let pos = buf.position_of(occurrence.start);
        let line = buf.line(pos.line).map_or(Span::point(0), |l| l.content());
        let marker = if current == Some(*occurrence) { '*' } else { ' ' };

        let content = display(&buf.slice(line));
        let before = display(&buf.slice(Span::new(line.start, occurrence.start)));
        let matched_end = occurrence.end.min(line.end);
        let matched = display(&buf.slice(Span::new(occurrence.start, matched_end)));

        let _ = writeln!(out, "{marker} {:>5}:{:<4}  {content}", pos.line + 1, pos.col + 1);
        let _ = writeln!(
            out,
            "{}{}",
            " ".repeat(PREFIX_WIDTH + before.width()),
            "^".repeat(matched.width().max(1))
        );
    }
}

/// The highlight commands and selection of the live plan.
fn render_plan(doc: &Document, out: &mut String) {
    let plan = doc.session().highlights();
    let _ = writeln!(out, "{}", doc.count_label());
    for command in &plan.commands {
        let style = match command.style {
            HighlightStyle::Match => "match",
            HighlightStyle::Current => "current",
        };
        let _ = writeln!(out, "{style}\t{}", command.span);
    }
    if let Some(selection) = doc.selection() {
        let _ = writeln!(out, "selection\t{selection}");
    }
}

/// Text as shown in the listing: tabs become single spaces and line
/// terminators are dropped, so widths line up with the underline.
fn display(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<()> {
    let text = match input_path(&cli.command) {
        Some(path) => read_input(path)?,
        None => String::new(),
    };
    let out = execute(cli, &text)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(out.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to write output")
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("quire: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["quire"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    fn exec(args: &[&str], text: &str) -> String {
        execute(&cli(args), text).unwrap()
    }

    // ── Argument parsing ──────────────────────────────────────────────────

    #[test]
    fn parse_range_values() {
        assert_eq!(parse_range("3:7"), Ok((3, 7)));
        assert_eq!(parse_range(" 0 : 12 "), Ok((0, 12)));
        assert!(parse_range("3-7").is_err());
        assert!(parse_range("a:7").is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let c = cli(&["find", "f.txt", "x", "--match-case", "--set", "mh=5"]);
        assert!(c.match_case);
        assert_eq!(c.set, vec!["mh=5"]);
    }

    // ── find ──────────────────────────────────────────────────────────────

    #[test]
    fn find_lists_occurrences() {
        let out = exec(&["find", "-", "abc"], "abcabcabc");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "1/3 results");
        assert_eq!(lines[1], "*     1:1     abcabcabc");
        assert_eq!(lines[2], format!("{}^^^", " ".repeat(PREFIX_WIDTH)));
        assert_eq!(lines[4], format!("{}^^^", " ".repeat(PREFIX_WIDTH + 3)));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn find_next_moves_current() {
        let out = exec(&["find", "-", "ab", "--next", "1"], "ab\nab\nab");
        assert!(out.starts_with("2/3 results\n"));
        assert!(out.contains("*     2:1     ab"));
    }

    #[test]
    fn find_case_sensitive_flag() {
        assert!(exec(&["find", "-", "The"], "the THE ThE").starts_with("1/3 results"));
        assert!(exec(&["find", "-", "The", "--match-case"], "the The THE")
            .starts_with("1/1 results"));
        assert!(exec(&["find", "-", "The", "--set", "mc"], "the THE ThE")
            .starts_with("0/0 results"));
    }

    #[test]
    fn find_plan_respects_budget() {
        let out = exec(&["find", "-", "x", "--plan", "--set", "mh=2"], "x x x");
        assert_eq!(out, "1/3 results\ncurrent\t0..1\n");
    }

    #[test]
    fn find_plan_after_next_selects() {
        let out = exec(&["find", "-", "x", "--plan", "--next", "1"], "x x");
        assert_eq!(out, "2/2 results\nmatch\t0..1\nselection\t2..3\n");
    }

    #[test]
    fn find_empty_phrase_has_no_results() {
        assert_eq!(exec(&["find", "-", ""], "abc"), "0/0 results\n");
    }

    #[test]
    fn bad_selection_is_an_error() {
        let err = execute(&cli(&["find", "-", "a", "--select", "5:2"]), "abcdef").unwrap_err();
        assert!(format!("{err:#}").contains("cannot select 5:2"));
    }

    // ── Word and line commands ────────────────────────────────────────────

    #[test]
    fn select_word_number() {
        assert_eq!(exec(&["select-word", "-", "9"], "price: 3.14kg"), "7..11\t3.14\n");
    }

    #[test]
    fn jump_word_right() {
        assert_eq!(exec(&["jump-word", "-", "0", "right"], "hello world"), "5\n");
    }

    #[test]
    fn duplicate_and_join() {
        assert_eq!(exec(&["duplicate-line", "-", "--caret", "1"], "ab\ncd"), "ab\nab\ncd");
        assert_eq!(exec(&["join-lines", "-"], "ab\ncd"), "abcd");
    }

    #[test]
    fn replace_and_case() {
        assert_eq!(exec(&["replace", "-", "cat", "dog"], "Cat cat"), "dog dog");
        assert_eq!(
            exec(&["case", "-", "uniform", "--select", "0:3"], "one two"),
            "ONE two"
        );
    }

    // ── Options ───────────────────────────────────────────────────────────

    #[test]
    fn options_listing_shows_changes() {
        assert_eq!(
            exec(&["options", "--set", "mc hi=3"], ""),
            "matchcase  maxhighlight=2000  history=3\n"
        );
    }

    #[test]
    fn option_queries_are_printed() {
        assert_eq!(
            exec(&["options", "--set", "mh?"], ""),
            "maxhighlight=2000\nnomatchcase  maxhighlight=2000  history=10\n"
        );
    }

    #[test]
    fn bad_option_is_an_error() {
        let err = execute(&cli(&["options", "--set", "bogus"]), "").unwrap_err();
        assert!(format!("{err:#}").contains("Unknown option: bogus"));
    }
}

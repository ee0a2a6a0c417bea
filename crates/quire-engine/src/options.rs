//! Search options and the `--set` mini-language that edits them.
//!
//! A directive string is a list of whitespace-separated words. Each word is
//! read by [`parse_set_arg`]:
//!
//! | Word          | Meaning                                            |
//! |---------------|----------------------------------------------------|
//! | `name=value`  | assign                                             |
//! | `name?`       | print the current value                            |
//! | `name!`       | flip a flag                                        |
//! | `noname`      | clear a flag                                       |
//! | `name`        | set a flag, or print a count                       |
//! | `all`         | print every option                                 |
//!
//! A blank string prints the options that differ from their defaults.
//!
//! | Option         | Short | Kind  | Default |
//! |----------------|-------|-------|---------|
//! | `matchcase`    | `mc`  | flag  | false   |
//! | `maxhighlight` | `mh`  | count | 2000    |
//! | `history`      | `hi`  | count | 10      |

use crate::error::OptionError;
use crate::highlight::MAX_HIGHLIGHT_OCCURRENCES;
use crate::history::HISTORY_MAX;

/// One parsed word of a `--set` string. Names are kept as written; they are
/// resolved when [`SearchOptions::apply`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    On(String),
    Off(String),
    Toggle(String),
    Query(String),
    Assign(String, String),
    /// Blank input.
    ShowChanged,
    ShowAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Flag,
    Count,
}

/// `(name, short name, kind)` for every option, in listing order.
const OPTION_TABLE: [(&str, &str, Kind); 3] = [
    ("matchcase", "mc", Kind::Flag),
    ("maxhighlight", "mh", Kind::Count),
    ("history", "hi", Kind::Count),
];

fn resolve(name: &str) -> Option<(&'static str, Kind)> {
    OPTION_TABLE
        .iter()
        .find(|(full, short, _)| name == *full || name == *short)
        .map(|&(full, _, kind)| (full, kind))
}

#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(resolve(name), Some((_, Kind::Flag)))
}

#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    matches!(resolve(name), Some((_, Kind::Count)))
}

#[must_use]
pub fn is_known_option(name: &str) -> bool {
    resolve(name).is_some()
}

/// Split a `--set` string into directives.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let words: Vec<_> = args.split_whitespace().map(parse_set_arg).collect();
    if words.is_empty() {
        vec![SetDirective::ShowChanged]
    } else {
        words
    }
}

/// Read one word of a `--set` string.
///
/// Words that name no option still parse; the unknown name is reported when
/// the directive is applied. `no` is only a negation in front of a flag, so
/// `nofoo` stays the name `nofoo`.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.into(), value.into());
    }

    let (name, mark) = match arg.as_bytes().last() {
        Some(&b @ (b'?' | b'!')) => (&arg[..arg.len() - 1], Some(b)),
        _ => (arg, None),
    };

    match (mark, resolve(name)) {
        (Some(b'?'), _) => SetDirective::Query(name.into()),
        (Some(_), _) => SetDirective::Toggle(name.into()),
        (None, Some((_, Kind::Count))) => SetDirective::Query(name.into()),
        (None, Some((_, Kind::Flag))) => SetDirective::On(name.into()),
        (None, None) if name == "all" => SetDirective::ShowAll,
        (None, None) => match name.strip_prefix("no").filter(|rest| is_bool_option(rest)) {
            Some(flag) => SetDirective::Off(flag.into()),
            None => SetDirective::On(name.into()),
        },
    }
}

/// `matchcase` or `nomatchcase`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    let prefix = if value { "" } else { "no" };
    format!("{prefix}{name}")
}

// ---------------------------------------------------------------------------
// SearchOptions
// ---------------------------------------------------------------------------

/// Settings shared by every search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Case sensitivity of new sessions.
    pub match_case: bool,
    /// Highlight budget: past this many occurrences only the current one is
    /// highlighted.
    pub max_highlight: usize,
    /// Number of phrases kept in each session's history.
    pub history: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_case: false,
            max_highlight: MAX_HIGHLIGHT_OCCURRENCES,
            history: HISTORY_MAX,
        }
    }
}

impl SearchOptions {
    /// Apply one directive.
    ///
    /// Returns the text to show the user, if any: the value for queries, the
    /// option listing for `ShowAll` / `ShowChanged`.
    ///
    /// # Errors
    ///
    /// [`OptionError::Unknown`] for unknown names, [`OptionError::NotBoolean`]
    /// when a numeric option is switched on, off or toggled, and
    /// [`OptionError::InvalidValue`] for assignments that don't parse or are
    /// out of range.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, OptionError> {
        match directive {
            SetDirective::ShowAll => {
                let all = OPTION_TABLE.iter().map(|&(full, _, _)| full);
                Ok(Some(self.describe(all)))
            }
            SetDirective::ShowChanged => {
                let defaults = Self::default();
                let changed = OPTION_TABLE
                    .iter()
                    .map(|&(full, _, _)| full)
                    .filter(|name| self.display(name) != defaults.display(name));
                Ok(Some(self.describe(changed)))
            }
            SetDirective::Query(name) => {
                let name = lookup(name)?;
                Ok(Some(self.display(name)))
            }
            SetDirective::On(name) => self.set_bool(name, |_| true),
            SetDirective::Off(name) => self.set_bool(name, |_| false),
            SetDirective::Toggle(name) => self.set_bool(name, |v| !v),
            SetDirective::Assign(name, value) => {
                let canon = lookup(name)?;
                let invalid = || OptionError::InvalidValue {
                    name: name.clone(),
                    value: value.clone(),
                };
                match canon {
                    "matchcase" => {
                        self.match_case = match value.as_str() {
                            "true" | "on" | "1" => true,
                            "false" | "off" | "0" => false,
                            _ => return Err(invalid()),
                        };
                    }
                    "maxhighlight" => {
                        self.max_highlight = value.parse().map_err(|_| invalid())?;
                    }
                    _ => {
                        let n: usize = value.parse().map_err(|_| invalid())?;
                        if n == 0 {
                            return Err(invalid());
                        }
                        self.history = n;
                    }
                }
                Ok(None)
            }
        }
    }

    /// Parse and apply a whole directive string, collecting display output.
    ///
    /// # Errors
    ///
    /// Stops at the first directive that fails; earlier ones stay applied.
    pub fn apply_str(&mut self, args: &str) -> Result<Vec<String>, OptionError> {
        let mut output = Vec::new();
        for directive in parse_set(args) {
            output.extend(self.apply(&directive)?);
        }
        Ok(output)
    }

    fn set_bool(
        &mut self,
        name: &str,
        f: impl FnOnce(bool) -> bool,
    ) -> Result<Option<String>, OptionError> {
        match lookup(name)? {
            "matchcase" => {
                self.match_case = f(self.match_case);
                Ok(None)
            }
            _ => Err(OptionError::NotBoolean(name.to_string())),
        }
    }

    fn display(&self, canon: &str) -> String {
        match canon {
            "matchcase" => format_bool("matchcase", self.match_case),
            "maxhighlight" => format!("maxhighlight={}", self.max_highlight),
            _ => format!("history={}", self.history),
        }
    }

    fn describe<'a>(&self, names: impl Iterator<Item = &'a str>) -> String {
        names.map(|n| self.display(n)).collect::<Vec<_>>().join("  ")
    }
}

fn lookup(name: &str) -> Result<&'static str, OptionError> {
    resolve(name)
        .map(|(full, _)| full)
        .ok_or_else(|| OptionError::Unknown(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::logger::LogLevel;

const DEFAULT_CODE_PREFIX: &str = "TS";
const INDENT: &str = "  ";

/// How serious a [`Diagnostic`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// The input is invalid.
    Error,
    /// The input is valid but probably not what was meant.
    Warning,
    /// An editor hint. Never shown in command-line output.
    Suggestion,
    /// Informational output.
    Message,
}

impl DiagnosticCategory {
    /// The level diagnostics of this category are logged at, if they are logged at all.
    pub fn log_level(self) -> Option<LogLevel> {
        match self {
            DiagnosticCategory::Error => Some(LogLevel::Error),
            DiagnosticCategory::Warning => Some(LogLevel::Warn),
            DiagnosticCategory::Message => Some(LogLevel::Info),
            DiagnosticCategory::Suggestion => None,
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        f.write_str(name)
    }
}

/// A position in a source file. Lines and columns are zero-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The file the diagnostic points into.
    pub file: PathBuf,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column.
    pub column: usize,
}

/// The text of a diagnostic, optionally elaborated by nested messages.
///
/// Compilers use chains to explain _why_ something failed, e.g. an assignment error followed
/// by the property whose types differ.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageChain {
    /// The message at this level of the chain.
    pub text: String,
    /// Messages elaborating on this one.
    pub next: Vec<MessageChain>,
}

impl MessageChain {
    /// Adds `next` as an elaboration of this message.
    pub fn with_next(mut self, next: MessageChain) -> Self {
        self.next.push(next);
        self
    }

    /// Flattens the chain into text, one message per line, each nested level indented by two
    /// more spaces than its parent.
    pub fn flatten(&self, new_line: &str) -> String {
        let mut out = String::new();
        self.flatten_into(&mut out, new_line, 0);
        out
    }

    fn flatten_into(&self, out: &mut String, new_line: &str, depth: usize) {
        if depth > 0 {
            out.push_str(new_line);
            for _ in 0..depth {
                out.push_str(INDENT);
            }
        }
        out.push_str(&self.text);
        for next in &self.next {
            next.flatten_into(out, new_line, depth + 1);
        }
    }
}

impl From<&str> for MessageChain {
    fn from(text: &str) -> Self {
        String::from(text).into()
    }
}

impl From<String> for MessageChain {
    fn from(text: String) -> Self {
        Self {
            text,
            next: Vec::new(),
        }
    }
}

/// A structured message produced by a compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the diagnostic is.
    pub category: DiagnosticCategory,
    /// The compiler's numeric code for this kind of diagnostic.
    pub code: u32,
    /// Where in the sources the diagnostic points, if anywhere.
    pub location: Option<SourceLocation>,
    /// What the diagnostic says.
    pub message: MessageChain,
}

impl Diagnostic {
    /// Creates a diagnostic that is not tied to a source location.
    pub fn new<M>(category: DiagnosticCategory, code: u32, message: M) -> Self
    where
        M: Into<MessageChain>,
    {
        Self {
            category,
            code,
            location: None,
            message: message.into(),
        }
    }

    /// Points the diagnostic at a zero-based `line` and `column` of `file`.
    pub fn at<P>(mut self, file: P, line: usize, column: usize) -> Self
    where
        P: Into<PathBuf>,
    {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
            column,
        });
        self
    }

    /// Formats the diagnostic the way a compiler prints it on the command line:
    ///
    /// ```text
    /// src/index.ts(3,7): error TS2322: Type 'string' is not assignable to type 'number'.
    /// ```
    ///
    /// The output ends with [`FormatOptions::new_line`].
    pub fn format(&self, opt: &FormatOptions) -> String {
        let mut out = String::new();
        if let Some(ref location) = self.location {
            out.push_str(&format!(
                "{}({},{}): ",
                relative_path(&location.file, &opt.current_dir).display(),
                location.line + 1,
                location.column + 1
            ));
        }
        out.push_str(&format!(
            "{} {}{}: {}{}",
            self.category,
            opt.code_prefix,
            self.code,
            self.message.flatten(&opt.new_line),
            opt.new_line
        ));
        out
    }
}

/// Configure how diagnostics are turned into text.
#[derive(Clone, Debug)]
pub struct FormatOptions {
    /// Files with an absolute path are printed relative to this directory, using `..` to climb
    /// out of it where needed. Default is the working directory of the process.
    pub current_dir: PathBuf,

    /// The line terminator used between chained messages and after the diagnostic. Default is
    /// `"\n"`.
    pub new_line: String,

    /// Printed in front of the diagnostic code. Default is `"TS"`.
    pub code_prefix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            current_dir: env::current_dir().unwrap_or_default(),
            new_line: "\n".to_string(),
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
        }
    }
}

// Rooted files are shown relative to `current_dir`, climbing out of it with `..` where needed.
// Files that are already relative, or that share no root with `current_dir`, are kept as given.
fn relative_path(file: &Path, current_dir: &Path) -> PathBuf {
    if !file.has_root() || !current_dir.has_root() {
        return file.to_path_buf();
    }

    let mut file_components = file.components().peekable();
    let mut dir_components = current_dir.components().peekable();
    let mut shared = 0;
    while let (Some(a), Some(b)) = (file_components.peek(), dir_components.peek()) {
        if a != b {
            break;
        }
        file_components.next();
        dir_components.next();
        shared += 1;
    }
    if shared == 0 {
        return file.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for component in dir_components {
        if component != Component::CurDir {
            relative.push("..");
        }
    }
    relative.extend(file_components);
    relative
}

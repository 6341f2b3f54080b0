use std::fmt;
use std::str::FromStr;

use crate::diagnostic::{Diagnostic, FormatOptions};

const DEFAULT_TARGET: &str = "logcheck";

/// The severity of a logged message.
///
/// Levels are ordered from least to most severe, so `LogLevel::Warn > LogLevel::Info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Debug output that is normally hidden.
    Verbose,
    /// Progress and other informational output.
    #[default]
    Info,
    /// Something looks wrong, but processing continues.
    Warn,
    /// The input could not be processed as requested.
    Error,
}

impl LogLevel {
    /// The prefix a [`Recorder`](crate::recorder::Recorder) puts in front of messages logged at
    /// this level.
    pub fn prefix(self) -> &'static str {
        match self {
            LogLevel::Error => "error: ",
            LogLevel::Warn => "warn: ",
            LogLevel::Info => "info: ",
            LogLevel::Verbose => "debug: ",
        }
    }

    /// The level of the `log` facade that messages at this level are emitted at.
    pub fn as_log_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Verbose => log::Level::Debug,
        }
    }

    /// Finds the level whose prefix starts `line`, returning it with the rest of the line.
    pub fn strip_prefix(line: &str) -> Option<(LogLevel, &str)> {
        [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Verbose,
        ]
        .into_iter()
        .find_map(|level| line.strip_prefix(level.prefix()).map(|rest| (level, rest)))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "verbose" | "debug" => Ok(LogLevel::Verbose),
            unknown => Err(format!("unknown log level: {}", unknown)),
        }
    }
}

/// The abstract behavior of a logger used by compiler tooling.
///
/// Implementors only need to provide [`log`](Logger::log) and the error/warning counters; the
/// level helpers and diagnostic handling are built on top of those.
pub trait Logger {
    /// Logs `message` at `level`.
    fn log(&mut self, message: &str, level: LogLevel);

    /// The number of errors logged since the last [`reset_errors`](Logger::reset_errors).
    fn error_count(&self) -> usize;

    /// The number of warnings logged since the last [`reset_warnings`](Logger::reset_warnings).
    fn warning_count(&self) -> usize;

    /// Resets the error counter to zero.
    fn reset_errors(&mut self);

    /// Resets the warning counter to zero.
    fn reset_warnings(&mut self);

    /// Logs `message` as an error.
    fn error(&mut self, message: &str) {
        self.log(message, LogLevel::Error);
    }

    /// Logs `message` as a warning.
    fn warn(&mut self, message: &str) {
        self.log(message, LogLevel::Warn);
    }

    /// Logs `message` as informational output.
    fn info(&mut self, message: &str) {
        self.log(message, LogLevel::Info);
    }

    /// Logs `message` as debug output.
    fn verbose(&mut self, message: &str) {
        self.log(message, LogLevel::Verbose);
    }

    /// Whether any errors have been logged since the counter was last reset.
    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether any warnings have been logged since the counter was last reset.
    fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Logs a compiler diagnostic.
    ///
    /// Errors are logged as errors, warnings as warnings and messages as informational output.
    /// Diagnostics of any other category (suggestions) are not logged at all.
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        if let Some(level) = diagnostic.category.log_level() {
            let output = diagnostic.format(&FormatOptions::default());
            self.log(&output, level);
        }
    }

    /// Logs every diagnostic in `diagnostics`, in order.
    fn diagnostics<'a, I>(&mut self, diagnostics: I)
    where
        I: IntoIterator<Item = &'a Diagnostic>,
        Self: Sized,
    {
        for diagnostic in diagnostics {
            self.diagnostic(diagnostic);
        }
    }
}

/// Configure the base logger.
#[derive(Clone, Debug)]
pub struct Options {
    /// Messages below this level are not passed on to the `log` facade. They still count
    /// towards the error and warning counters. Default is `LogLevel::Info`.
    pub level: LogLevel,

    /// The `log` target messages are emitted under. Default is `"logcheck"`.
    pub target: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            target: DEFAULT_TARGET.to_string(),
        }
    }
}

/// A [`Logger`] that emits messages through the [`log`] facade.
///
/// Whatever logger the application installed (for example `env_logger`) decides where the
/// messages end up. `LogFacade` only keeps count of the errors and warnings that went past.
#[derive(Debug, Default)]
pub struct LogFacade {
    opt: Options,
    errors: usize,
    warnings: usize,
}

impl From<Options> for LogFacade {
    fn from(opt: Options) -> Self {
        Self {
            opt,
            errors: 0,
            warnings: 0,
        }
    }
}

impl LogFacade {
    /// The options this logger was created with.
    pub fn options(&self) -> &Options {
        &self.opt
    }
}

impl Logger for LogFacade {
    fn log(&mut self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Error => self.errors += 1,
            LogLevel::Warn => self.warnings += 1,
            LogLevel::Info | LogLevel::Verbose => {}
        }

        if level < self.opt.level {
            return;
        }
        log!(target: self.opt.target.as_str(), level.as_log_level(), "{}", message);
    }

    fn error_count(&self) -> usize {
        self.errors
    }

    fn warning_count(&self) -> usize {
        self.warnings
    }

    fn reset_errors(&mut self) {
        self.errors = 0;
    }

    fn reset_warnings(&mut self) {
        self.warnings = 0;
    }
}

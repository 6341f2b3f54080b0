use thiserror::Error;

use crate::diagnostic::{Diagnostic, FormatOptions};
use crate::logger::{LogFacade, LogLevel, Logger};
use crate::pattern::Pattern;

const NONE_LOGGED: &str = "(none logged)";

/// A failed assertion about the recorded messages.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpectationError {
    /// No recorded message matched the expected pattern.
    #[error(
        "Expected \"{pattern}\" to be logged. The logged messages were:\n\t{}",
        list_messages(.logged)
    )]
    UnmatchedExpectation {
        /// The pattern that did not match.
        pattern: String,
        /// Everything that was recorded at the time of the assertion.
        logged: Vec<String>,
    },

    /// Messages were left over that no assertion accounted for.
    #[error(
        "Expected no other messages to be logged. The remaining messages were:\n\t{}",
        list_messages(.remaining)
    )]
    UnexpectedMessagesRemain {
        /// The messages that were left over.
        remaining: Vec<String>,
    },

    /// The pattern could not be compiled.
    #[error("Expected pattern \"{pattern}\" could not be compiled: {reason}")]
    InvalidPattern {
        /// The pattern as it was written.
        pattern: String,
        /// Why compiling it failed.
        reason: String,
    },
}

fn list_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        NONE_LOGGED.to_string()
    } else {
        messages.join("\n\t")
    }
}

/// A [`Logger`] that records every message for later inspection by a test.
///
/// Each message is passed on to the wrapped base logger first, so the usual output and error
/// counting still happen, and then stored with its level's [prefix](LogLevel::prefix). The
/// `expect_*` methods consume stored messages; a test should finish with
/// [`expect_no_other_messages`](Recorder::expect_no_other_messages).
#[derive(Debug)]
pub struct Recorder<L = LogFacade> {
    base: L,
    format: FormatOptions,
    messages: Vec<String>,
}

impl Recorder<LogFacade> {
    /// Creates a recorder around a default [`LogFacade`].
    pub fn new() -> Self {
        Self::with_base(LogFacade::default())
    }
}

impl Default for Recorder<LogFacade> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Logger> From<L> for Recorder<L> {
    fn from(base: L) -> Self {
        Self::with_base(base)
    }
}

impl<L: Logger> Recorder<L> {
    /// Creates a recorder that passes every message on to `base`.
    pub fn with_base(base: L) -> Self {
        Self {
            base,
            format: FormatOptions::default(),
            messages: Vec::new(),
        }
    }

    /// Sets how diagnostics are formatted before they are recorded.
    pub fn with_format_options(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// The messages recorded and not yet consumed, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The wrapped base logger.
    pub fn base(&self) -> &L {
        &self.base
    }

    /// The wrapped base logger.
    pub fn base_mut(&mut self) -> &mut L {
        &mut self.base
    }

    /// Unwraps the base logger, dropping any recorded messages.
    pub fn into_inner(self) -> L {
        self.base
    }

    /// Resets the error and warning counters and forgets all recorded messages.
    pub fn reset(&mut self) {
        self.reset_errors();
        self.reset_warnings();
        self.messages.clear();
    }

    /// Forgets all recorded debug messages. The order of the remaining messages is kept.
    pub fn discard_debug_messages(&mut self) {
        let prefix = LogLevel::Verbose.prefix();
        self.messages.retain(|m| !m.starts_with(prefix));
    }

    /// Consumes the oldest recorded message matching the glob `pattern`.
    ///
    /// # Panics
    ///
    /// Panics, listing every recorded message, if no message matches.
    #[track_caller]
    pub fn expect_message(&mut self, pattern: &str) {
        if let Err(e) = self.try_expect_message(pattern) {
            panic!("{}", e);
        }
    }

    /// Consumes the oldest recorded message matching the glob `pattern`, or returns an error
    /// describing what was recorded instead.
    ///
    /// See [`Pattern`] for the pattern syntax.
    pub fn try_expect_message(&mut self, pattern: &str) -> Result<(), ExpectationError> {
        let compiled = Pattern::new(pattern).map_err(|e| ExpectationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        match compiled.position(&self.messages) {
            Some(index) => {
                self.messages.remove(index);
                Ok(())
            }
            None => Err(ExpectationError::UnmatchedExpectation {
                pattern: pattern.to_string(),
                logged: self.messages.clone(),
            }),
        }
    }

    /// Asserts that every recorded message has been consumed.
    ///
    /// # Panics
    ///
    /// Panics, listing the remaining messages, if any are left.
    #[track_caller]
    pub fn expect_no_other_messages(&self) {
        if let Err(e) = self.try_expect_no_other_messages() {
            panic!("{}", e);
        }
    }

    /// Returns an error listing the remaining messages if any are left.
    pub fn try_expect_no_other_messages(&self) -> Result<(), ExpectationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ExpectationError::UnexpectedMessagesRemain {
                remaining: self.messages.clone(),
            })
        }
    }
}

impl<L: Logger> Logger for Recorder<L> {
    fn log(&mut self, message: &str, level: LogLevel) {
        self.base.log(message, level);
        self.messages.push(format!("{}{}", level.prefix(), message));
    }

    fn error_count(&self) -> usize {
        self.base.error_count()
    }

    fn warning_count(&self) -> usize {
        self.base.warning_count()
    }

    fn reset_errors(&mut self) {
        self.base.reset_errors();
    }

    fn reset_warnings(&mut self) {
        self.base.reset_warnings();
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        if let Some(level) = diagnostic.category.log_level() {
            let output = diagnostic.format(&self.format);
            self.log(&output, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::diagnostic::DiagnosticCategory;

    fn recorder_with(messages: &[(&str, LogLevel)]) -> Recorder {
        let mut logger = Recorder::new();
        for &(message, level) in messages {
            logger.log(message, level);
        }
        logger
    }

    #[test]
    fn log_records_with_prefix() {
        let logger = recorder_with(&[
            ("a", LogLevel::Error),
            ("b", LogLevel::Warn),
            ("c", LogLevel::Info),
            ("d", LogLevel::Verbose),
        ]);
        assert_eq!(
            logger.messages(),
            &["error: a", "warn: b", "info: c", "debug: d"]
        );
    }

    #[test]
    fn record_then_expect_restores_buffer() {
        let mut logger = recorder_with(&[("first", LogLevel::Info)]);
        let before = logger.messages().to_vec();

        logger.log("star * and dot .", LogLevel::Warn);
        logger.expect_message("warn: star * and dot .");
        assert_eq!(logger.messages(), before.as_slice());
    }

    #[test]
    fn expect_consumes_first_match_only() {
        let mut logger = recorder_with(&[
            ("foo 1", LogLevel::Info),
            ("bar", LogLevel::Info),
            ("foo 2", LogLevel::Info),
            ("foo 1", LogLevel::Info),
        ]);
        logger.expect_message("info: foo*");
        assert_eq!(logger.messages(), &["info: bar", "info: foo 2", "info: foo 1"]);
        logger.expect_message("info: foo 1");
        assert_eq!(logger.messages(), &["info: bar", "info: foo 2"]);
    }

    #[test]
    fn discard_debug_messages_keeps_order() {
        let mut logger = recorder_with(&[
            ("a", LogLevel::Verbose),
            ("b", LogLevel::Error),
            ("c", LogLevel::Verbose),
            ("d", LogLevel::Info),
            ("e", LogLevel::Warn),
        ]);
        logger.discard_debug_messages();
        assert_eq!(logger.messages(), &["error: b", "info: d", "warn: e"]);
    }

    #[test]
    fn scenario() {
        let mut logger = recorder_with(&[
            ("a", LogLevel::Error),
            ("b", LogLevel::Warn),
            ("c", LogLevel::Verbose),
        ]);
        logger.discard_debug_messages();
        assert_eq!(logger.messages(), &["error: a", "warn: b"]);
        logger.expect_message("error: a");
        assert_eq!(logger.messages(), &["warn: b"]);
        logger.expect_message("warn: *");
        assert!(logger.messages().is_empty());
        logger.expect_no_other_messages();
    }

    #[test]
    fn unmatched_on_empty_buffer() {
        let mut logger = Recorder::new();
        let err = logger.try_expect_message("missing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected \"missing\" to be logged. The logged messages were:\n\t(none logged)"
        );
    }

    #[test]
    fn unmatched_lists_everything() {
        let mut logger = recorder_with(&[("a", LogLevel::Error), ("b", LogLevel::Info)]);
        let err = logger.try_expect_message("warn: *").unwrap_err();
        assert_eq!(
            err,
            ExpectationError::UnmatchedExpectation {
                pattern: "warn: *".to_string(),
                logged: vec!["error: a".to_string(), "info: b".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "Expected \"warn: *\" to be logged. The logged messages were:\n\terror: a\n\tinfo: b"
        );
        assert_eq!(logger.messages().len(), 2);
    }

    #[test]
    fn large_message_round_trip() {
        let text = "x".repeat(2_000_000);
        let mut logger = recorder_with(&[(text.as_str(), LogLevel::Info)]);
        assert_eq!(logger.try_expect_message(&format!("info: {}", text)), Ok(()));
        assert!(logger.messages().is_empty());

        let starred = format!("{}*{}", "y".repeat(300_000), "z".repeat(300_000));
        logger.log(&starred, LogLevel::Warn);
        logger.expect_message(&format!("warn: {}", starred));
        logger.expect_no_other_messages();
    }

    #[test]
    fn invalid_pattern_message() {
        let err = ExpectationError::InvalidPattern {
            pattern: "warn: *".to_string(),
            reason: "too big".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected pattern \"warn: *\" could not be compiled: too big"
        );
    }

    #[test]
    #[should_panic(expected = "(none logged)")]
    fn expect_message_panics_when_nothing_logged() {
        Recorder::new().expect_message("missing");
    }

    #[test]
    fn no_other_messages() {
        let logger = Recorder::new();
        assert_eq!(logger.try_expect_no_other_messages(), Ok(()));

        let logger = recorder_with(&[("x", LogLevel::Info), ("y", LogLevel::Verbose)]);
        let err = logger.try_expect_no_other_messages().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected no other messages to be logged. The remaining messages were:\n\tinfo: x\n\tdebug: y"
        );
    }

    #[test]
    #[should_panic(expected = "info: leftover")]
    fn expect_no_other_messages_panics() {
        recorder_with(&[("leftover", LogLevel::Info)]).expect_no_other_messages();
    }

    #[test]
    fn reset_clears_counters_and_messages() {
        let mut logger = recorder_with(&[
            ("a", LogLevel::Error),
            ("b", LogLevel::Warn),
            ("c", LogLevel::Warn),
        ]);
        assert_eq!(logger.error_count(), 1);
        assert_eq!(logger.warning_count(), 2);

        logger.reset();
        assert_eq!(logger.error_count(), 0);
        assert_eq!(logger.warning_count(), 0);
        assert!(logger.messages().is_empty());
    }

    #[test]
    fn diagnostics_are_recorded_by_category() {
        let mut logger = Recorder::new().with_format_options(FormatOptions {
            current_dir: PathBuf::from("/src"),
            ..Default::default()
        });

        logger.diagnostic(
            &Diagnostic::new(DiagnosticCategory::Error, 1, "e").at("/src/a.ts", 0, 4),
        );
        logger.diagnostic(&Diagnostic::new(DiagnosticCategory::Warning, 2, "w"));
        logger.diagnostic(&Diagnostic::new(DiagnosticCategory::Message, 3, "m"));
        logger.diagnostic(&Diagnostic::new(DiagnosticCategory::Suggestion, 4, "s"));

        assert_eq!(
            logger.messages(),
            &[
                "error: a.ts(1,5): error TS1: e\n",
                "warn: warning TS2: w\n",
                "info: message TS3: m\n",
            ]
        );
        assert_eq!(logger.error_count(), 1);
        assert_eq!(logger.warning_count(), 1);

        logger.expect_message("error: a.ts(1,5): error TS1: *");
        logger.expect_message("warn: *");
        logger.expect_message("info: *TS3*");
        logger.expect_no_other_messages();
    }
}

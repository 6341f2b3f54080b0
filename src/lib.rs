//! Logcheck records the messages a compiler-tooling process logs and lets tests assert on them.
//!
//! Tools that report problems to their users usually do so through a logger: errors for
//! invalid input, warnings for things that look suspicious, informational messages for
//! progress, and verbose (debug) chatter for everyone else. Testing such a tool means testing
//! what it _said_, and logcheck provides a [`Recorder`](recorder::Recorder) that captures
//! every line while still passing it on to the real logger.
//!
//! # Writing tests
//!
//! A recorder buffers each message with a severity prefix (`error: `, `warn: `, `info: ` or
//! `debug: `). Assertions _consume_ messages: once a message has been matched by
//! [`expect_message`](recorder::Recorder::expect_message) it is gone, so a test ends by checking
//! that nothing unexpected was left behind.
//!
//! ```
//! use logcheck::logger::{LogLevel, Logger};
//! use logcheck::recorder::Recorder;
//!
//! let mut logger = Recorder::new();
//! logger.log("unknown option 'foo'", LogLevel::Error);
//! logger.log("resolving 3 entry points", LogLevel::Verbose);
//!
//! logger.discard_debug_messages();
//! logger.expect_message("error: unknown option '*'");
//! logger.expect_no_other_messages();
//! ```
//!
//! Patterns are globs, not regular expressions: `*` matches any run of characters (newlines
//! included) and everything else matches literally. A pattern must match the whole message.
//!
//! # Diagnostics
//!
//! Compilers hand out structured [diagnostics](diagnostic::Diagnostic) rather than strings.
//! [`Logger::diagnostic`](logger::Logger::diagnostic) formats them the way a compiler would
//! print them (`src/index.ts(3,7): error TS2322: ...`) and logs them at the matching level.
//!
//! # Command-line use
//!
//! The same assertions can be run against a transcript saved from a real run:
//!
//! ```console
//! $ my-tool 2> run.log
//! $ logcheck expected.txt run.log
//! ```
//!
//! where `expected.txt` holds one pattern per line. See the [`transcript`] module for details.

#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate log;

/// Structured compiler diagnostics and their textual form.
pub mod diagnostic;

/// The logging capability shared by the base logger and the recorder.
pub mod logger;

/// Glob patterns used to match recorded messages.
pub mod pattern;

/// Capturing logger with consuming assertions for tests.
///
/// See the [crate-level documentation] for details.
///
///   [crate-level documentation]: ../index.html
pub mod recorder;

/// Checking saved log transcripts against a list of expected patterns.
pub mod transcript;

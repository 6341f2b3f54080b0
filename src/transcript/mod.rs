//! A transcript is the text a recorder-compatible tool writes while it runs: every message
//! starts on a new line with its level's prefix (`error: `, `warn: `, `info: ` or `debug: `),
//! and any following lines without a prefix continue the previous message.
//!
//! ```text
//! info: Loading tsconfig.json
//! error: src/index.ts(3,7): error TS2322: Type 'T' is not assignable to type 'U'.
//!   Types of property 'a' are incompatible.
//! debug: done in 12ms
//! ```
//!
//! An expectations file has one glob pattern per line, in the order the messages are expected
//! to be consumed. Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::logger::{self, LogFacade, LogLevel, Logger};
use crate::recorder::{ExpectationError, Recorder};

const READER_CAPACITY: usize = 128 * 1024;

/// The `log` target replayed transcript messages are emitted under.
pub const TRANSCRIPT_TARGET: &str = "logcheck::replay";

/// Configure how a transcript is checked.
///
/// All options default to off.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Drop all debug messages before checking any expectations.
    pub discard_debug: bool,

    /// Do not fail when messages are left over after all expectations have been checked.
    pub allow_other: bool,
}

/// The outcome of checking a transcript.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The number of patterns read from the expectations.
    pub expectations: usize,

    /// Every assertion that failed, in the order they were checked.
    pub failures: Vec<ExpectationError>,
}

impl Report {
    /// Whether every assertion held.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Writes each failure followed by a blank line.
    pub fn write_failures<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        for failure in &self.failures {
            writeln!(writer, "{}", failure)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Splits a transcript into its messages.
///
/// Lines that appear before the first prefixed line belong to no message; they are skipped
/// with a warning.
pub fn parse<R>(mut reader: R) -> io::Result<Vec<(LogLevel, String)>>
where
    R: BufRead,
{
    let mut entries: Vec<(LogLevel, String)> = Vec::new();
    let mut buf = Vec::new();
    while let Some(line) = read_line_lossy(&mut reader, &mut buf)? {
        let content = line.trim_end_matches(&['\r', '\n'][..]);
        if let Some((level, text)) = LogLevel::strip_prefix(content) {
            entries.push((level, text.to_string()));
        } else if let Some((_, text)) = entries.last_mut() {
            text.push('\n');
            text.push_str(content);
        } else {
            warn!("Ignoring line without a severity prefix: {}", content);
        }
    }

    Ok(entries)
}

/// Replays the transcript read from `transcript` into a [`Recorder`] and checks the patterns
/// read from `expectations` against it.
///
/// Each pattern consumes one message, exactly like
/// [`Recorder::expect_message`]. Unless [`Options::allow_other`] is set, messages left over at
/// the end are reported as a failure too.
pub fn check<R1, R2>(opt: &Options, transcript: R1, mut expectations: R2) -> io::Result<Report>
where
    R1: BufRead,
    R2: BufRead,
{
    let mut recorder = Recorder::with_base(LogFacade::from(logger::Options {
        level: LogLevel::Verbose,
        target: TRANSCRIPT_TARGET.to_string(),
    }));
    for (level, text) in parse(transcript)? {
        recorder.log(&text, level);
    }
    debug!(
        "Replayed {} messages ({} errors, {} warnings)",
        recorder.messages().len(),
        recorder.error_count(),
        recorder.warning_count()
    );

    if opt.discard_debug {
        recorder.discard_debug_messages();
    }

    let mut report = Report::default();
    let mut buf = Vec::new();
    while let Some(line) = read_line_lossy(&mut expectations, &mut buf)? {
        let pattern = line.trim_end_matches(&['\r', '\n'][..]);
        if pattern.is_empty() || pattern.starts_with('#') {
            continue;
        }

        report.expectations += 1;
        if let Err(e) = recorder.try_expect_message(pattern) {
            report.failures.push(e);
        }
    }

    if !opt.allow_other {
        if let Err(e) = recorder.try_expect_no_other_messages() {
            report.failures.push(e);
        }
    }

    info!(
        "Checked {} expectations, {} failed",
        report.expectations,
        report.failures.len()
    );
    Ok(report)
}

// Invalid UTF-8 is replaced rather than reported, so a garbled line only spoils its own message.
fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: BufRead,
{
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Checks the transcript in a file (or STDIN if `transcript` is `None`) against the
/// expectations in a file.
///
/// See [`check`] for details.
pub fn check_files<P1, P2>(
    opt: &Options,
    transcript: Option<P1>,
    expectations: P2,
) -> io::Result<Report>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let file = File::open(expectations)?;
    let expectations = io::BufReader::with_capacity(READER_CAPACITY, file);
    match transcript {
        Some(ref path) => {
            let file = File::open(path)?;
            let reader = io::BufReader::with_capacity(READER_CAPACITY, file);
            check(opt, reader, expectations)
        }
        None => {
            let stdio = io::stdin();
            let stdio_guard = stdio.lock();
            let reader = io::BufReader::with_capacity(READER_CAPACITY, stdio_guard);
            check(opt, reader, expectations)
        }
    }
}

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

// Any run of characters, newlines included.
const WILDCARD: &str = "(?s:.*)";

// The compiled program grows with the pattern; leave room for a few hundred bytes per
// pattern byte on top of the regex crate's defaults.
const BASE_SIZE_LIMIT: usize = 10 * (1 << 20);
const SIZE_LIMIT_PER_BYTE: usize = 256;

#[derive(Clone, Debug)]
enum Matcher {
    Literal,
    Glob(Regex),
}

/// A glob pattern that must match a whole message.
///
/// `*` matches any sequence of characters, including none and including newlines. Every other
/// character, `?` and `[` included, matches only itself. Matching is case-sensitive.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// Patterns without a `*` are compared directly and never fail. Patterns with wildcards
    /// fail only if they are too large for the regex engine even after its limits have been
    /// raised in proportion to the pattern's length.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        if !pattern.contains('*') {
            return Ok(Self {
                source: pattern.to_string(),
                matcher: Matcher::Literal,
            });
        }

        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(WILDCARD);
        let anchored = format!("^{}$", body);

        let limit = anchored
            .len()
            .saturating_mul(SIZE_LIMIT_PER_BYTE)
            .saturating_add(BASE_SIZE_LIMIT);
        let regex = RegexBuilder::new(&anchored)
            .size_limit(limit)
            .dfa_size_limit(limit)
            .build()?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: Matcher::Glob(regex),
        })
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `message` matches the pattern from start to end.
    pub fn matches(&self, message: &str) -> bool {
        match self.matcher {
            Matcher::Literal => self.source == message,
            Matcher::Glob(ref regex) => regex.is_match(message),
        }
    }

    /// The index of the first of `messages` that matches the pattern.
    pub fn position<S>(&self, messages: &[S]) -> Option<usize>
    where
        S: AsRef<str>,
    {
        messages.iter().position(|m| self.matches(m.as_ref()))
    }
}

impl FromStr for Pattern {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

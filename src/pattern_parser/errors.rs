use nom::error::{ContextError, ParseError};
use std::fmt;

/// Parse error carrying the unconsumed input at each failure point together
/// with a static description of what was expected there.
#[derive(Debug, PartialEq)]
pub struct PatternParsingError<'a> {
    pub errors: Vec<(&'a str, &'static str)>,
}

impl<'a> PatternParsingError<'a> {
    pub fn new(input: &'a str, message: &'static str) -> Self {
        PatternParsingError {
            errors: vec![(input, message)],
        }
    }
}

impl<'a> ParseError<&'a str> for PatternParsingError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        PatternParsingError::new(input, "unexpected input")
    }

    fn append(input: &'a str, _kind: nom::error::ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, "while parsing"));
        other
    }
}

impl<'a> ContextError<&'a str> for PatternParsingError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, ctx));
        other
    }
}

impl fmt::Display for PatternParsingError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (input, ctx) in &self.errors {
            // The remaining input can be the whole tail of the query; a short
            // prefix is enough to pinpoint the failure.
            let snippet: String = input.chars().take(40).collect();
            writeln!(f, "{}: {}", ctx, snippet)?;
        }
        Ok(())
    }
}

impl<'a> From<nom::error::Error<&'a str>> for PatternParsingError<'a> {
    fn from(err: nom::error::Error<&'a str>) -> Self {
        PatternParsingError::new(err.input, "unable to parse")
    }
}

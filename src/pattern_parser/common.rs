use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::recognize,
    error::ParseError,
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};

use super::errors::PatternParsingError;

/// Result type used by every parser in this module tree.
pub type PResult<'a, O> = IResult<&'a str, O, PatternParsingError<'a>>;

/// Wraps a parser so that it tolerates surrounding whitespace.
pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

fn ident_chunk(input: &str) -> IResult<&str, &str, PatternParsingError<'_>> {
    take_while1(|c: char| c.is_ascii_alphanumeric())(input)
}

fn underscores(input: &str) -> IResult<&str, &str, PatternParsingError<'_>> {
    take_while1(|c| c == '_')(input)
}

/// Parse an unquoted Cypher symbolic name: one or more alphanumeric chunks
/// joined by runs of underscores, e.g. `Person`, `ACTED_IN`, `v0`.
pub fn parse_identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(ident_chunk, many0(pair(underscores, ident_chunk)))).parse(input)
}

/// Parse a backtick-escaped name such as `` `My Label` ``. The token keeps
/// its backticks, so it never equals a plain schema name and is passed
/// through unrewritten.
fn parse_escaped_name(input: &str) -> PResult<'_, &str> {
    recognize(delimited(
        char('`'),
        take_while1(|c: char| c != '`'),
        char('`'),
    ))
    .parse(input)
}

/// A symbolic name where the dialect allows one: unquoted or backticked.
pub fn parse_symbolic_name(input: &str) -> PResult<'_, &str> {
    alt((parse_identifier, parse_escaped_name)).parse(input)
}

/// Parse a query parameter reference such as `$props`.
pub fn parse_parameter(input: &str) -> PResult<'_, &str> {
    recognize(pair(char('$'), parse_identifier)).parse(input)
}

/// Step over a `{..}` property map without interpreting it. Braces nest (map
/// literals inside values) and string literals may contain braces, so this
/// tracks both; nothing inside a property map is ever rewritten.
pub fn skip_property_map(input: &str) -> PResult<'_, &str> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '{')) => {}
        _ => {
            return Err(nom::Err::Error(PatternParsingError::new(
                input,
                "expected property map",
            )))
        }
    }
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in chars {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[idx + 1..], &input[..idx + 1]));
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Failure(PatternParsingError::new(
        input,
        "unterminated property map",
    )))
}

/// Properties attached to a node or relationship: either an inline map or a
/// parameter standing in for one.
pub fn parse_properties(input: &str) -> PResult<'_, &str> {
    alt((skip_property_map, parse_parameter)).parse(input)
}

/// Byte-exact location of a token within the query being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    /// Locate `token` inside `query`. The token must be a subslice of the
    /// query string; every name the parser yields satisfies this because
    /// parsers only ever return slices of their input.
    pub fn locate(query: &str, token: &str) -> Span {
        let offset = token.as_ptr() as usize - query.as_ptr() as usize;
        debug_assert!(offset + token.len() <= query.len());
        Span {
            offset,
            len: token.len(),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_identifier("Person"), Ok(("", "Person")));
        assert_eq!(parse_identifier("ACTED_IN"), Ok(("", "ACTED_IN")));
        assert_eq!(parse_identifier("v0)"), Ok((")", "v0")));
        assert_eq!(parse_identifier("a__b"), Ok(("", "a__b")));
        // Leading underscore and punctuation are rejected.
        assert!(parse_identifier("_hidden").is_err());
        assert!(parse_identifier(":Label").is_err());
    }

    #[test]
    fn test_skip_property_map() {
        assert_eq!(
            skip_property_map("{name: 'Oliver'} rest"),
            Ok((" rest", "{name: 'Oliver'}"))
        );
        // Nested maps and braces inside strings do not end the scan early.
        assert_eq!(
            skip_property_map("{a: {b: 1}, c: '}'}]"),
            Ok(("]", "{a: {b: 1}, c: '}'}"))
        );
        assert!(skip_property_map("no map").is_err());
        assert!(matches!(
            skip_property_map("{unterminated"),
            Err(nom::Err::Failure(_))
        ));
    }

    #[test]
    fn test_parse_symbolic_name() {
        assert_eq!(parse_symbolic_name("Person)"), Ok((")", "Person")));
        // Backticked names keep their backticks.
        assert_eq!(parse_symbolic_name("`My Label`)"), Ok((")", "`My Label`")));
        assert!(parse_symbolic_name("``").is_err());
    }

    #[test]
    fn test_parse_parameter() {
        assert_eq!(parse_parameter("$props)"), Ok((")", "$props")));
        assert!(parse_parameter("props").is_err());
    }

    #[test]
    fn test_span_locate() {
        let query = "MATCH (a:Person) RETURN a";
        let token = &query[9..15];
        assert_eq!(token, "Person");
        assert_eq!(Span::locate(query, token), Span { offset: 9, len: 6 });
        assert_eq!(Span::locate(query, token).end(), 15);
    }
}

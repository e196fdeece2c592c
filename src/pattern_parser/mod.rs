//! Parser for the graph-pattern subset of Cypher.
//!
//! Frame-name resolution only needs the patterns themselves; every other
//! clause is opaque text that is passed through byte-identical. So instead of
//! a full-grammar parser, a byte-wise clause scanner walks the query (string,
//! comment, and backtick aware), and fires the nom pattern parsers after each
//! `MATCH` / `CREATE` / `MERGE` keyword. `OPTIONAL MATCH` is covered by its
//! `MATCH` token.
//!
//! Patterns also occur inside expressions: `WHERE (a)-[:REL]->(b)`,
//! `EXISTS` subclauses, pattern comprehensions. For those the scanner tries
//! the chain parser at every `(` it meets outside a clause pattern and keeps
//! the result only if the chain has at least one hop; a parenthesized
//! expression or a lone `(a)` fails that bar and is scanned as plain text.
//!
//! Malformed patterns after a committed keyword are parse errors, propagated
//! unchanged to the caller. There is no error recovery and no partial result.

pub mod ast;
pub mod common;
pub mod errors;
mod node_pattern;
mod pattern_chain;
mod relationship_pattern;

pub use common::Span;
pub use errors::PatternParsingError;

use ast::PatternChain;

/// Keywords that introduce a pattern list.
const PATTERN_KEYWORDS: [&str; 3] = ["match", "create", "merge"];

/// Extract every pattern chain in the query, in document order.
pub fn parse_query_patterns(query: &str) -> Result<Vec<PatternChain<'_>>, PatternParsingError<'_>> {
    let bytes = query.as_bytes();
    let mut chains = Vec::new();
    let mut i = 0;
    // Last significant (non-whitespace) byte seen, used to tell the clause
    // keyword `MATCH` apart from a property or parameter named `match`.
    let mut prev_sig: Option<u8> = None;
    // Last full word seen: `MATCH`/`CREATE` right after `ON` belong to a
    // MERGE action (`ON MATCH SET ..`), not to a new pattern list.
    let mut prev_word: Option<&str> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\'' || b == b'"' || b == b'`' {
            i = skip_quoted(bytes, i);
            prev_sig = Some(b);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = skip_line_comment(bytes, i);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = skip_block_comment(bytes, i);
        } else if b.is_ascii_whitespace() {
            i += 1;
        } else if is_word_start(b) {
            let start = i;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            let word = &query[start..i];
            let after_accessor = matches!(prev_sig, Some(b'.') | Some(b'$') | Some(b':'));
            let after_on = prev_word.is_some_and(|w| w.eq_ignore_ascii_case("on"));
            if !after_accessor
                && !after_on
                && PATTERN_KEYWORDS
                    .iter()
                    .any(|kw| word.eq_ignore_ascii_case(kw))
            {
                let rest = &query[i..];
                match pattern_chain::parse_pattern_list(rest) {
                    Ok((remaining, mut parsed)) => {
                        chains.append(&mut parsed);
                        i = query.len() - remaining.len();
                        prev_sig = Some(b')');
                    }
                    Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => return Err(e),
                    Err(nom::Err::Incomplete(_)) => {
                        return Err(PatternParsingError::new(rest, "incomplete pattern"))
                    }
                }
                prev_word = None;
            } else {
                prev_sig = Some(bytes[i - 1]);
                prev_word = Some(word);
            }
        } else if b == b'(' {
            // Expression-level pattern, e.g. a `WHERE` pattern predicate.
            // Anything that does not parse as a chain with a relationship in
            // it is ordinary parenthesized text.
            match pattern_chain::parse_pattern_chain(&query[i..]) {
                Ok((remaining, chain)) if chain.hop_count() > 0 => {
                    chains.push(chain);
                    i = query.len() - remaining.len();
                    prev_sig = Some(b')');
                    prev_word = None;
                }
                _ => {
                    prev_sig = Some(b);
                    prev_word = None;
                    i += 1;
                }
            }
        } else {
            prev_sig = Some(b);
            prev_word = None;
            i += 1;
        }
    }

    Ok(chains)
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Skip a quoted region starting at the opening quote. Handles backslash
/// escapes (not inside backticks) and doubled-quote escapes. An unterminated
/// quote runs to the end of the query; the scanner simply stops there.
fn skip_quoted(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' && quote != b'`' {
            i += 2;
        } else if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
            } else {
                return i + 1;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

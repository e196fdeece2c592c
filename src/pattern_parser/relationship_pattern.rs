use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0},
    combinator::{cut, map, opt},
    error::context,
    multi::many0,
    sequence::{delimited, preceded},
    Parser,
};

use super::ast::{Direction, RelationshipPattern, VariableLengthSpec};
use super::common::{parse_properties, parse_symbolic_name, ws, PResult};
use super::errors::PatternParsingError;

/// Everything between the relationship brackets.
type RelInternals<'a> = (Option<&'a str>, Vec<&'a str>, Option<VariableLengthSpec>);

/// Parse the relationship-type list: `:KNOWS`, `:FOLLOWS|LIKES`, `:A|:B`.
///
/// An empty vector means the bracket carries no type at all; more than one
/// entry means the OR-type syntax, which the resolver never rewrites.
fn parse_rel_types(input: &str) -> PResult<'_, Vec<&str>> {
    let (input, colon) = opt(ws(char(':'))).parse(input)?;
    if colon.is_none() {
        return Ok((input, Vec::new()));
    }

    let (input, first) = cut(ws(parse_symbolic_name)).parse(input)?;
    let (input, mut rest) = many0(preceded(
        ws(char('|')),
        // Old-style alternation repeats the colon: [:A|:B]
        preceded(opt(ws(char(':'))), ws(parse_symbolic_name)),
    ))
    .parse(input)?;

    let mut types = vec![first];
    types.append(&mut rest);
    Ok((input, types))
}

fn parse_hop_count(input: &str) -> PResult<'_, u32> {
    let (rest, digits) = digit1(input)?;
    match digits.parse::<u32>() {
        Ok(count) => Ok((rest, count)),
        Err(_) => Err(nom::Err::Failure(PatternParsingError::new(
            input,
            "hop count out of range",
        ))),
    }
}

/// Parse a variable-length range literal: `*`, `*2`, `*1..3`, `*..5`, `*2..`.
/// The literal is captured only so the parser can step over it; it is
/// preserved verbatim in the output query.
fn parse_variable_length_spec(input: &str) -> PResult<'_, Option<VariableLengthSpec>> {
    let (input, star) = opt(ws(char('*'))).parse(input)?;
    if star.is_none() {
        return Ok((input, None));
    }

    let (input, lower) = opt(parse_hop_count).parse(input)?;
    let (input, dots) = opt(ws(tag(".."))).parse(input)?;
    let (input, spec) = if dots.is_some() {
        let (input, upper) = opt(parse_hop_count).parse(input)?;
        (
            input,
            VariableLengthSpec {
                min_hops: lower,
                max_hops: upper,
            },
        )
    } else {
        // Fixed length *N, or bare * when no digits were present.
        (
            input,
            VariableLengthSpec {
                min_hops: lower,
                max_hops: lower,
            },
        )
    };

    if !spec.is_valid() {
        return Err(nom::Err::Failure(PatternParsingError::new(
            input,
            "variable-length range has min greater than max",
        )));
    }

    Ok((input, Some(spec)))
}

/// Parse the bracketed portion `[name:TYPE*1..3 {..}]`. Once the opening
/// bracket is seen the rest is committed: malformed internals become a hard
/// failure instead of silently ending the chain.
fn parse_relationship_internals(input: &str) -> PResult<'_, RelInternals<'_>> {
    let (input, _) = ws(char('[')).parse(input)?;
    cut(parse_bracket_body).parse(input)
}

fn parse_bracket_body(input: &str) -> PResult<'_, RelInternals<'_>> {
    let (input, name) = opt(ws(parse_symbolic_name)).parse(input)?;
    let (input, types) = parse_rel_types(input)?;
    let (input, variable_length) = parse_variable_length_spec(input)?;
    let (input, _) = opt(ws(parse_properties)).parse(input)?;
    let (input, _) =
        context("closing bracket of relationship pattern", ws(char(']'))).parse(input)?;
    Ok((input, (name, types, variable_length)))
}

/// Parse one relationship pattern, bracketless arrows included:
/// `<-[..]-`, `-[..]->`, `-[..]-`, `<--`, `-->`, `--`.
///
/// Returns `None` when the input does not start a relationship at all, which
/// is how a pattern chain ends.
pub fn parse_relationship_pattern(
    input: &str,
) -> PResult<'_, Option<RelationshipPattern<'_>>> {
    let empty = |direction| RelationshipPattern {
        name: None,
        types: Vec::new(),
        direction,
        variable_length: None,
    };

    let empty_both = map(delimited(ws(tag("<-")), space0, tag("->")), move |_| {
        empty(Direction::Both)
    });
    let empty_incoming = map(delimited(ws(tag("<-")), space0, tag("-")), move |_| {
        empty(Direction::Incoming)
    });
    let empty_outgoing = map(delimited(ws(tag("-")), space0, tag("->")), move |_| {
        empty(Direction::Outgoing)
    });
    let empty_either = map(delimited(ws(tag("-")), space0, tag("-")), move |_| {
        empty(Direction::Either)
    });

    let both = map(
        delimited(ws(tag("<-")), parse_relationship_internals, tag("->")),
        |(name, types, variable_length)| RelationshipPattern {
            name,
            types,
            direction: Direction::Both,
            variable_length,
        },
    );
    let incoming = map(
        delimited(ws(tag("<-")), parse_relationship_internals, tag("-")),
        |(name, types, variable_length)| RelationshipPattern {
            name,
            types,
            direction: Direction::Incoming,
            variable_length,
        },
    );
    let outgoing = map(
        delimited(ws(tag("-")), parse_relationship_internals, tag("->")),
        |(name, types, variable_length)| RelationshipPattern {
            name,
            types,
            direction: Direction::Outgoing,
            variable_length,
        },
    );
    let either = map(
        delimited(ws(tag("-")), parse_relationship_internals, tag("-")),
        |(name, types, variable_length)| RelationshipPattern {
            name,
            types,
            direction: Direction::Either,
            variable_length,
        },
    );

    // Bracketless arrows first. Within each group the both-arrow form
    // precedes the incoming one and outgoing precedes undirected, so that
    // `<-[..]->` and `-[..]->` are not cut short at their closing dash.
    opt(alt((
        empty_both,
        empty_incoming,
        empty_outgoing,
        empty_either,
        both,
        incoming,
        outgoing,
        either,
    )))
    .parse(input)
}

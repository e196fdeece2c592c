use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::char,
    combinator::{cut, opt},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    Parser,
};

use super::ast::PatternChain;
use super::common::{parse_identifier, ws, PResult};
use super::node_pattern::parse_node_pattern;
use super::relationship_pattern::parse_relationship_pattern;

/// Parse one chain of alternating nodes and relationships, e.g.
/// `(a:Person)-[:KNOWS]->(b)<-[:LIKES]-(c)`.
///
/// A single node with no relationship is a valid one-element chain. Once a
/// relationship has been parsed the following node is mandatory.
pub fn parse_pattern_chain(input: &str) -> PResult<'_, PatternChain<'_>> {
    let (mut input, first) = parse_node_pattern(input)?;
    let mut nodes = vec![first];
    let mut relationships = Vec::new();

    loop {
        let (rest, maybe_rel) = parse_relationship_pattern(input)?;
        let Some(rel) = maybe_rel else {
            input = rest;
            break;
        };
        let (rest, node) = cut(parse_node_pattern).parse(rest)?;
        relationships.push(rel);
        nodes.push(node);
        input = rest;
    }

    Ok((
        input,
        PatternChain {
            path_variable: None,
            nodes,
            relationships,
        },
    ))
}

/// Chains wrapped in `shortestPath(..)` / `allShortestPaths(..)` still carry
/// relationship types that need resolving, so the wrapper is parsed through
/// and the inner chain returned.
fn parse_shortest_path_wrapper(input: &str) -> PResult<'_, PatternChain<'_>> {
    let (input, _) = alt((
        ws(tag_no_case("allShortestPaths")),
        ws(tag_no_case("shortestPath")),
    ))
    .parse(input)?;
    delimited(ws(char('(')), parse_pattern_chain, ws(char(')'))).parse(input)
}

/// One element of a pattern list: an optional path-variable binding followed
/// by a (possibly wrapped) chain, e.g. `p = (a)-[:R*]->(b)`.
fn parse_chain_element(input: &str) -> PResult<'_, PatternChain<'_>> {
    let (input, path_variable) =
        opt(terminated(ws(parse_identifier), char('='))).parse(input)?;
    let (input, mut chain) =
        alt((parse_shortest_path_wrapper, parse_pattern_chain)).parse(input)?;
    chain.path_variable = path_variable;
    Ok((input, chain))
}

/// Parse the comma-separated pattern list that follows a pattern keyword.
pub fn parse_pattern_list(input: &str) -> PResult<'_, Vec<PatternChain<'_>>> {
    let (input, first) = parse_chain_element(input)?;
    let (input, rest) =
        many0(preceded(ws(char(',')), cut(parse_chain_element))).parse(input)?;

    let mut chains = vec![first];
    chains.extend(rest);
    Ok((input, chains))
}

use nom::{
    character::complete::char,
    combinator::opt,
    error::context,
    multi::many0,
    sequence::preceded,
    Parser,
};

use super::ast::NodePattern;
use super::common::{parse_properties, parse_symbolic_name, ws, PResult};

/// Parse one node pattern occurrence.
///
/// Covers `()`, `(a)`, `(:Person)`, `(a:Person)`, `(a:Person:Admin)`,
/// `(a {name: 'x'})`, `(a:Person $props)`. The property map is stepped over
/// without being interpreted.
pub fn parse_node_pattern(input: &str) -> PResult<'_, NodePattern<'_>> {
    let (input, _) = context("node pattern", ws(char('('))).parse(input)?;
    let (input, name) = opt(parse_symbolic_name).parse(input)?;
    let (input, labels) = many0(preceded(ws(char(':')), parse_symbolic_name)).parse(input)?;
    let (input, _) = opt(ws(parse_properties)).parse(input)?;
    let (input, _) = context("closing parenthesis of node pattern", ws(char(')'))).parse(input)?;

    Ok((input, NodePattern { name, labels }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node() {
        let (rest, node) = parse_node_pattern("()").unwrap();
        assert_eq!(rest, "");
        assert_eq!(node, NodePattern { name: None, labels: vec![] });
    }

    #[test]
    fn test_named_node() {
        let (_, node) = parse_node_pattern("(v0)").unwrap();
        assert_eq!(node.name, Some("v0"));
        assert!(node.labels.is_empty());
    }

    #[test]
    fn test_labeled_node() {
        let (_, node) = parse_node_pattern("(:Person)").unwrap();
        assert_eq!(node.name, None);
        assert_eq!(node.labels, vec!["Person"]);
    }

    #[test]
    fn test_named_and_labeled_node() {
        let (_, node) = parse_node_pattern("(a:Person)").unwrap();
        assert_eq!(node.name, Some("a"));
        assert_eq!(node.labels, vec!["Person"]);
    }

    #[test]
    fn test_multi_label_node() {
        let (_, node) = parse_node_pattern("(a:Person:Admin)").unwrap();
        assert_eq!(node.labels, vec!["Person", "Admin"]);
    }

    #[test]
    fn test_node_with_properties() {
        let (rest, node) = parse_node_pattern("(p:Person {name: 'Tom Hardy', age: 42})-[").unwrap();
        assert_eq!(rest, "-[");
        assert_eq!(node.name, Some("p"));
        assert_eq!(node.labels, vec!["Person"]);
    }

    #[test]
    fn test_node_with_parameter_properties() {
        let (rest, node) = parse_node_pattern("(n $props)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(node.name, Some("n"));
    }

    #[test]
    fn test_backticked_label() {
        let (_, node) = parse_node_pattern("(a:`My Label`)").unwrap();
        assert_eq!(node.name, Some("a"));
        assert_eq!(node.labels, vec!["`My Label`"]);
    }

    #[test]
    fn test_node_with_inner_whitespace() {
        let (_, node) = parse_node_pattern("( a : Person )").unwrap();
        assert_eq!(node.name, Some("a"));
        assert_eq!(node.labels, vec!["Person"]);
    }

    #[test]
    fn test_unclosed_node_fails() {
        assert!(parse_node_pattern("(a:Person").is_err());
        assert!(parse_node_pattern("a:Person)").is_err());
    }
}

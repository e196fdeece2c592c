//! Walks parsed pattern chains, building the per-query symbol table of
//! pattern variables and the ordered list of edge triples the resolver
//! consumes.

use std::collections::HashMap;

use crate::pattern_parser::ast::{
    Direction, NodePattern, PatternChain, RelationshipPattern, VariableLengthSpec,
};

/// One node occurrence with its effective label set (explicit labels, or
/// labels inherited from an earlier occurrence of the same variable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeCapture<'a> {
    pub variable: Option<&'a str>,
    pub labels: Vec<&'a str>,
}

/// One relationship occurrence. `rel_types` are exact token slices of the
/// query, so each one pins the source position a rewrite would target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelationshipCapture<'a> {
    pub variable: Option<&'a str>,
    pub rel_types: Vec<&'a str>,
    pub direction: Direction,
    /// Present for variable-length paths; never rewritten.
    pub range_literal: Option<VariableLengthSpec>,
}

/// One adjacent node pair of a pattern chain, in textual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EdgeTriple<'a> {
    pub left: NodeCapture<'a>,
    pub relationship: RelationshipCapture<'a>,
    pub right: NodeCapture<'a>,
}

/// Produce one edge triple per hop, across all chains, in document order.
///
/// The symbol table is scoped to this call: a variable labeled anywhere in
/// the query lends its labels to every later unlabeled occurrence of the
/// same variable, so `(a:Person)-->()-->(a)` resolves the second `a` as
/// `Person`.
pub(crate) fn extract_edge_triples<'a>(chains: &[PatternChain<'a>]) -> Vec<EdgeTriple<'a>> {
    let mut symbols: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
    let mut triples = Vec::new();

    for chain in chains {
        let mut captured: Vec<NodeCapture<'a>> = Vec::with_capacity(chain.nodes.len());
        for (idx, node) in chain.nodes.iter().enumerate() {
            captured.push(capture_node(node, &mut symbols));
            if idx > 0 {
                triples.push(EdgeTriple {
                    left: captured[idx - 1].clone(),
                    relationship: capture_relationship(&chain.relationships[idx - 1]),
                    right: captured[idx].clone(),
                });
            }
        }
    }

    triples
}

fn capture_node<'a>(
    node: &NodePattern<'a>,
    symbols: &mut HashMap<&'a str, Vec<&'a str>>,
) -> NodeCapture<'a> {
    let mut labels = node.labels.clone();
    if labels.is_empty() {
        if let Some(variable) = node.name {
            if let Some(known) = symbols.get(variable) {
                log::debug!(
                    "node variable `{variable}` inherits labels {known:?} from symbol table"
                );
                labels = known.clone();
            }
        }
    }
    if let Some(variable) = node.name {
        symbols.insert(variable, labels.clone());
    }
    NodeCapture {
        variable: node.name,
        labels,
    }
}

fn capture_relationship<'a>(rel: &RelationshipPattern<'a>) -> RelationshipCapture<'a> {
    RelationshipCapture {
        variable: rel.name,
        rel_types: rel.types.clone(),
        direction: rel.direction,
        range_literal: rel.variable_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern_parser::parse_query_patterns;

    fn triples(query: &str) -> Vec<EdgeTriple<'_>> {
        let chains = parse_query_patterns(query).unwrap();
        extract_edge_triples(&chains)
    }

    #[test]
    fn test_one_triple_per_hop() {
        let out = triples("match(a:Node)-->()-->()-->(a) return a");
        assert_eq!(out.len(), 3);
        // Intermediate nodes are shared between adjacent triples.
        assert_eq!(out[0].right, out[1].left);
        assert_eq!(out[1].right, out[2].left);
    }

    #[test]
    fn test_label_inheritance_on_later_occurrence() {
        let out = triples("match(a:Node)-->()-->(a) return a");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].left.labels, vec!["Node"]);
        // The trailing unlabeled `(a)` picked up `Node` from the first one.
        assert_eq!(out[1].right.variable, Some("a"));
        assert_eq!(out[1].right.labels, vec!["Node"]);
        // The anonymous middle node stayed unlabeled.
        assert!(out[0].right.labels.is_empty());
    }

    #[test]
    fn test_inheritance_across_chains() {
        let out = triples("MATCH (a:Person) MATCH (a)-[:KNOWS]->(b) RETURN b");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].left.labels, vec!["Person"]);
    }

    #[test]
    fn test_explicit_labels_take_precedence() {
        let out = triples("MATCH (a:Person)-->(a:Robot) RETURN a");
        assert_eq!(out[0].right.labels, vec!["Robot"]);
    }

    #[test]
    fn test_relationship_capture_fields() {
        let out = triples("MATCH (a)<-[r:REL*1..2]-(b) RETURN a");
        let rel = &out[0].relationship;
        assert_eq!(rel.variable, Some("r"));
        assert_eq!(rel.rel_types, vec!["REL"]);
        assert_eq!(rel.direction, Direction::Incoming);
        assert!(rel.range_literal.is_some());
    }

    #[test]
    fn test_standalone_nodes_produce_no_triples() {
        assert!(triples("MATCH (a:Person), (b:Person) RETURN a, b").is_empty());
    }
}

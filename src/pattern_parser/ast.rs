//! Pattern AST for the graph-pattern subset of Cypher.
//!
//! Only the shapes needed for frame-name resolution are modeled: node
//! patterns, relationship patterns, their labels/types, and variable-length
//! range literals. Property maps are recognized and skipped but never
//! interpreted; everything outside patterns is opaque to this crate.
//!
//! All name fields borrow from the query string, so their byte positions can
//! be recovered later with [`super::common::Span::locate`].

/// Textual orientation of a relationship pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `-[..]->` : textual left node is the logical source.
    Outgoing,
    /// `<-[..]-` : textual right node is the logical source.
    Incoming,
    /// `<-[..]->` : arrowheads on both ends; textual order stands.
    Both,
    /// `-[..]-` : undirected, cannot disambiguate endpoints.
    Either,
}

/// Variable-length range literal: `*`, `*2`, `*1..3`, `*..5`, `*2..`.
///
/// Preserved so the parser can step over it; never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLengthSpec {
    pub min_hops: Option<u32>,
    pub max_hops: Option<u32>,
}

impl VariableLengthSpec {
    pub fn is_valid(&self) -> bool {
        match (self.min_hops, self.max_hops) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// One `(name:Label {..})` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePattern<'a> {
    pub name: Option<&'a str>,
    /// Colon-separated labels in source order, e.g. `(a:Person:Admin)`.
    pub labels: Vec<&'a str>,
}

/// One `-[name:TYPE|OTHER*1..2 {..}]->` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPattern<'a> {
    pub name: Option<&'a str>,
    /// Pipe-separated relationship types in source order. Each entry is an
    /// exact token slice of the query, so its span identifies the one
    /// occurrence a rewrite would target.
    pub types: Vec<&'a str>,
    pub direction: Direction,
    pub variable_length: Option<VariableLengthSpec>,
}

/// One pattern chain: alternating nodes and relationships in textual order.
///
/// `nodes.len() == relationships.len() + 1`; hop `i` connects `nodes[i]` to
/// `nodes[i + 1]` through `relationships[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternChain<'a> {
    pub path_variable: Option<&'a str>,
    pub nodes: Vec<NodePattern<'a>>,
    pub relationships: Vec<RelationshipPattern<'a>>,
}

impl<'a> PatternChain<'a> {
    pub fn hop_count(&self) -> usize {
        self.relationships.len()
    }
}

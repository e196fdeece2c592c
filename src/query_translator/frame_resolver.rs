//! Resolves each edge triple against the multi-variant edge mapping and
//! records the text rewrites to perform.
//!
//! Resolution fails open: an occurrence whose endpoints cannot be pinned to
//! exactly one variant keeps its logical name. If that name has no physical
//! frame, the destination engine rejects it downstream; this layer only logs
//! why it left the occurrence alone. The one hard error is two rewrites
//! landing on the same source offset, which no ordering could make sense of.

use std::collections::{BTreeMap, HashMap};

use crate::frame_catalog::EdgeVariant;
use crate::pattern_parser::ast::Direction;
use crate::pattern_parser::Span;

use super::errors::TranslationError;
use super::pattern_extractor::{EdgeTriple, NodeCapture};

/// One pending text edit, keyed by its byte offset in the rewrite map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RewriteInstruction {
    pub len: usize,
    pub replacement: String,
}

/// Endpoint label of a node capture: `Ok(None)` is a wildcard, `Err(())`
/// means the node carries several labels and cannot be used for resolution.
fn endpoint_label<'a>(node: &NodeCapture<'a>) -> Result<Option<&'a str>, ()> {
    match node.labels.as_slice() {
        [] => Ok(None),
        [label] => Ok(Some(*label)),
        _ => Err(()),
    }
}

/// Build the rewrite map for all triples of one query.
pub(crate) fn resolve_frame_names(
    query: &str,
    triples: &[EdgeTriple<'_>],
    edge_name_mapping: &HashMap<String, Vec<EdgeVariant>>,
) -> Result<BTreeMap<usize, RewriteInstruction>, TranslationError> {
    let mut rewrites: BTreeMap<usize, RewriteInstruction> = BTreeMap::new();

    for triple in triples {
        let rel = &triple.relationship;
        if rel.rel_types.len() > 1 {
            // OR-types cannot resolve to a single frame; pass through.
            log::debug!(
                "skipping alternation {:?}: multiple types in one bracket",
                rel.rel_types
            );
            continue;
        }
        let Some(&rel_type) = rel.rel_types.first() else {
            continue;
        };
        let Some(variants) = edge_name_mapping.get(rel_type) else {
            // Not split across frames; the logical name is already physical.
            continue;
        };

        let (Ok(left), Ok(right)) = (endpoint_label(&triple.left), endpoint_label(&triple.right))
        else {
            log::warn!(
                "leaving `{rel_type}` unrewritten: multi-label endpoint is not supported \
                 for frame resolution"
            );
            continue;
        };

        // The textual left node is the logical source unless the arrow
        // points right-to-left only.
        let (source, target) = match rel.direction {
            Direction::Incoming => (right, left),
            Direction::Outgoing | Direction::Both | Direction::Either => (left, right),
        };

        let (Some(source), Some(target)) = (source, target) else {
            log::debug!("leaving `{rel_type}` unrewritten: wildcard endpoint");
            continue;
        };

        let mut matching = variants
            .iter()
            .filter(|v| v.source_label == source && v.target_label == target);
        let variant = match (matching.next(), matching.next()) {
            (Some(variant), None) => variant,
            (None, _) => {
                log::debug!(
                    "leaving `{rel_type}` unrewritten: no variant for ({source}, {target})"
                );
                continue;
            }
            (Some(_), Some(_)) => {
                // Duplicate endpoint pairs violate the catalog invariant;
                // treated as "no safe rewrite" rather than guessing.
                log::warn!(
                    "leaving `{rel_type}` unrewritten: several variants share ({source}, {target})"
                );
                continue;
            }
        };

        let span = Span::locate(query, rel_type);
        log::debug!(
            "rewriting `{rel_type}` at offset {} to frame `{}`",
            span.offset,
            variant.frame_name
        );
        register_rewrite(&mut rewrites, span, variant.frame_name.clone())?;
    }

    Ok(rewrites)
}

fn register_rewrite(
    rewrites: &mut BTreeMap<usize, RewriteInstruction>,
    span: Span,
    replacement: String,
) -> Result<(), TranslationError> {
    let instruction = RewriteInstruction {
        len: span.len,
        replacement,
    };
    if rewrites.insert(span.offset, instruction).is_some() {
        return Err(TranslationError::AmbiguousRewrite {
            offset: span.offset,
        });
    }
    Ok(())
}

//! Translates queries written against the source graph's logical schema into
//! queries that run against the auto-derived frame schema.
//!
//! Schema auto-derivation can rename graph components: a relationship type
//! whose edges connect more than one (source-label, target-label) pair is
//! split into one physical edge frame per pair. A query that names such a
//! type must be rewritten to name the concrete frame instead, and which
//! frame that is depends on the labels in play at that point of the pattern.
//!
//! One [`QueryTranslator::translate`] call does one parse, one extraction
//! pass, one resolution pass, and one string splice. All state is local to
//! the call; the translator itself holds only the derivation snapshot it was
//! built with, so rebuilding it per schema refresh is cheap and sharing it
//! across threads is safe.

mod errors;
mod frame_resolver;
mod pattern_extractor;
mod rewriter;

pub use errors::TranslationError;

use std::collections::HashMap;

use crate::frame_catalog::{EdgeVariant, SchemaDerivation};

pub struct QueryTranslator {
    /// Relationship types split across several physical frames; the only
    /// names a query rewrite can ever apply to.
    edge_name_mapping: HashMap<String, Vec<EdgeVariant>>,
}

impl QueryTranslator {
    /// Snapshot the multi-variant subset of a freshly derived schema.
    ///
    /// The snapshot does not track later schema changes; callers rebuild the
    /// translator from a new derivation before each translation batch.
    pub fn new(derivation: &SchemaDerivation) -> Self {
        let edge_name_mapping = derivation.multi_variant_edges();
        log::debug!("edge name mapping: {edge_name_mapping:?}");
        QueryTranslator { edge_name_mapping }
    }

    /// Rewrite `query` to name physical edge frames.
    ///
    /// The output is byte-identical to the input except at relationship-type
    /// tokens that resolved to exactly one frame variant. Occurrences that
    /// cannot be resolved safely keep their logical name; a query needing no
    /// rewrites comes back unchanged.
    pub fn translate(&self, query: &str) -> Result<String, TranslationError> {
        let chains = crate::pattern_parser::parse_query_patterns(query).map_err(|err| {
            TranslationError::Parse {
                message: err.to_string(),
            }
        })?;
        let triples = pattern_extractor::extract_edge_triples(&chains);
        let rewrites = frame_resolver::resolve_frame_names(query, &triples, &self.edge_name_mapping)?;
        Ok(rewriter::apply_rewrites(query, &rewrites))
    }
}

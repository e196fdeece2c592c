//! framelift - Cypher query retargeting for auto-derived frame schemas.
//!
//! When graph data is moved from a property-graph database into an analytic
//! graph engine, the schema is derived automatically, and derivation may
//! restructure it: a relationship type whose edges span several endpoint
//! label combinations becomes several physical edge frames, one per
//! combination. Queries written against the original schema then name
//! relationship types that no longer exist as-is.
//!
//! This crate rewrites such queries. It parses the graph patterns (the rest
//! of the query is opaque text), tracks which labels each pattern variable
//! binds across the whole query, resolves every relationship-type reference
//! whose endpoints pin it to exactly one physical frame, and splices the
//! frame names into the original text, position-exact:
//!
//! ```
//! use framelift::{EdgeVariant, QueryTranslator, SchemaDerivation};
//! use std::collections::HashMap;
//!
//! let derivation = SchemaDerivation {
//!     vertices: HashMap::new(),
//!     edges: HashMap::from([(
//!         "REL".to_string(),
//!         vec![
//!             EdgeVariant::named_by_convention("Node1", "REL", "Node1"),
//!             EdgeVariant::named_by_convention("Node1", "REL", "Node2"),
//!         ],
//!     )]),
//! };
//!
//! let translator = QueryTranslator::new(&derivation);
//! let query = translator
//!     .translate("MATCH (:Node1)-[:REL]->(b:Node2) RETURN b")
//!     .unwrap();
//! assert_eq!(query, "MATCH (:Node1)-[:Node1_REL_Node2]->(b:Node2) RETURN b");
//! ```

pub mod frame_catalog;
pub mod pattern_parser;
pub mod query_translator;

pub use frame_catalog::{frame_name_for, EdgeVariant, FrameCatalogError, SchemaDerivation};
pub use query_translator::{QueryTranslator, TranslationError};

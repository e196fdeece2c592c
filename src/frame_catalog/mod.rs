//! Schema-derivation data model.
//!
//! The schema-introspection side of the transfer tool derives, from the
//! source property graph, which storage frames the destination engine holds.
//! The destination engine requires every edge frame to connect exactly one
//! pair of vertex-frame types, so a relationship type whose edges span
//! several (source-label, target-label) combinations is split into one
//! physical frame per combination. This module carries that mapping; the
//! query translator consumes it.
//!
//! A derivation snapshot is only valid for the schema it was built from.
//! Callers rebuild it before each translation; nothing here is cached.

mod errors;

pub use errors::FrameCatalogError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One physical edge frame under a logical relationship type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeVariant {
    pub source_label: String,
    pub target_label: String,
    pub frame_name: String,
}

impl EdgeVariant {
    /// Build a variant whose frame name follows the auto-generation
    /// convention `source_reltype_target`.
    pub fn named_by_convention(
        source_label: impl Into<String>,
        rel_type: &str,
        target_label: impl Into<String>,
    ) -> Self {
        let source_label = source_label.into();
        let target_label = target_label.into();
        let frame_name = frame_name_for(&source_label, rel_type, &target_label);
        EdgeVariant {
            source_label,
            target_label,
            frame_name,
        }
    }
}

/// Auto-generated frame name for one endpoint-label combination.
pub fn frame_name_for(source_label: &str, rel_type: &str, target_label: &str) -> String {
    format!("{source_label}_{rel_type}_{target_label}")
}

/// Mapping from the source graph's logical names to the destination engine's
/// physical frame names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDerivation {
    /// Logical vertex label -> physical vertex frame name.
    #[serde(default)]
    pub vertices: HashMap<String, String>,
    /// Logical relationship type -> physical edge frame variants. A single
    /// variant means the logical name survived 1:1 and no query rewriting is
    /// needed for that type.
    #[serde(default)]
    pub edges: HashMap<String, Vec<EdgeVariant>>,
}

impl SchemaDerivation {
    /// Load a derivation snapshot from the transfer tool's YAML format.
    pub fn from_yaml_str(input: &str) -> Result<Self, FrameCatalogError> {
        let derivation: SchemaDerivation = serde_yaml::from_str(input)?;
        derivation.validate()?;
        Ok(derivation)
    }

    /// Check the variant invariant: within one relationship type, endpoint
    /// pairs are pairwise distinct. Two variants on the same pair would make
    /// every resolution of that pair ambiguous.
    pub fn validate(&self) -> Result<(), FrameCatalogError> {
        for (rel_type, variants) in &self.edges {
            let mut seen: HashMap<(&str, &str), &str> = HashMap::new();
            for variant in variants {
                let pair = (variant.source_label.as_str(), variant.target_label.as_str());
                if seen.insert(pair, variant.frame_name.as_str()).is_some() {
                    return Err(FrameCatalogError::DuplicateEndpointPair {
                        rel_type: rel_type.clone(),
                        source_label: variant.source_label.clone(),
                        target_label: variant.target_label.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The subset of `edges` that was split across multiple physical frames.
    /// Only these can ever require a query rewrite.
    pub fn multi_variant_edges(&self) -> HashMap<String, Vec<EdgeVariant>> {
        self.edges
            .iter()
            .filter(|(_, variants)| variants.len() > 1)
            .map(|(rel_type, variants)| (rel_type.clone(), variants.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_rel() -> SchemaDerivation {
        SchemaDerivation {
            vertices: HashMap::from([("Node1".to_string(), "Node1".to_string())]),
            edges: HashMap::from([
                (
                    "REL".to_string(),
                    vec![
                        EdgeVariant::named_by_convention("Node1", "REL", "Node1"),
                        EdgeVariant::named_by_convention("Node1", "REL", "Node2"),
                    ],
                ),
                (
                    "PLAIN".to_string(),
                    vec![EdgeVariant {
                        source_label: "Node1".to_string(),
                        target_label: "Node1".to_string(),
                        frame_name: "PLAIN".to_string(),
                    }],
                ),
            ]),
        }
    }

    #[test]
    fn test_frame_name_convention() {
        assert_eq!(frame_name_for("Node1", "REL", "Node2"), "Node1_REL_Node2");
        let variant = EdgeVariant::named_by_convention("Person", "KNOWS", "Person");
        assert_eq!(variant.frame_name, "Person_KNOWS_Person");
    }

    #[test]
    fn test_multi_variant_subset() {
        let derivation = split_rel();
        let multi = derivation.multi_variant_edges();
        assert_eq!(multi.len(), 1);
        assert!(multi.contains_key("REL"));
        assert!(!multi.contains_key("PLAIN"));
    }

    #[test]
    fn test_validate_accepts_distinct_pairs() {
        assert_eq!(split_rel().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_pair() {
        let mut derivation = split_rel();
        derivation.edges.get_mut("REL").unwrap().push(EdgeVariant {
            source_label: "Node1".to_string(),
            target_label: "Node2".to_string(),
            frame_name: "SomethingElse".to_string(),
        });
        assert!(matches!(
            derivation.validate(),
            Err(FrameCatalogError::DuplicateEndpointPair { .. })
        ));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
vertices:
  Node1: Node1
  Node2: Node2
edges:
  REL:
    - source_label: Node1
      target_label: Node1
      frame_name: Node1_REL_Node1
    - source_label: Node1
      target_label: Node2
      frame_name: Node1_REL_Node2
"#;
        let derivation = SchemaDerivation::from_yaml_str(yaml).unwrap();
        assert_eq!(derivation.edges["REL"].len(), 2);
        assert_eq!(derivation.vertices["Node2"], "Node2");
    }

    #[test]
    fn test_from_yaml_str_rejects_garbage() {
        assert!(matches!(
            SchemaDerivation::from_yaml_str(": not yaml ["),
            Err(FrameCatalogError::ConfigParse { .. })
        ));
    }
}

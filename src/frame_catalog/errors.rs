use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameCatalogError {
    #[error(
        "relationship type `{rel_type}` has two variants with the same endpoint pair \
         ({source_label}, {target_label})"
    )]
    DuplicateEndpointPair {
        rel_type: String,
        source_label: String,
        target_label: String,
    },
    #[error("failed to parse schema derivation: {error}")]
    ConfigParse { error: String },
}

impl From<serde_yaml::Error> for FrameCatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        FrameCatalogError::ConfigParse {
            error: err.to_string(),
        }
    }
}

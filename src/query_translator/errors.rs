use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    /// The query could not be parsed. No partial translation is produced.
    #[error("failed to parse query pattern: {message}")]
    Parse { message: String },
    /// Two resolutions targeted the same source offset in one query. This
    /// signals a schema/query inconsistency that must not be papered over.
    #[error("multiple rewrites at byte offset {offset} are ambiguous")]
    AmbiguousRewrite { offset: usize },
}

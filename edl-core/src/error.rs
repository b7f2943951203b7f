use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read source: {0}")]
    SourceIo(#[from] std::io::Error),
    #[error("unsupported emit format: {0}")]
    UnsupportedFormat(String),
    #[error("lex error at byte {position}: no token matches {text:?}")]
    Lex { position: usize, text: String },
    #[error("no document was provided to the assembler")]
    MissingDocument,
    #[error("relationship references unknown entity {0}")]
    UnknownEntity(String),
    #[error("validation references unknown constant {0}")]
    UnknownConstant(String),
    #[error("unknown application type: {0}")]
    UnknownApplicationType(String),
    #[error("unknown relationship cardinality: {0}")]
    UnknownCardinality(String),
}

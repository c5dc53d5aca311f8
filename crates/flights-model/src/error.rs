use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unsupported column type '{0}'")]
    UnknownColumnType(String),
}

use thiserror::Error;

/// Structural problems found while loading a serialized table artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableErrorKind {
    /// Root child count exceeds the node array
    RootOutOfRange,
    /// Leaf table threshold lies inside the node array
    LeafOffsetOverlap,
    /// String table is empty or not NUL-terminated
    UnterminatedStringTable,
}

/// Domain registry error types
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid table: {message}")]
    InvalidTable {
        kind: TableErrorKind,
        message: String,
    },

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    pub(crate) fn invalid_table(kind: TableErrorKind, message: impl Into<String>) -> Self {
        RegistryError::InvalidTable {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_kind_is_matchable() {
        let err = RegistryError::invalid_table(TableErrorKind::RootOutOfRange, "5 > 3");
        match &err {
            RegistryError::InvalidTable { kind, .. } => {
                assert!(matches!(kind, TableErrorKind::RootOutOfRange));
            }
            _ => panic!("expected InvalidTable"),
        }
    }

    #[test]
    fn test_table_error_display_includes_message() {
        let err = RegistryError::invalid_table(
            TableErrorKind::UnterminatedStringTable,
            "string table must end with NUL",
        );
        let display = format!("{}", err);
        assert!(display.contains("must end with NUL"), "got: {}", display);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RegistryError = io.into();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}

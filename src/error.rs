/// Failure categories surfaced to the caller.
///
/// Each kind maps to a fixed process exit code so scripts can tell an empty
/// input apart from an unreachable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Terminal, filesystem or other local I/O failure.
    Io,
    /// Empty input or an unreadable document; no analysis was attempted.
    Validation,
    /// Missing credentials, bad lexicon file, invalid flag values.
    Config,
    /// A classifier could not be invoked (unreachable, HTTP error status).
    Classifier,
    /// A classifier answered, but not in the shape we rely on.
    Contract,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::Validation => 2,
            ErrorKind::Config => 3,
            ErrorKind::Classifier => 4,
            ErrorKind::Contract => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn classifier(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Classifier, message)
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Contract, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let kinds = [
            ErrorKind::Io,
            ErrorKind::Validation,
            ErrorKind::Config,
            ErrorKind::Classifier,
            ErrorKind::Contract,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn constructors_set_kind() {
        let err = AppError::validation("Input text is empty.");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Input text is empty.");
    }
}

// crates/devdesc-rs-pqa/src/error.rs

use crate::diff::DiffError;
use crate::ids::ProfileId;
use crate::orchestrator::AnalysisFailure;
use devdesc_rs_iodd::IoddError;
use std::fmt;

/// Errors raised by the quality-assurance layer.
#[derive(Debug)]
pub enum PqaError {
    /// An IODD document could not be parsed.
    Parse(IoddError),

    /// A profile could not be turned back into text.
    Reconstruction(String),

    /// One of the two documents of a diff could not be read as a tree.
    Diff(DiffError),

    /// JSON (de)serialization failed (configuration or canonical checksums).
    Json(serde_json::Error),

    /// The configuration is well-formed but not usable.
    Config(String),

    /// A stored record does not exist.
    NotFound { kind: &'static str, id: u64 },

    /// The store refused a write. Nothing was written.
    Store(String),

    /// An analysis run ended in the FAILED state.
    Analysis(AnalysisFailure),

    /// A worker or scheduler thread could not be spawned or joined.
    Thread(String),
}

impl PqaError {
    pub(crate) fn profile_not_found(id: ProfileId) -> Self {
        PqaError::NotFound {
            kind: "profile",
            id: id.0,
        }
    }
}

impl From<IoddError> for PqaError {
    fn from(e: IoddError) -> Self {
        PqaError::Parse(e)
    }
}

impl From<DiffError> for PqaError {
    fn from(e: DiffError) -> Self {
        PqaError::Diff(e)
    }
}

impl From<serde_json::Error> for PqaError {
    fn from(e: serde_json::Error) -> Self {
        PqaError::Json(e)
    }
}

impl From<AnalysisFailure> for PqaError {
    fn from(e: AnalysisFailure) -> Self {
        PqaError::Analysis(e)
    }
}

impl fmt::Display for PqaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PqaError::Parse(e) => write!(f, "Parse error: {}", e),
            PqaError::Reconstruction(msg) => write!(f, "Reconstruction error: {}", msg),
            PqaError::Diff(e) => write!(f, "Diff error: {}", e),
            PqaError::Json(e) => write!(f, "JSON error: {}", e),
            PqaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PqaError::NotFound { kind, id } => write!(f, "No {} with id {}", kind, id),
            PqaError::Store(msg) => write!(f, "Store error: {}", msg),
            PqaError::Analysis(e) => write!(f, "Analysis failed: {}", e),
            PqaError::Thread(msg) => write!(f, "Thread error: {}", msg),
        }
    }
}

impl std::error::Error for PqaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PqaError::Json(e) => Some(e),
            PqaError::Diff(e) => Some(e),
            PqaError::Analysis(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::AnalysisStage;

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PqaError = json_err.into();
        assert!(matches!(err, PqaError::Json(_)));
    }

    #[test]
    fn test_display() {
        let err = PqaError::profile_not_found(ProfileId(7));
        assert_eq!(err.to_string(), "No profile with id 7");

        let err: PqaError = AnalysisFailure::new(AnalysisStage::Reconstructing, "boom").into();
        assert_eq!(err.to_string(), "Analysis failed: RECONSTRUCTING: boom");
    }
}

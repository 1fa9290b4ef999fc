//! Unique identifiers for scheduler runs

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one scheduler run
///
/// A run begins when the scheduler is started and ends at teardown. The id
/// appears in the status report header and in run-lifecycle diagnostics so
/// that exported execution traces can be correlated with the run that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a run ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_creation() {
        let id1 = RunId::new();
        let id2 = RunId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_run_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = RunId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_run_id_display_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = RunId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}

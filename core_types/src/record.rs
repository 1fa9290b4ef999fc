//! Completed-execution records for timeline reconstruction

use crate::task::{DeadlineOutcome, TaskKind};
use serde::{Deserialize, Serialize};
use timer_hal::Duration;

/// Immutable record of one completed execution
///
/// Start offsets are relative to system start, so a sequence of records is
/// sufficient to reconstruct a Gantt-style timeline of what ran when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecRecord {
    /// Which task executed
    pub task: TaskKind,
    /// Start of execution, relative to system start
    pub start_offset: Duration,
    /// Measured wall time from start to completion
    pub duration: Duration,
    /// Whether the execution met the deadline frozen at dispatch
    pub deadline_met: bool,
}

impl ExecRecord {
    /// Returns the outcome as an enum
    pub fn outcome(&self) -> DeadlineOutcome {
        if self.deadline_met {
            DeadlineOutcome::Met
        } else {
            DeadlineOutcome::Missed
        }
    }

    /// Report wire form: `EXEC:<task_index>,<start_ms>,<duration_ms>,MET|MISSED`
    pub fn to_report_line(&self) -> String {
        format!(
            "EXEC:{},{},{},{}",
            self.task.index(),
            self.start_offset.as_millis(),
            self.duration.as_millis(),
            self.outcome().as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExecRecord {
        ExecRecord {
            task: TaskKind::EngineControl,
            start_offset: Duration::from_millis(200),
            duration: Duration::from_millis(60),
            deadline_met: true,
        }
    }

    #[test]
    fn test_report_line_format() {
        assert_eq!(sample().to_report_line(), "EXEC:1,200,60,MET");

        let missed = ExecRecord {
            deadline_met: false,
            ..sample()
        };
        assert_eq!(missed.to_report_line(), "EXEC:1,200,60,MISSED");
    }

    #[test]
    fn test_outcome_matches_flag() {
        assert_eq!(sample().outcome(), DeadlineOutcome::Met);
    }

    #[test]
    fn test_record_serializes_named_fields() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["task"], "EngineControl");
        assert!(json.get("start_offset").is_some());
        assert!(json.get("deadline_met").is_some());
    }
}

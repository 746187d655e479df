//! Named points in a pipeline run recorded in the progress log

use std::fmt;

/// Pipeline milestones, in the order a successful run reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    JobStarted,
    ExtractStarted,
    ExtractEnded,
    TransformStarted,
    TransformEnded,
    LoadStarted,
    LoadEnded,
    JobEnded,
}

impl Milestone {
    pub const ALL: [Milestone; 8] = [
        Milestone::JobStarted,
        Milestone::ExtractStarted,
        Milestone::ExtractEnded,
        Milestone::TransformStarted,
        Milestone::TransformEnded,
        Milestone::LoadStarted,
        Milestone::LoadEnded,
        Milestone::JobEnded,
    ];

    /// Message written to the progress log
    pub fn message(&self) -> &'static str {
        match self {
            Milestone::JobStarted => "ETL Job Started",
            Milestone::ExtractStarted => "Extract phase Started",
            Milestone::ExtractEnded => "Extract phase Ended",
            Milestone::TransformStarted => "Transform phase Started",
            Milestone::TransformEnded => "Transform phase Ended",
            Milestone::LoadStarted => "Load phase Started",
            Milestone::LoadEnded => "Load phase Ended",
            Milestone::JobEnded => "ETL Job Ended",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use std::fmt;

use crate::models::analysis::CompetitorAnalysis;

/// Exit code reported when at least one source failed
pub const PARTIAL_FAILURE_EXIT_CODE: i32 = 2;

/// Where a per-source failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The scraper could not fetch the page; the model was never called
    Fetch,
    /// The model call itself failed
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fetch => write!(f, "fetch"),
            FailureKind::Transport => write!(f, "transport"),
        }
    }
}

/// Result of analysing one competitor source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success {
        url: String,
        analysis: CompetitorAnalysis,
    },
    Failure {
        url: String,
        kind: FailureKind,
        error: String,
    },
}

impl AnalysisOutcome {
    pub fn url(&self) -> &str {
        match self {
            AnalysisOutcome::Success { url, .. } | AnalysisOutcome::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success { .. })
    }

    pub fn analysis(&self) -> Option<&CompetitorAnalysis> {
        match self {
            AnalysisOutcome::Success { analysis, .. } => Some(analysis),
            AnalysisOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success { .. } => None,
            AnalysisOutcome::Failure { error, .. } => Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub success: usize,
    pub failure: usize,
    pub total: usize,
}

/// Ordered outcomes of one batch run, one per input source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    outcomes: Vec<AnalysisOutcome>,
}

impl BatchReport {
    pub fn new(
        outcomes: Vec<AnalysisOutcome>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>
    ) -> Self {
        Self { started_at, finished_at, outcomes }
    }

    pub fn outcomes(&self) -> &[AnalysisOutcome] {
        &self.outcomes
    }

    pub fn counts(&self) -> OutcomeCounts {
        let success = self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .count();
        OutcomeCounts {
            success,
            failure: self.outcomes.len() - success,
            total: self.outcomes.len(),
        }
    }

    pub fn is_all_success(&self) -> bool {
        self.outcomes.iter().all(AnalysisOutcome::is_success)
    }

    /// 0 when every source succeeded, non-zero otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_all_success() { 0 } else { PARTIAL_FAILURE_EXIT_CODE }
    }
}

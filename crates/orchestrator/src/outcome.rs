use std::time::Duration;

use crate::collaborators::CollaboratorError;

/// What a single downstream step decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The collaborator answered yes.
    Approved,
    /// The collaborator answered no.
    Rejected,
    /// The collaborator could not be reached or gave no usable answer.
    Unavailable(String),
}

impl StepOutcome {
    /// Reduces a timed call to an outcome. `None` means the call timed out.
    pub fn from_call(result: Option<Result<bool, CollaboratorError>>, timeout: Duration) -> Self {
        match result {
            Some(Ok(true)) => StepOutcome::Approved,
            Some(Ok(false)) => StepOutcome::Rejected,
            Some(Err(err)) => StepOutcome::Unavailable(err.to_string()),
            None => StepOutcome::Unavailable(format!("timed out after {timeout:?}")),
        }
    }

    /// Short label for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepOutcome::Approved => "approved",
            StepOutcome::Rejected => "rejected",
            StepOutcome::Unavailable(_) => "unavailable",
        }
    }
}

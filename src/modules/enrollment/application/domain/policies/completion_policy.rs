use std::str::FromStr;

/// What a second completion of an already-completed enrollment does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Overwrite `completed_at` and restart the access window.
    #[default]
    Extend,
    /// Refuse with `AlreadyCompleted`.
    Reject,
}

impl FromStr for CompletionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extend" => Ok(CompletionPolicy::Extend),
            "reject" => Ok(CompletionPolicy::Reject),
            other => Err(format!(
                "unknown completion policy '{other}', expected 'extend' or 'reject'"
            )),
        }
    }
}

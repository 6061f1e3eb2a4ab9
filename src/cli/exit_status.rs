use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Nothing left to do
/// - `Failure` (1): A dry run found new texts or files to rewrite
/// - `Error` (2): Command failed (config error, unreadable locale file, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

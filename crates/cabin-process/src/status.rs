use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus as StdExitStatus;

/// A decomposed POSIX wait status, exposing the pieces `std::process`
/// bundles into one opaque value: whether the child exited normally,
/// was killed or stopped by a signal, and whether it dumped core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
    term_signal: Option<i32>,
    stop_signal: Option<i32>,
    core_dumped: bool,
}

impl ExitStatus {
    pub(crate) fn from_std(status: StdExitStatus) -> Self {
        ExitStatus {
            code: status.code(),
            term_signal: status.signal(),
            stop_signal: status.stopped_signal(),
            core_dumped: status.core_dumped(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn exited_normally(&self) -> bool {
        self.code.is_some()
    }

    pub fn killed_by_signal(&self) -> bool {
        self.term_signal.is_some()
    }

    pub fn stopped_by_signal(&self) -> bool {
        self.stop_signal.is_some()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.code
    }

    pub fn term_signal(&self) -> Option<i32> {
        self.term_signal
    }

    pub fn stop_signal(&self) -> Option<i32> {
        self.stop_signal
    }

    pub fn core_dumped(&self) -> bool {
        self.core_dumped
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code {
            return write!(f, "exited with code {code}");
        }
        if let Some(signal) = self.term_signal {
            write!(f, "killed by signal {signal}")?;
            if self.core_dumped {
                write!(f, " (core dumped)")?;
            }
            return Ok(());
        }
        if let Some(signal) = self.stop_signal {
            return write!(f, "stopped by signal {signal}");
        }
        write!(f, "exited for an unknown reason")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::process::Command as StdCommand;

    #[test]
    fn success_status() {
        let status = StdCommand::new("true").status().unwrap();
        let status = ExitStatus::from_std(status);
        assert!(status.success());
        assert_eq!(status.exit_code(), Some(0));
        assert_eq!(status.to_string(), "exited with code 0");
    }

    #[test]
    fn failure_status() {
        let status = StdCommand::new("false").status().unwrap();
        let status = ExitStatus::from_std(status);
        assert!(!status.success());
        assert_eq!(status.exit_code(), Some(1));
    }
}

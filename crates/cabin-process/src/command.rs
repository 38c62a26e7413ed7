use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio as StdStdio};

use log::debug;
use snafu::ResultExt;

use crate::error::{self, Result};
use crate::status::ExitStatus;

/// How a child's stdout/stderr stream is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stdio {
    #[default]
    Inherit,
    Null,
    Piped,
}

impl Stdio {
    fn to_std(self) -> StdStdio {
        match self {
            Stdio::Inherit => StdStdio::inherit(),
            Stdio::Null => StdStdio::null(),
            Stdio::Piped => StdStdio::piped(),
        }
    }
}

/// A child process invocation, configured before spawning.
///
/// This mirrors `std::process::Command` closely; it exists so the rest
/// of `cabin` depends on one narrow, typed surface (program/args/cwd/
/// stdio/env, `spawn`, `output`) rather than reaching for `std::process`
/// directly at every call site, the same way `twoliter::common::exec`
/// centralizes its process invocations behind one helper.
#[derive(Debug, Clone)]
pub struct Command {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdout: Stdio,
    stderr: Stdio,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Command {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            stdout: Stdio::Inherit,
            stderr: Stdio::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn stdout(mut self, stdio: Stdio) -> Self {
        self.stdout = stdio;
        self
    }

    pub fn stderr(mut self, stdio: Stdio) -> Self {
        self.stderr = stdio;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args_slice(&self) -> &[String] {
        &self.args
    }

    fn to_std(&self) -> StdCommand {
        let mut cmd = StdCommand::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.stdout(self.stdout.to_std());
        cmd.stderr(self.stderr.to_std());
        cmd
    }

    pub fn spawn(&self) -> Result<Child> {
        debug!("running: {} {:?}", self.program, self.args);
        let child = self
            .to_std()
            .spawn()
            .context(error::SpawnSnafu { program: self.program.clone() })?;
        Ok(Child {
            inner: child,
            program: self.program.clone(),
        })
    }

    /// Spawns and waits, capturing stdout/stderr regardless of the
    /// configured `Stdio` (forcing `Piped` for the duration of the
    /// call), returning `Err` if the command did not exit successfully.
    pub fn output(&self) -> Result<CommandOutput> {
        let mut with_pipes = self.clone();
        with_pipes.stdout = Stdio::Piped;
        with_pipes.stderr = Stdio::Piped;
        let child = with_pipes.spawn()?;
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return error::UnsuccessfulSnafu {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: output.stderr_string(),
            }
            .fail();
        }
        Ok(output)
    }
}

/// A running child process. Owns the child's pipe file descriptors
/// (when configured `Piped`) until `wait`/`wait_with_output` reaps it.
pub struct Child {
    inner: std::process::Child,
    program: String,
}

impl Child {
    /// Reads stdout/stderr to completion and reaps the child.
    pub fn wait_with_output(self) -> Result<CommandOutput> {
        let program = self.program.clone();
        let output = self
            .inner
            .wait_with_output()
            .context(error::WaitSnafu { program })?;
        Ok(CommandOutput {
            status: ExitStatus::from_std(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Reaps the child without reading any configured pipes; only safe
    /// to call when stdout/stderr are `Inherit` or `Null`.
    pub fn wait(mut self) -> Result<ExitStatus> {
        let status = self
            .inner
            .wait()
            .context(error::WaitSnafu { program: self.program.clone() })?;
        Ok(ExitStatus::from_std(status))
    }
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn captures_stdout() {
        let output = Command::new("echo").arg("hello").output().unwrap();
        assert_eq!(output.stdout_string().trim(), "hello");
        assert!(output.status.success());
    }

    #[test]
    fn nonzero_exit_is_an_error() {
        let result = Command::new("sh").arg("-c").arg("exit 3").output();
        assert!(result.is_err());
    }
}

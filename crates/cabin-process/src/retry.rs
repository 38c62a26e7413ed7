use std::thread;
use std::time::Duration;

use log::warn;

use crate::command::{Command, CommandOutput};
use crate::error::Result;

/// Runs `cmd`, retrying on a non-success exit with exponential backoff
/// (1s, 2s, 4s, ...) up to `retries` additional attempts, surfacing the
/// captured stderr from the final attempt in the error context.
///
/// Mirrors the attempt-counter retry loop in `buildsys::builder`'s
/// `docker()` helper, generalized from a regex-gated retry to a plain
/// retry-on-any-failure policy (see the Open Question decision in
/// `DESIGN.md` about whether deterministic failures should retry).
pub fn retry_command_output(cmd: &Command, retries: u32) -> Result<CommandOutput> {
    let mut backoff = Duration::from_secs(1);
    let mut attempt = 0;
    loop {
        match cmd.output() {
            Ok(output) => return Ok(output),
            Err(err) => {
                if attempt >= retries {
                    return Err(err);
                }
                warn!(
                    "command `{}` failed (attempt {}/{}): {}; retrying in {:?}",
                    cmd.program(),
                    attempt + 1,
                    retries + 1,
                    err,
                    backoff
                );
                thread::sleep(backoff);
                backoff *= 2;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn succeeds_without_retry() {
        let cmd = Command::new("echo").arg("ok");
        let output = retry_command_output(&cmd, 3).unwrap();
        assert_eq!(output.stdout_string().trim(), "ok");
    }

    #[test]
    fn gives_up_after_retries() {
        let cmd = Command::new("sh").arg("-c").arg("exit 1");
        let result = retry_command_output(&cmd, 0);
        assert!(result.is_err());
    }
}

use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
struct RunDetails {
    stdout: String,
    stderr: String,
    /// None when the process was killed by a signal
    exit_code: Option<i32>,
}

#[derive(Debug)]
pub struct RunResult {
    result: Result<RunDetails, String>,
    command: String,
    shell: String,
}

impl RunResult {
    /// Returns true if the command could not be started at all
    pub fn not_found(&self) -> bool {
        self.result.is_err()
    }

    /// Returns true if the command ran and returned a non-zero exit code
    pub fn non_zero_exit(&self) -> bool {
        match &self.result {
            Ok(details) => details.exit_code != Some(0),
            Err(_) => false,
        }
    }

    /// Short human-readable reason for the failure, None if the command succeeded
    pub fn failure_reason(&self) -> Option<String> {
        match &self.result {
            Err(e) if self.not_found() => Some(format!("could not run command with shell {}: {}", self.shell, e)),
            Ok(d) if self.non_zero_exit() => {
                let code = d.exit_code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string());
                Some(format!("command returned non-zero code ({})\n{}", code, d.stderr.trim_end()))
            }
            _ => None,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn stdout(&self) -> &str {
        self.result.as_ref().map(|d| d.stdout.as_str()).unwrap_or("")
    }

    #[cfg(test)]
    fn stderr(&self) -> &str {
        self.result.as_ref().map(|d| d.stderr.as_str()).unwrap_or("")
    }

    #[cfg(test)]
    fn exit_code(&self) -> Option<i32> {
        self.result.as_ref().ok().and_then(|d| d.exit_code)
    }
}

/// Runs `command` through `shell -c`, capturing stdout and stderr
pub fn run_command(command: &str, shell: &str) -> RunResult {
    let output = Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

    RunResult {
        result: output.map(|o| RunDetails {
                stdout: String::from_utf8_lossy(&o.stdout).to_string(),
                stderr: String::from_utf8_lossy(&o.stderr).to_string(),
                exit_code: o.status.code(),
        }).map_err(|e| e.to_string()),
        command: String::from(command),
        shell: String::from(shell),
    }
}

//! Subprocess-backed check runner.
//!
//! gpg phrases its verdicts according to the message locale, and the
//! output matchers only understand the English phrasing. Every child
//! process therefore gets `LANGUAGE` pinned; the parent environment is
//! left untouched.

use std::process::{Command, Stdio};

use super::command::{CheckCommand, CheckOutput, CheckRunner};

/// Message locale forced onto git and gpg.
pub const PINNED_LANGUAGE: &str = "en_US.UTF-8";

/// Exit code reported when the git executable could not be started.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Runs checks by invoking the git executable.
#[derive(Debug, Clone)]
pub struct GitCheckRunner {
    program: String,
}

impl Default for GitCheckRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCheckRunner {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CheckRunner for GitCheckRunner {
    fn run_check(&self, command: &CheckCommand) -> CheckOutput {
        let command_line = command.command_line(&self.program);

        log::debug!("CHECK_RUN command={}", command_line);

        let result = Command::new(&self.program)
            .arg("--git-dir")
            .arg(command.git_dir())
            .args(command.args())
            .env("LANGUAGE", PINNED_LANGUAGE)
            .stdin(Stdio::null())
            .output();

        match result {
            Ok(output) => {
                // Killed by a signal: no code, still a failure.
                let exit_code = output.status.code().unwrap_or(-1);

                let mut merged = String::from_utf8_lossy(&output.stdout).into_owned();
                if !output.stderr.is_empty() {
                    if !merged.is_empty() && !merged.ends_with('\n') {
                        merged.push('\n');
                    }
                    merged.push_str(&String::from_utf8_lossy(&output.stderr));
                }

                CheckOutput {
                    command_line,
                    exit_code,
                    output: merged.trim_end_matches('\n').to_string(),
                }
            }
            Err(e) => {
                log::warn!("CHECK_SPAWN_FAILED command={} error={}", command_line, e);
                CheckOutput {
                    command_line,
                    exit_code: SPAWN_FAILURE_EXIT_CODE,
                    output: format!("failed to run {}: {}", self.program, e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_missing_program_reports_spawn_failure() {
        let runner = GitCheckRunner::new("/nonexistent/definitely-not-git");
        let output = runner.run_check(&CheckCommand::verify_commit(Path::new("/tmp/nowhere")));

        assert_eq!(output.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert!(output.output.starts_with("failed to run /nonexistent/definitely-not-git"));
        assert_eq!(
            output.command_line,
            "/nonexistent/definitely-not-git --git-dir '/tmp/nowhere/.git' verify-commit --verbose HEAD"
        );
    }

    #[test]
    fn test_default_program() {
        assert_eq!(GitCheckRunner::default().program(), "git");
    }

    /// Stand-in for git: reports its locale on stdout and a gpg key line on stderr.
    #[cfg(unix)]
    fn fake_git(dir: &Path) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-git");
        std::fs::write(
            &script,
            "#!/bin/sh\n\
             echo \"payload LANGUAGE=$LANGUAGE\"\n\
             echo 'gpg:                using RSA key 4889C20D148231DC' >&2\n\
             exit 3\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.display().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_child_locale_pinned_and_stderr_appended() {
        let dir = tempfile::tempdir().unwrap();
        let runner = GitCheckRunner::new(&fake_git(dir.path()));
        std::env::set_var("LANGUAGE", "de_DE");

        let output = runner.run_check(&CheckCommand::verify_commit(dir.path()));

        assert_eq!(
            output.output,
            "payload LANGUAGE=en_US.UTF-8\ngpg:                using RSA key 4889C20D148231DC"
        );
        assert_eq!(output.exit_code, 3);
        assert_eq!(std::env::var("LANGUAGE").as_deref(), Ok("de_DE"));
    }
}

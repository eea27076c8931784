//! Check commands and their captured output.

use std::path::{Path, PathBuf};

/// The git invocations the verifier needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckCommand {
    /// `verify-commit --verbose HEAD`
    VerifyCommit { git_dir: PathBuf },
    /// `tag --points-at HEAD`
    ListTags { git_dir: PathBuf },
    /// `tag -v <tag>`
    VerifyTag { git_dir: PathBuf, tag: String },
}

impl CheckCommand {
    pub fn verify_commit(install_path: &Path) -> Self {
        CheckCommand::VerifyCommit {
            git_dir: install_path.join(".git"),
        }
    }

    pub fn list_tags(install_path: &Path) -> Self {
        CheckCommand::ListTags {
            git_dir: install_path.join(".git"),
        }
    }

    pub fn verify_tag(install_path: &Path, tag: &str) -> Self {
        CheckCommand::VerifyTag {
            git_dir: install_path.join(".git"),
            tag: tag.to_string(),
        }
    }

    pub fn git_dir(&self) -> &Path {
        match self {
            CheckCommand::VerifyCommit { git_dir }
            | CheckCommand::ListTags { git_dir }
            | CheckCommand::VerifyTag { git_dir, .. } => git_dir,
        }
    }

    /// Arguments following `--git-dir <dir>`.
    pub fn args(&self) -> Vec<&str> {
        match self {
            CheckCommand::VerifyCommit { .. } => vec!["verify-commit", "--verbose", "HEAD"],
            CheckCommand::ListTags { .. } => vec!["tag", "--points-at", "HEAD"],
            CheckCommand::VerifyTag { tag, .. } => vec!["tag", "-v", tag.as_str()],
        }
    }

    /// Shell-style rendering, kept verbatim in check results for auditing.
    pub fn command_line(&self, program: &str) -> String {
        let git_dir = shell_quote(&self.git_dir().to_string_lossy());

        match self {
            CheckCommand::VerifyTag { tag, .. } => format!(
                "{} --git-dir {} tag -v {}",
                program,
                git_dir,
                shell_quote(tag)
            ),
            _ => format!("{} --git-dir {} {}", program, git_dir, self.args().join(" ")),
        }
    }
}

/// Single-quote a shell argument.
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// What came back from running a `CheckCommand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    pub command_line: String,
    pub exit_code: i32,
    pub output: String,
}

impl CheckOutput {
    pub fn new(command_line: &str, exit_code: i32, output: &str) -> Self {
        Self {
            command_line: command_line.to_string(),
            exit_code,
            output: output.to_string(),
        }
    }

    /// Non-blank output lines, for `tag --points-at` listings.
    pub fn non_blank_lines(&self) -> Vec<String> {
        self.output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Runs check commands. Implementations must not fail: a process that
/// could not be run is reported through its exit code and output.
pub trait CheckRunner {
    fn run_check(&self, command: &CheckCommand) -> CheckOutput;
}

impl<R: CheckRunner + ?Sized> CheckRunner for &R {
    fn run_check(&self, command: &CheckCommand) -> CheckOutput {
        (**self).run_check(command)
    }
}

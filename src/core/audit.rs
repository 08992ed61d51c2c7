//! Audit trail.
//!
//! Records every store mutation as a git commit inside the store root. The
//! history is best-effort: callers log failures and keep the completed
//! mutation.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::constants;
use crate::error::{AuditError, Result};

/// Git-backed mutation history for one store root.
#[derive(Debug, Clone)]
pub struct Audit {
    root: PathBuf,
    enabled: bool,
}

impl Audit {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.store_dir.clone(),
            enabled: config.audit,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the store root already has a history.
    pub fn is_initialized(&self) -> bool {
        self.root.join(".git").exists()
    }

    /// Create the history if it does not exist yet.
    ///
    /// Initializes a repository, routes `*.age` diffs through `textconv`
    /// (a command that decrypts a ciphertext file to stdout), and commits
    /// the whole store. Returns `true` if a history was created.
    pub fn init(&self, textconv: &str) -> Result<bool> {
        if !self.enabled || self.is_initialized() {
            return Ok(false);
        }

        info!(root = %self.root.display(), "initializing audit history");

        self.git(["init", "--quiet"])?;
        self.git(["config", "diff.age.textconv", textconv])?;
        fs::write(self.root.join(".gitattributes"), constants::GITATTRIBUTES)?;
        self.git(["add", "--all"])?;
        self.commit("initial commit")?;

        Ok(true)
    }

    /// Stage `paths` and commit them with `message`.
    ///
    /// Paths may be absolute (inside the root) or relative to it; removed
    /// files are staged as deletions.
    pub fn record<P: AsRef<Path>>(&self, paths: &[P], message: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut add: Vec<&OsStr> = vec![OsStr::new("add"), OsStr::new("--all"), OsStr::new("--")];
        let relative: Vec<PathBuf> = paths
            .iter()
            .map(|p| {
                let p = p.as_ref();
                p.strip_prefix(&self.root).unwrap_or(p).to_path_buf()
            })
            .collect();
        add.extend(relative.iter().map(|p| p.as_os_str()));

        self.git(add)?;
        self.commit(message)?;

        debug!(message, files = paths.len(), "audit recorded");
        Ok(())
    }

    /// Run an arbitrary git command in the store root, attached to the
    /// terminal.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Disabled` when auditing is turned off.
    pub fn passthrough<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<ExitStatus> {
        if !self.enabled {
            return Err(AuditError::Disabled.into());
        }

        let status = self
            .command()?
            .args(args)
            .status()
            .map_err(AuditError::Spawn)?;
        Ok(status)
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut args: Vec<String> = Vec::new();
        if !self.has_author()? {
            let user = whoami::username();
            let host = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
            args.push("-c".to_string());
            args.push(format!("user.name={}", user));
            args.push("-c".to_string());
            args.push(format!("user.email={}@{}", user, host));
        }
        args.extend(["commit", "--quiet", "--message", message].map(String::from));

        self.git(args)?;
        Ok(())
    }

    fn has_author(&self) -> Result<bool> {
        for key in ["user.name", "user.email"] {
            let output = self.output(["config", "--get", key])?;
            if !output.status.success() || output.stdout.iter().all(u8::is_ascii_whitespace) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn command(&self) -> Result<Command> {
        let git = which::which("git").map_err(|_| AuditError::GitNotFound)?;
        let mut cmd = Command::new(git);
        cmd.arg("-C").arg(&self.root);
        Ok(cmd)
    }

    fn output<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command()?
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AuditError::Spawn(e).into())
    }

    /// Run git and fail on a non-zero exit.
    fn git<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let output = self.output(&args)?;

        if !output.status.success() {
            let command = args
                .iter()
                .map(|a| a.as_ref().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            let stderr = String::from_utf8_lossy(&output.stderr)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            return Err(AuditError::CommandFailed { command, stderr }.into());
        }
        Ok(())
    }
}

/// Shell-quote a path for use inside a git config command string.
pub fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

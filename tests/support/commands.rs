//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a strongbox command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_DATA_HOME inside the temporary home directory
    /// - STRONGBOX_DIR / STRONGBOX_KEYS_DIR inside the test directory
    /// - STRONGBOX_NOGIT unless the environment enables auditing
    /// - NO_COLOR so output can be matched literally
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("strongbox").expect("failed to find strongbox binary");
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_DATA_HOME", self.home.path().join(".local/share"));
        cmd.env("STRONGBOX_DIR", self.store());
        cmd.env("STRONGBOX_KEYS_DIR", self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("STRONGBOX_LOG");
        cmd.env_remove("STRONGBOX_LENGTH");
        cmd.env_remove("STRONGBOX_PATTERN");
        if self.audit {
            cmd.env_remove("STRONGBOX_NOGIT");
            cmd.env("GIT_CONFIG_NOSYSTEM", "1");
        } else {
            cmd.env("STRONGBOX_NOGIT", "1");
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `strongbox add` entering `password` twice.
    pub fn add(&self, name: &str, password: &str) -> Output {
        self.cmd()
            .args(["add", name])
            .write_stdin(format!("n{}\n{}\n", password, password))
            .output()
            .expect("failed to run strongbox add")
    }

    /// `strongbox add` with a generated password.
    pub fn add_generated(&self, name: &str) -> Output {
        self.cmd()
            .args(["add", name])
            .write_stdin("y")
            .output()
            .expect("failed to run strongbox add")
    }

    /// Shortcut for `strongbox show`.
    pub fn show(&self, name: &str) -> Output {
        self.cmd()
            .args(["show", name])
            .output()
            .expect("failed to run strongbox show")
    }

    /// `strongbox delete` answering the confirmation with `answer`.
    pub fn delete(&self, name: &str, answer: &str) -> Output {
        self.cmd()
            .args(["delete", name])
            .write_stdin(answer)
            .output()
            .expect("failed to run strongbox delete")
    }

    /// `strongbox edit` with `editor` as $EDITOR.
    pub fn edit(&self, name: &str, editor: &str) -> Output {
        self.cmd()
            .args(["edit", name])
            .env("EDITOR", editor)
            .output()
            .expect("failed to run strongbox edit")
    }

    /// Shortcut for `strongbox list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run strongbox list")
    }

    /// Shortcut for `strongbox list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run strongbox list --json")
    }

    /// Shortcut for `strongbox rotate`.
    pub fn rotate(&self) -> Output {
        self.cmd()
            .arg("rotate")
            .output()
            .expect("failed to run strongbox rotate")
    }

    /// Shortcut for `strongbox git ...`.
    pub fn git(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("git")
            .args(args)
            .output()
            .expect("failed to run strongbox git")
    }
}

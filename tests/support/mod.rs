use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for simblog with no inherited configuration
pub fn simblog() -> Command {
    let mut cmd = cargo_bin_cmd!("simblog");
    cmd.env_remove("SIMBLOG_DB")
        .env_remove("SIMBLOG_CONFIG")
        .env_remove("SIMBLOG_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A temporary directory holding one database
pub struct TestDb {
    pub dir: TempDir,
    pub db: PathBuf,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("simblog.db");
        Self { dir, db }
    }

    /// A simblog command already pointed at this database
    pub fn cmd(&self) -> Command {
        let mut cmd = simblog();
        cmd.arg("--db").arg(&self.db);
        cmd
    }

    /// Create a document from text passed on stdin
    pub fn create(&self, category: &str, path: &str, text: &str) {
        self.cmd()
            .args(["create", "--category", category, "--path", path])
            .write_stdin(text)
            .assert()
            .success();
    }

    /// Write a file inside the temp directory and return its path
    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Parse stdout as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Paths of the `similar` array in `show --format json` output
#[allow(dead_code)]
pub fn similar_paths(json: &serde_json::Value) -> Vec<String> {
    json["similar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap().to_string())
        .collect()
}

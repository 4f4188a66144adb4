//! End-to-end tests running the claude-manager binary

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::integration::write_document;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new(document: Option<Value>) -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["home", "config", "backups", "agents"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        let sandbox = Self { dir };
        if let Some(document) = document {
            write_document(&sandbox.document(), &document);
        }
        sandbox
    }

    fn document(&self) -> PathBuf {
        self.dir.path().join("work").join(".claude.json")
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn run(&self, args: &[&str]) -> Output {
        let bin = env!("CARGO_BIN_EXE_claude-manager");
        Command::new(bin)
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("config"))
            .env("CLAUDE_MANAGER__STORE__BACKUP_DIR", self.path("backups"))
            .env("CLAUDE_MANAGER__AGENTS__GLOBAL_DIR", self.path("agents"))
            .env_remove("CLAUDE_MANAGER__STORE__RETAIN_BACKUPS")
            .env_remove("CLAUDE_MANAGER__STORE__BACKUP_ON_SAVE")
            .env_remove("CLAUDE_MANAGER_LOG")
            .arg("--document")
            .arg(self.document())
            .args(args)
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{:?} failed: stderr={}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.run_ok(args)).unwrap()
    }

    fn saved(&self) -> Value {
        serde_json::from_slice(&fs::read(self.document()).unwrap()).unwrap()
    }

    fn backup_count(&self) -> usize {
        fs::read_dir(self.path("backups")).unwrap().count()
    }
}

fn sample_document() -> Value {
    json!({
        "numStartups": 3,
        "projects": {
            "/work/alpha": {
                "history": [{"display": "one"}, {"display": "two"}, {"display": "three"}],
                "hasTrustDialogAccepted": true
            },
            "/work/beta": {}
        }
    })
}

#[test]
fn test_projects_json() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let listing = sandbox.run_json(&["projects", "--format", "json"]);
    assert_eq!(listing["total"], json!(2));
    assert_eq!(listing["projects"][0]["path"], json!("/work/alpha"));
    assert_eq!(listing["projects"][0]["historyCount"], json!(3));
    assert_eq!(listing["projects"][0]["lastAccessed"], json!("three"));
}

#[test]
fn test_projects_text_mentions_every_project() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let out = sandbox.run_ok(&["projects"]);
    assert!(out.contains("/work/alpha"));
    assert!(out.contains("/work/beta"));
    assert!(out.contains("Total: 2 project(s)"));
}

#[test]
fn test_remove_with_yes_backs_up_first() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let out = sandbox.run_ok(&["remove", "/work/beta", "--yes"]);
    assert!(out.contains("Removed project"));
    assert!(sandbox.saved()["projects"].get("/work/beta").is_none());
    assert_eq!(sandbox.saved()["numStartups"], json!(3));
    assert_eq!(sandbox.backup_count(), 1);
}

#[test]
fn test_no_backup_flag() {
    let sandbox = Sandbox::new(Some(sample_document()));
    sandbox.run_ok(&["history", "clear", "/work/alpha", "--yes", "--no-backup"]);
    assert_eq!(sandbox.saved()["projects"]["/work/alpha"]["history"], json!([]));
    assert_eq!(sandbox.backup_count(), 0);
}

#[test]
fn test_history_keep() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let out = sandbox.run_ok(&["history", "keep", "/work/alpha", "1", "--yes"]);
    assert!(out.contains("Removed 2"));
    assert_eq!(
        sandbox.saved()["projects"]["/work/alpha"]["history"],
        json!([{"display": "three"}])
    );
}

#[test]
fn test_unknown_project_fails() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let output = sandbox.run(&["show", "/nowhere"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Project not found: /nowhere"));
}

#[test]
fn test_missing_document_fails() {
    let sandbox = Sandbox::new(None);
    let output = sandbox.run(&["stats"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_backup_create_list_restore() {
    let sandbox = Sandbox::new(Some(sample_document()));
    sandbox.run_ok(&["backup", "create"]);
    let backups = sandbox.run_json(&["backup", "list", "--format", "json"]);
    let name = backups[0]["name"].as_str().unwrap().to_string();

    sandbox.run_ok(&["remove", "/work/alpha", "--yes", "--no-backup"]);
    assert!(sandbox.saved()["projects"].get("/work/alpha").is_none());

    let out = sandbox.run_ok(&["backup", "restore", &name, "--yes"]);
    assert!(out.contains(&name));
    assert_eq!(sandbox.saved(), sample_document());

    sandbox.run_ok(&["backup", "delete", &name, "--yes"]);
    assert_eq!(sandbox.backup_count(), 0);
}

#[test]
fn test_mcp_template_and_list() {
    let sandbox = Sandbox::new(Some(sample_document()));
    let out = sandbox.run_ok(&["mcp", "set", "/work/beta", "gh", "--template", "github"]);
    assert!(out.contains("Saved MCP server 'gh'"));

    let listing = sandbox.run_json(&["mcp", "list", "/work/beta", "--format", "json"]);
    assert_eq!(listing["mcpServers"]["gh"]["command"], json!("npx"));

    let output = sandbox.run(&["mcp", "set", "/work/beta", "bad", "--config", "{\"args\": []}"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing required fields"));

    sandbox.run_ok(&["mcp", "toggle-all", "/work/beta"]);
    assert_eq!(
        sandbox.saved()["projects"]["/work/beta"]["enableAllProjectMcpServers"],
        json!(true)
    );
}

#[test]
fn test_agents_listing() {
    let sandbox = Sandbox::new(None);
    fs::write(
        sandbox.path("agents/coder.md"),
        "---\nname: coder\ndescription: Writes code\n---\n",
    )
    .unwrap();
    let agents = sandbox.run_json(&["agents", "--format", "json"]);
    assert_eq!(agents[0]["name"], json!("coder"));
    assert_eq!(agents[0]["agentType"], json!("global"));
}

#[test]
fn test_settings_shows_document_override() {
    let sandbox = Sandbox::new(None);
    let settings = sandbox.run_json(&["settings", "--format", "json"]);
    assert_eq!(
        Path::new(settings["store"]["document_path"].as_str().unwrap()),
        sandbox.document()
    );
}

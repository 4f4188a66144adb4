//! Integration tests for agent discovery

use claude_manager::agent::AgentScanner;
use claude_manager::model::AgentType;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_agent(dir: &Path, file: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn test_global_and_project_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let global = temp_dir.path().join("global");
    let project = temp_dir.path().join("project");
    let local = project.join(".claude/agents");

    write_agent(
        &global,
        "reviewer.md",
        "---\nname: reviewer\ndescription: Reviews code\ntools: Read, Grep, Glob, Bash\n---\nBody",
    );
    write_agent(&global, "planner.md", "---\ndescription: Plans work\n---\n");
    write_agent(&global, "broken.md", "no frontmatter here");
    write_agent(&global, "notes.txt", "---\nname: notes\n---\n");
    write_agent(
        &local,
        "reviewer.md",
        "---\nname: reviewer\ndescription: Project reviewer\nlearning_enabled: true\n---\n",
    );

    let scanner = AgentScanner::new(&global, ".claude/agents");

    let global_only = scanner.scan(None);
    assert_eq!(global_only.keys().collect::<Vec<_>>(), vec!["planner", "reviewer"]);
    let reviewer = &global_only["reviewer"];
    assert_eq!(reviewer.agent_type, AgentType::Global);
    assert_eq!(reviewer.tools, vec!["Read", "Grep", "Glob", "Bash"]);
    assert_eq!(reviewer.tools_display(), "Read, Grep, Glob +1 more");

    let merged = scanner.scan(Some(&project));
    assert_eq!(merged.len(), 2);
    let reviewer = &merged["reviewer"];
    assert_eq!(reviewer.agent_type, AgentType::Project);
    assert_eq!(reviewer.description, "Project reviewer");
    assert!(reviewer.is_advanced());
    assert_eq!(merged["planner"].agent_type, AgentType::Global);
}

#[test]
fn test_missing_directories_are_empty() {
    let temp_dir = TempDir::new().unwrap();
    let scanner = AgentScanner::new(temp_dir.path().join("nope"), ".claude/agents");
    assert!(scanner.scan(Some(&temp_dir.path().join("also-nope"))).is_empty());
}

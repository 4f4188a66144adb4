//! Any project either reads back exactly as written, or refuses to serialize

use claude_manager::error::StorageError;
use claude_manager::model::{HistoryEntry, Project, ServerNames, MODELED_KEYS};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,12}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

/// Mostly free-form keys, with the occasional modeled field name mixed in.
fn extra_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "x[a-zA-Z]{1,8}",
        1 => prop::sample::select(MODELED_KEYS).prop_map(str::to_string),
    ]
}

fn server_names() -> impl Strategy<Value = ServerNames> {
    // Few distinct names so repeats are common.
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..6)
        .prop_map(|names| names.into_iter().collect())
}

prop_compose! {
    fn arbitrary_project()(
        path in "/[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        tools in prop::collection::vec("[A-Za-z()*:]{1,12}", 0..5),
        history in prop::collection::vec("[a-z ]{0,16}", 0..6),
        servers in prop::collection::btree_map("[a-z]{1,6}", "[a-z]{1,8}", 0..4),
        enabled in server_names(),
        disabled in server_names(),
        patterns in prop::collection::vec("[a-z*./]{1,10}", 0..3),
        uris in prop::collection::vec("file:///[a-z]{1,8}", 0..3),
        seen in any::<u64>(),
        flags in any::<[bool; 5]>(),
        extra in prop::collection::btree_map(extra_key(), scalar(), 0..5),
    ) -> Project {
        Project {
            path,
            allowed_tools: tools,
            history: history.into_iter().map(HistoryEntry::new).collect(),
            mcp_servers: servers
                .into_iter()
                .map(|(name, command)| (name, json!({"command": command})))
                .collect(),
            enabled_mcpjson_servers: enabled,
            disabled_mcpjson_servers: disabled,
            enable_all_project_mcp_servers: flags[0],
            has_trust_dialog_accepted: flags[1],
            ignore_patterns: patterns,
            project_onboarding_seen_count: seen,
            has_claude_md_external_includes_approved: flags[2],
            has_claude_md_external_includes_warning_shown: flags[3],
            dont_crawl_directory: flags[4],
            mcp_context_uris: uris,
            extra: extra.into_iter().collect::<Map<String, Value>>(),
        }
    }
}

proptest! {
    #[test]
    fn written_project_reads_back_unchanged(project in arbitrary_project()) {
        let shadowed = project
            .extra
            .keys()
            .any(|key| MODELED_KEYS.contains(&key.as_str()));

        match project.to_value() {
            Ok(written) => {
                prop_assert!(!shadowed);
                let reparsed = Project::from_value(project.path.clone(), &written);
                prop_assert_eq!(reparsed, project);
            }
            Err(e) => {
                prop_assert!(shadowed);
                prop_assert!(matches!(e, StorageError::InvalidProject(_)));
            }
        }
    }
}

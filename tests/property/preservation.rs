//! Unknown fields and their values survive a parse and re-serialize

use claude_manager::model::Project;
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

fn unknown_fields() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("x[a-zA-Z]{1,8}", scalar(), 0..6)
        .prop_map(|fields| fields.into_iter().collect())
}

proptest! {
    #[test]
    fn project_round_trip_keeps_unknown_fields(
        extra in unknown_fields(),
        tools in prop::collection::vec("[A-Za-z]{1,10}", 0..5),
        history in prop::collection::vec("[a-z ]{0,16}", 0..8),
        trusted in any::<bool>(),
    ) {
        let mut raw = extra.clone();
        raw.insert("allowedTools".to_string(), json!(tools));
        raw.insert(
            "history".to_string(),
            Value::Array(history.iter().map(|d| json!({"display": d})).collect()),
        );
        raw.insert("hasTrustDialogAccepted".to_string(), json!(trusted));

        let project = Project::from_value("/p", &Value::Object(raw));
        prop_assert_eq!(&project.allowed_tools, &tools);
        prop_assert_eq!(project.history_count(), history.len());
        prop_assert_eq!(project.has_trust_dialog_accepted, trusted);

        let written = project.to_value().unwrap();
        for (key, value) in &extra {
            prop_assert_eq!(written.get(key), Some(value));
        }
        let reparsed = Project::from_value("/p", &written);
        prop_assert_eq!(reparsed, project);
    }

    #[test]
    fn any_json_value_yields_a_project(value in scalar()) {
        let project = Project::from_value("/p", &value);
        prop_assert_eq!(project.path.as_str(), "/p");
        prop_assert_eq!(project.history_count(), 0);
    }
}

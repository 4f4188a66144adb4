//! History trimming keeps the newest entries in order

use claude_manager::model::{HistoryEntry, Project};
use proptest::prelude::*;

proptest! {
    #[test]
    fn keep_recent_history_keeps_the_tail(len in 0usize..40, keep in 0usize..50) {
        let mut project = Project::new("/p");
        project.history = (0..len).map(|i| HistoryEntry::new(i.to_string())).collect();

        let removed = project.keep_recent_history(keep);
        prop_assert_eq!(removed, len.saturating_sub(keep));
        prop_assert_eq!(project.history_count(), len.min(keep));

        let expected: Vec<String> = (len.saturating_sub(keep)..len).map(|i| i.to_string()).collect();
        let kept: Vec<String> = project
            .history
            .iter()
            .filter_map(|e| e.display().map(str::to_string))
            .collect();
        prop_assert_eq!(kept, expected);
    }
}

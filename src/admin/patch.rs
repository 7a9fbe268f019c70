//! In-place reconciliation of admin list state after a successful write.
//!
//! Lists are never refetched after a write; each function here applies the
//! write's effect to the list the admin is looking at, matching rows by id.

use crate::models::{Case, ContentBlock, Service, Submission, SubmissionStatus};
use crate::types::RowId;

/// Row with a stable primary key
pub trait Identified {
    fn row_id(&self) -> &RowId;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn row_id(&self) -> &RowId {
                &self.id
            }
        })*
    };
}

identified!(Case, Service, ContentBlock, Submission);

/// New row at the head, for newest-first lists.
pub fn prepend<T>(list: &mut Vec<T>, item: T) {
    list.insert(0, item);
}

/// New row at the tail, for lists kept in insertion order.
pub fn append<T>(list: &mut Vec<T>, item: T) {
    list.push(item);
}

/// Swap in the row with the same id. Returns false when no row matched.
pub fn replace_by_id<T: Identified>(list: &mut [T], item: T) -> bool {
    match list.iter_mut().find(|row| row.row_id() == item.row_id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Drop the row with this id and nothing else.
pub fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &RowId) -> bool {
    let before = list.len();
    list.retain(|row| row.row_id() != id);
    list.len() != before
}

/// Record a status change on a list showing only `tab` submissions.
/// A row whose new status differs from the tab leaves the list.
pub fn apply_status_change(
    list: &mut Vec<Submission>,
    id: &RowId,
    status: SubmissionStatus,
    tab: Option<SubmissionStatus>,
) -> bool {
    match tab {
        Some(shown) if shown != status => remove_by_id(list, id),
        _ => match list.iter_mut().find(|row| &row.id == id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: i64, title: &str) -> Service {
        Service {
            id: RowId::Int(id),
            title: title.to_string(),
            description: String::new(),
            icon: "circle".to_string(),
        }
    }

    fn submission(id: &str, status: SubmissionStatus) -> Submission {
        Submission {
            id: RowId::from(id),
            created_at: None,
            name: id.to_string(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            status,
        }
    }

    fn titles(list: &[Service]) -> Vec<&str> {
        list.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn prepend_and_append_positions() {
        let mut list = vec![service(1, "a")];
        prepend(&mut list, service(2, "b"));
        append(&mut list, service(3, "c"));
        assert_eq!(titles(&list), vec!["b", "a", "c"]);
    }

    #[test]
    fn replace_matches_by_id_only() {
        let mut list = vec![service(1, "a"), service(2, "b")];
        assert!(replace_by_id(&mut list, service(2, "B")));
        assert_eq!(titles(&list), vec!["a", "B"]);
        assert!(!replace_by_id(&mut list, service(9, "x")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_drops_exactly_one_id() {
        let mut list = vec![service(1, "a"), service(2, "b"), service(3, "c")];
        assert!(remove_by_id(&mut list, &RowId::Int(2)));
        assert_eq!(titles(&list), vec!["a", "c"]);
        assert!(!remove_by_id(&mut list, &RowId::Int(2)));
    }

    #[test]
    fn status_change_leaves_filtered_tab() {
        let mut tab = vec![
            submission("x", SubmissionStatus::New),
            submission("y", SubmissionStatus::New),
        ];
        apply_status_change(&mut tab, &RowId::from("x"), SubmissionStatus::Processed, Some(SubmissionStatus::New));
        assert_eq!(tab.len(), 1);
        assert_eq!(tab[0].id, RowId::from("y"));
    }

    #[test]
    fn status_change_updates_unfiltered_list() {
        let mut all = vec![submission("x", SubmissionStatus::New)];
        apply_status_change(&mut all, &RowId::from("x"), SubmissionStatus::Processed, None);
        assert_eq!(all[0].status, SubmissionStatus::Processed);
    }
}

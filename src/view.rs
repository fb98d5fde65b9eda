use crate::{TaskError, TaskList};

/// What the user is currently looking at. Task numbers typed by the user are
/// 1-based positions in this view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Search { query: String, hits: Vec<usize> },
}

impl View {
    pub fn search(list: &TaskList, query: impl Into<String>) -> Self {
        let query = query.into();
        let hits = list.search(&query);
        Self::Search { query, hits }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search { .. })
    }

    /// Map a 1-based displayed position to an absolute index into the list.
    pub fn resolve(&self, list: &TaskList, position: usize) -> Result<usize, TaskError> {
        let index = match self {
            Self::All => position.checked_sub(1),
            Self::Search { hits, .. } => position.checked_sub(1).and_then(|i| hits.get(i).copied()),
        };

        match index {
            Some(index) if index < list.len() => Ok(index),
            _ => Err(TaskError::NoSuchPosition(position)),
        }
    }

    /// Re-run the query after the list changed underneath the view.
    pub fn refresh(&mut self, list: &TaskList) {
        if let Self::Search { query, hits } = self {
            *hits = list.search(query);
        }
    }

    /// Absolute indices shown, in display order.
    pub fn visible(&self, list: &TaskList) -> Vec<usize> {
        match self {
            Self::All => (0..list.len()).collect(),
            Self::Search { hits, .. } => hits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;

    fn list() -> TaskList {
        let mut list = TaskList::new();
        for d in ["email bob", "fix bike", "email alice"] {
            list.push(Task::new(d));
        }
        list
    }

    #[test]
    fn full_view_positions_are_one_based() {
        let list = list();
        assert_eq!(View::All.resolve(&list, 1).unwrap(), 0);
        assert_eq!(View::All.resolve(&list, 3).unwrap(), 2);
        assert!(matches!(View::All.resolve(&list, 0), Err(TaskError::NoSuchPosition(0))));
        assert!(matches!(View::All.resolve(&list, 4), Err(TaskError::NoSuchPosition(4))));
    }

    #[test]
    fn search_positions_map_through_hits() {
        let list = list();
        let view = View::search(&list, "email");
        assert!(view.is_search());
        assert_eq!(view.resolve(&list, 2).unwrap(), 2);
        assert!(view.resolve(&list, 3).is_err());
        assert_eq!(view.visible(&list), vec![0, 2]);
    }

    #[test]
    fn refresh_follows_list_changes() {
        let mut list = list();
        let mut view = View::search(&list, "email");
        list.remove(0).unwrap();
        view.refresh(&list);
        assert_eq!(view.visible(&list), vec![1]);
    }
}

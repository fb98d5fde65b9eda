use crate::{Task, TaskError, TaskList};

/// A recorded mutation that knows how to play itself forward and back.
///
/// `apply` followed by `revert` (or the reverse) must leave the target equal
/// to what it was before the first call. Implementors are immutable once
/// built: any context they depend on, such as the absolute index behind a
/// search result, is captured at construction.
pub trait Reversible {
    type Target;
    type Error;

    fn apply(&self, target: &mut Self::Target) -> Result<(), Self::Error>;
    fn revert(&self, target: &mut Self::Target) -> Result<(), Self::Error>;
}

/// Every way the controller can mutate a [`TaskList`]. Indices are absolute
/// positions in the full list, never positions in a search view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    Add { index: usize, task: Task },
    Remove { index: usize, task: Task },
    Edit { index: usize, old: String, new: String },
    Mark { index: usize, from: bool, to: bool },
    Clear { tasks: Vec<Task> },
}

impl TaskEdit {
    /// Append `task` at the end of `list`.
    pub fn add(list: &TaskList, task: Task) -> Self {
        Self::Add {
            index: list.len(),
            task,
        }
    }

    pub fn remove(list: &TaskList, index: usize) -> Result<Self, TaskError> {
        let task = list.get(index).ok_or(TaskError::NoSuchIndex(index))?;
        Ok(Self::Remove {
            index,
            task: task.clone(),
        })
    }

    pub fn edit(list: &TaskList, index: usize, new: String) -> Result<Self, TaskError> {
        let task = list.get(index).ok_or(TaskError::NoSuchIndex(index))?;
        Ok(Self::Edit {
            index,
            old: task.description.clone(),
            new,
        })
    }

    pub fn mark(list: &TaskList, index: usize, done: bool) -> Result<Self, TaskError> {
        let task = list.get(index).ok_or(TaskError::NoSuchIndex(index))?;
        Ok(Self::Mark {
            index,
            from: task.done,
            to: done,
        })
    }

    pub fn clear(list: &TaskList) -> Self {
        Self::Clear {
            tasks: list.iter().cloned().collect(),
        }
    }

    /// Short label for logs and the status line.
    pub fn describe(&self) -> String {
        match self {
            Self::Add { task, .. } => format!("add \"{}\"", task.description),
            Self::Remove { task, .. } => format!("remove \"{}\"", task.description),
            Self::Edit { old, new, .. } => format!("edit \"{old}\" -> \"{new}\""),
            Self::Mark { to: true, .. } => "mark done".to_string(),
            Self::Mark { to: false, .. } => "mark not done".to_string(),
            Self::Clear { tasks } => format!("clear {} tasks", tasks.len()),
        }
    }
}

impl Reversible for TaskEdit {
    type Target = TaskList;
    type Error = TaskError;

    fn apply(&self, list: &mut TaskList) -> Result<(), TaskError> {
        match self {
            Self::Add { index, task } => list.insert(*index, task.clone()),
            Self::Remove { index, .. } => list.remove(*index).map(drop),
            Self::Edit { index, new, .. } => list.set_description(*index, new.clone()).map(drop),
            Self::Mark { index, to, .. } => list.set_done(*index, *to),
            Self::Clear { .. } => {
                list.take_all();
                Ok(())
            }
        }
    }

    fn revert(&self, list: &mut TaskList) -> Result<(), TaskError> {
        match self {
            Self::Add { index, .. } => list.remove(*index).map(drop),
            Self::Remove { index, task } => list.insert(*index, task.clone()),
            Self::Edit { index, old, .. } => list.set_description(*index, old.clone()).map(drop),
            Self::Mark { index, from, .. } => list.set_done(*index, *from),
            Self::Clear { tasks } => {
                list.restore(tasks.clone());
                Ok(())
            }
        }
    }
}

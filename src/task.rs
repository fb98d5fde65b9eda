use std::{convert::Infallible, fmt, fs, path::Path, str::FromStr};

use crate::TaskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { 'x' } else { ' ' };
        write!(f, "[{mark}] {}", self.description)
    }
}

/// The task model every [`TaskEdit`](crate::TaskEdit) operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl FromStr for TaskList {
    type Err = Infallible;

    /// One task per line. A leading `[x] ` or `[ ] ` sets the completion
    /// state, anything else is an open task. Blank lines are skipped.
    /// Lines are not trimmed, so descriptions keep trailing spaces.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tasks = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_line)
            .collect();

        Ok(Self { tasks })
    }
}

fn parse_line(line: &str) -> Task {
    let done = line.strip_prefix("[x] ").or_else(|| line.strip_prefix("[X] "));
    if let Some(rest) = done {
        Task {
            description: rest.to_string(),
            done: true,
        }
    } else if let Some(rest) = line.strip_prefix("[ ] ") {
        Task::new(rest)
    } else {
        Task::new(line)
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, TaskError> {
        let text = fs::read_to_string(path)
            .map_err(|source| TaskError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let Ok(list) = text.parse::<Self>();
        Ok(list)
    }

    pub fn write(&self, path: &Path) -> Result<(), TaskError> {
        fs::write(path, self.to_text()).map_err(|source| TaskError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for task in &self.tasks {
            text.push_str(&task.to_string());
            text.push('\n');
        }
        text
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Insert so that the task ends up at `index`. `index == len()` appends.
    pub fn insert(&mut self, index: usize, task: Task) -> Result<(), TaskError> {
        if index > self.tasks.len() {
            return Err(TaskError::NoSuchIndex(index));
        }
        self.tasks.insert(index, task);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, TaskError> {
        if index >= self.tasks.len() {
            return Err(TaskError::NoSuchIndex(index));
        }
        Ok(self.tasks.remove(index))
    }

    /// Replace the description, returning the previous one.
    pub fn set_description(
        &mut self,
        index: usize,
        description: String,
    ) -> Result<String, TaskError> {
        let task = self.tasks.get_mut(index).ok_or(TaskError::NoSuchIndex(index))?;
        Ok(std::mem::replace(&mut task.description, description))
    }

    pub fn set_done(&mut self, index: usize, done: bool) -> Result<(), TaskError> {
        let task = self.tasks.get_mut(index).ok_or(TaskError::NoSuchIndex(index))?;
        task.done = done;
        Ok(())
    }

    pub fn take_all(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    pub fn restore(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Indices of tasks whose description contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

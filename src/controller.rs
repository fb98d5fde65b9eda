//! The controller owns the task list together with its history and is the
//! only place edits get applied.
//!
//! Every mutation follows the same path: build a [`TaskEdit`] against the
//! current view, apply it, and record it only once it succeeded. Undo and
//! redo ask the history for the edit first and then play it back; if playback
//! fails the edit is handed straight back so the stacks keep matching the
//! list.

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use crossterm::style::Color;
use tracing::{debug, info, warn};

use crate::{
    Command, Config, HELP, History, Reversible, Task, TaskEdit, TaskError, TaskList, View, print_bg,
    print_fg,
};

/// What the session loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

pub struct Controller {
    list: TaskList,
    history: History<TaskEdit>,
    view: View,

    pub path: Option<PathBuf>,
    pub modified: bool,
}

impl Controller {
    pub fn new(list: TaskList, path: Option<PathBuf>) -> Self {
        Self {
            list,
            history: History::new(),
            view: View::All,
            path,
            modified: false,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn history(&self) -> &History<TaskEdit> {
        &self.history
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Apply a new edit and record it with the current search context.
    pub fn execute(&mut self, edit: TaskEdit) -> Result<(), TaskError> {
        edit.apply(&mut self.list)?;

        let after_search = self.view.is_search();
        debug!(edit = %edit.describe(), after_search, "executed");

        self.history.record(edit, after_search);
        self.view.refresh(&self.list);
        self.modified = true;
        Ok(())
    }

    pub fn add(&mut self, description: String) -> Result<(), TaskError> {
        let edit = TaskEdit::add(&self.list, Task::new(description));
        self.execute(edit)
    }

    pub fn remove(&mut self, position: usize) -> Result<(), TaskError> {
        let index = self.view.resolve(&self.list, position)?;
        let edit = TaskEdit::remove(&self.list, index)?;
        self.execute(edit)
    }

    pub fn edit(&mut self, position: usize, description: String) -> Result<(), TaskError> {
        let index = self.view.resolve(&self.list, position)?;
        let edit = TaskEdit::edit(&self.list, index, description)?;
        self.execute(edit)
    }

    pub fn mark(&mut self, position: usize, done: bool) -> Result<(), TaskError> {
        let index = self.view.resolve(&self.list, position)?;
        let edit = TaskEdit::mark(&self.list, index, done)?;
        self.execute(edit)
    }

    pub fn clear(&mut self) -> Result<(), TaskError> {
        let edit = TaskEdit::clear(&self.list);
        self.execute(edit)
    }

    /// Revert the most recent edit and return its label.
    pub fn undo(&mut self) -> Result<String, TaskError> {
        if !self.history.is_undoable() {
            return Err(TaskError::NothingToUndo);
        }

        let edit = self.history.take_for_undo();
        let result = edit.revert(&mut self.list).map(|()| edit.describe());

        match result {
            Ok(label) => {
                debug!(edit = %label, "undone");
                self.view.refresh(&self.list);
                self.modified = true;
                Ok(label)
            }
            Err(e) => {
                warn!(error = %e, "undo failed, restoring history position");
                self.history.take_for_redo();
                Err(e)
            }
        }
    }

    /// Re-apply the most recently undone edit and return its label.
    pub fn redo(&mut self) -> Result<String, TaskError> {
        if !self.history.is_redoable() {
            return Err(TaskError::NothingToRedo);
        }

        let edit = self.history.take_for_redo();
        let result = edit.apply(&mut self.list).map(|()| edit.describe());

        match result {
            Ok(label) => {
                debug!(edit = %label, "redone");
                self.view.refresh(&self.list);
                self.modified = true;
                Ok(label)
            }
            Err(e) => {
                warn!(error = %e, "redo failed, restoring history position");
                self.history.take_for_undo();
                Err(e)
            }
        }
    }

    pub fn find(&mut self, query: String) {
        self.view = View::search(&self.list, query);
    }

    pub fn show_all(&mut self) {
        self.view = View::All;
    }

    /// Replace the list with the contents of `path`. History from the old
    /// list is meaningless afterwards and is dropped.
    pub fn load(&mut self, path: &Path) -> Result<(), TaskError> {
        self.list = TaskList::load(path)?;
        self.history.clear_undo_stack();
        self.history.clear_redo_stack();
        self.view = View::All;
        self.path = Some(path.to_path_buf());
        self.modified = false;

        info!(path = %path.display(), tasks = self.list.len(), "loaded");
        Ok(())
    }

    pub fn save(&mut self, path: Option<PathBuf>) -> Result<PathBuf, TaskError> {
        let path = path.or_else(|| self.path.clone()).ok_or(TaskError::UnknownPath)?;
        self.list.write(&path)?;
        self.path = Some(path.clone());
        self.modified = false;

        info!(path = %path.display(), tasks = self.list.len(), "saved");
        Ok(path)
    }

    pub fn run(&mut self, command: Command) -> Result<Outcome, TaskError> {
        let message = match command {
            Command::Add(text) => {
                self.add(text)?;
                None
            }
            Command::Remove(n) => {
                self.remove(n)?;
                None
            }
            Command::Edit(n, text) => {
                self.edit(n, text)?;
                None
            }
            Command::Done(n) => {
                self.mark(n, true)?;
                None
            }
            Command::Undone(n) => {
                self.mark(n, false)?;
                None
            }
            Command::Clear => {
                self.clear()?;
                None
            }
            Command::Find(query) => {
                self.find(query);
                None
            }
            Command::List => {
                self.show_all();
                None
            }
            Command::Undo => Some(format!("undid {}", self.undo()?)),
            Command::Redo => Some(format!("redid {}", self.redo()?)),
            Command::Load(path) => {
                self.load(&path)?;
                Some(format!("loaded {}", path.display()))
            }
            Command::Save(path) => Some(format!("saved {}", self.save(path)?.display())),
            Command::Help => Some(HELP.to_string()),
            Command::Quit(force) => {
                if self.modified && !force {
                    return Err(TaskError::QuitOnModified);
                }
                return Ok(Outcome::Quit);
            }
        };

        Ok(Outcome::Continue(message))
    }

    /// Print the current view, numbered the way `rm`/`edit`/`done` expect.
    pub fn render(&self, out: &mut impl Write, color: bool) -> io::Result<()> {
        if let View::Search { query, hits } = &self.view {
            let header = format!("-- {} match(es) for \"{query}\" --", hits.len());
            print_fg!(out, color.then_some(Color::Magenta), "{header}")?;
        }

        for (position, index) in self.view.visible(&self.list).into_iter().enumerate() {
            let Some(task) = self.list.get(index) else {
                continue;
            };
            let tint = if task.done { Color::DarkGrey } else { Color::Reset };
            print_fg!(out, color.then_some(tint), "{:>3} {task}", position + 1)?;
        }
        Ok(())
    }

    /// Read commands line by line until `quit` or end of input.
    pub fn listen(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        config: &Config,
    ) -> io::Result<()> {
        let status = |c: Color| config.color.then_some(c);

        self.render(out, config.color)?;
        write!(out, "{}", config.prompt)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(out, "{}", config.prompt)?;
                out.flush()?;
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => match self.run(command) {
                    Ok(Outcome::Quit) => return Ok(()),
                    Ok(Outcome::Continue(message)) => {
                        self.render(out, config.color)?;
                        if let Some(message) = message {
                            print_fg!(out, status(Color::Green), "{message}")?;
                        }
                    }
                    Err(e) => {
                        print_bg!(out, status(Color::DarkRed), "{e}")?;
                    }
                },
                Err(e) => {
                    print_bg!(out, status(Color::DarkRed), "{e}")?;
                }
            }

            write!(out, "{}", config.prompt)?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(items: &[&str]) -> Controller {
        let mut list = TaskList::new();
        for item in items {
            list.push(Task::new(*item));
        }
        Controller::new(list, None)
    }

    fn descriptions(c: &Controller) -> Vec<String> {
        c.list().iter().map(|t| t.description.clone()).collect()
    }

    #[test]
    fn add_undo_redo_then_search_remove() {
        let mut c = controller(&[]);
        c.add("buy milk".into()).unwrap();
        assert!(c.history().is_undoable());
        assert!(!c.history().is_redoable());

        assert_eq!(c.undo().unwrap(), "add \"buy milk\"");
        assert!(c.list().is_empty());
        assert!(!c.history().is_undoable());
        assert!(c.history().is_redoable());

        c.redo().unwrap();
        assert_eq!(descriptions(&c), vec!["buy milk"]);
        assert!(c.history().is_undoable());
        assert!(!c.history().is_redoable());

        c.find("milk".into());
        c.remove(1).unwrap();
        assert!(c.list().is_empty());
        assert!(c.history().is_after_search());
        assert!(!c.history().is_redoable());
    }

    #[test]
    fn search_position_is_captured_at_construction() {
        let mut c = controller(&["email bob", "fix bike", "email alice"]);
        c.find("email".into());
        c.mark(2, true).unwrap();
        assert!(c.list().get(2).unwrap().done);

        // The view changes before undo; the edit still targets "email alice".
        c.show_all();
        c.undo().unwrap();
        assert!(!c.list().get(2).unwrap().done);
        assert!(c.history().is_after_search());
    }

    #[test]
    fn new_edit_drops_redo() {
        let mut c = controller(&["a"]);
        c.edit(1, "b".into()).unwrap();
        c.undo().unwrap();
        c.add("c".into()).unwrap();
        assert!(!c.history().is_redoable());
        assert!(matches!(c.redo(), Err(TaskError::NothingToRedo)));
    }

    #[test]
    fn empty_history_is_an_error_not_a_panic() {
        let mut c = controller(&["a"]);
        assert!(matches!(c.undo(), Err(TaskError::NothingToUndo)));
        assert!(matches!(c.redo(), Err(TaskError::NothingToRedo)));
    }

    #[test]
    fn failed_edit_is_not_recorded() {
        let mut c = controller(&["a"]);
        assert!(matches!(c.remove(2), Err(TaskError::NoSuchPosition(2))));
        assert!(!c.history().is_undoable());
        assert!(!c.modified);
    }

    #[test]
    fn failed_playback_restores_history_position() {
        let mut c = controller(&["a", "b"]);
        c.remove(2).unwrap();
        c.clear().unwrap();
        c.undo().unwrap();
        c.undo().unwrap();
        assert_eq!(c.history().undo_len(), 0);
        assert_eq!(c.history().redo_len(), 2);

        // Pull the list out from under the pending redo of `remove 2`.
        c.list.take_all();
        assert!(matches!(c.redo(), Err(TaskError::NoSuchIndex(1))));
        assert_eq!(c.history().undo_len(), 0);
        assert_eq!(c.history().redo_len(), 2);
        assert!(c.history().is_redoable());
        assert!(!c.history().is_undoable());
    }

    #[test]
    fn failed_undo_puts_the_edit_back() {
        let mut c = controller(&[]);
        c.add("a".into()).unwrap();

        // The pending undo removes index 0, which is gone.
        c.list.take_all();
        let err = c.undo().unwrap_err();
        assert!(matches!(err, TaskError::NoSuchIndex(0)));
        assert_eq!(err.to_string(), "no task at index 0");

        assert_eq!(c.history().undo_len(), 1);
        assert_eq!(c.history().redo_len(), 0);
        assert!(c.history().is_undoable());
        assert!(!c.history().is_redoable());
    }

    #[test]
    fn clear_round_trips() {
        let mut c = controller(&["a", "b"]);
        c.clear().unwrap();
        assert!(c.list().is_empty());
        c.undo().unwrap();
        assert_eq!(descriptions(&c), vec!["a", "b"]);
    }

    #[test]
    fn load_drops_history_and_save_needs_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "[x] done thing\nopen thing\n").unwrap();

        let mut c = controller(&["a"]);
        assert!(matches!(c.save(None), Err(TaskError::UnknownPath)));

        c.add("b".into()).unwrap();
        c.undo().unwrap();
        c.load(&path).unwrap();
        assert!(!c.history().is_undoable());
        assert!(!c.history().is_redoable());
        assert_eq!(c.history().redo_len(), 0);
        assert_eq!(c.list().len(), 2);

        c.mark(2, true).unwrap();
        assert!(c.modified);
        assert_eq!(c.save(None).unwrap(), path);
        assert!(!c.modified);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[x] done thing\n[x] open thing\n");
    }

    #[test]
    fn quit_refuses_unsaved_changes_unless_forced() {
        let mut c = controller(&[]);
        c.add("a".into()).unwrap();
        assert!(matches!(c.run(Command::Quit(false)), Err(TaskError::QuitOnModified)));
        assert_eq!(c.run(Command::Quit(true)).unwrap(), Outcome::Quit);
    }

    #[test]
    fn render_numbers_the_view() {
        let mut c = controller(&["email bob", "fix bike", "email alice"]);
        c.find("email".into());
        let mut out = Vec::new();
        c.render(&mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-- 2 match(es) for \"email\" --\n  1 [ ] email bob\n  2 [ ] email alice\n"
        );
    }

    #[test]
    fn listen_drives_a_session() {
        let config = Config { color: false, ..Config::default() };
        let input = "add buy milk\nadd call mom\nbogus\nundo\nredo\nrm 9\nq!\nadd never\n";
        let mut out = Vec::new();

        let mut c = controller(&[]);
        c.listen(input.as_bytes(), &mut out, &config).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("unknown command `bogus`"));
        assert!(text.contains("undid add \"call mom\""));
        assert!(text.contains("redid add \"call mom\""));
        assert!(text.contains("no task number 9"));
        assert_eq!(descriptions(&c), vec!["buy milk", "call mom"]);
    }
}

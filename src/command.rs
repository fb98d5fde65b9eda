use std::{path::PathBuf, str::FromStr};

use crate::CommandError;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(usize),
    Edit(usize, String),
    Done(usize),
    Undone(usize),
    Clear,
    Find(String),
    List,
    Undo,
    Redo,
    Load(PathBuf),
    Save(Option<PathBuf>),
    Help,
    /// `true` when forced with `q!`.
    Quit(bool),
}

fn position(arg: Option<&str>, name: &'static str) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse().map_err(|_| CommandError::BadIndex(arg.to_string()))
}

fn text(arg: Option<&str>, name: &'static str) -> Result<String, CommandError> {
    match arg.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(CommandError::MissingArgument(name)),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim())),
            None => (s, None),
        };

        match word {
            "add" | "a" => Ok(Self::Add(text(rest, "add")?)),
            "rm" | "remove" => Ok(Self::Remove(position(rest, "remove")?)),
            "edit" | "e" => {
                let rest = rest.ok_or(CommandError::MissingArgument("edit"))?;
                let (n, description) = match rest.split_once(char::is_whitespace) {
                    Some((n, description)) => (n, Some(description)),
                    None => (rest, None),
                };
                Ok(Self::Edit(position(Some(n), "edit")?, text(description, "edit")?))
            }
            "done" | "d" => Ok(Self::Done(position(rest, "done")?)),
            "undone" => Ok(Self::Undone(position(rest, "undone")?)),
            "clear" => Ok(Self::Clear),
            "find" | "search" => Ok(Self::Find(text(rest, "find")?)),
            "list" | "ls" => Ok(Self::List),
            "undo" | "u" => Ok(Self::Undo),
            "redo" | "r" => Ok(Self::Redo),
            "load" => Ok(Self::Load(PathBuf::from(text(rest, "load")?))),
            "save" | "w" => {
                let path = rest.filter(|p| !p.is_empty()).map(PathBuf::from);
                Ok(Self::Save(path))
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" => Ok(Self::Quit(false)),
            "quit!" | "q!" => Ok(Self::Quit(true)),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

pub const HELP: &str = "\
add <text>         add a task
rm <n>             remove task n
edit <n> <text>    change the text of task n
done <n>           mark task n done
undone <n>         mark task n not done
clear              remove every task
find <query>       show matching tasks only
list               show every task
undo, redo         step through history
load <path>        replace the list with a file (drops history)
save [path]        write the list to a file
quit, quit!        leave, quit! drops unsaved changes";

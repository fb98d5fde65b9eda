use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// A 1-based task number as typed at the prompt.
    #[error("no task number {0}")]
    NoSuchPosition(usize),

    /// A 0-based index into the list, from an edit that no longer fits it.
    #[error("no task at index {0}")]
    NoSuchIndex(usize),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("no file to save to, pass a path")]
    UnknownPath,

    #[error("unsaved changes, save first or use `quit!`")]
    QuitOnModified,

    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a task number")]
    BadIndex(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

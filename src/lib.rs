mod command;
mod config;
mod controller;
mod edit;
mod error;
mod history;
mod task;
mod utils;
mod view;

pub use command::*;
pub use config::*;
pub use controller::*;
pub use edit::*;
pub use error::*;
pub use history::*;
pub use task::*;
pub use utils::*;
pub use view::*;

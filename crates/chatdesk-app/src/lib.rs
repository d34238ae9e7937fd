//! Terminal front-end for the conversation backend

pub mod cli;
pub mod repl;
pub mod runtime;
pub mod state_file;
pub mod terminal_view;

pub use cli::Cli;
pub use repl::{run_repl, Command};
pub use runtime::TokioRuntime;
pub use state_file::FileStore;
pub use terminal_view::TerminalView;

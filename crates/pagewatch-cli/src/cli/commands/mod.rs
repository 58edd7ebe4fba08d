//! CLI command handlers, one file per command.

mod check;
mod completions;
mod status;
mod urls;

pub use check::run_check;
pub use completions::run_completions;
pub use status::run_status;
pub use urls::run_urls;

//! qa 固有のドメイン型（型と不変条件）

pub mod command;
pub mod history;
pub mod qa_pair;
pub mod repl_command;

pub use command::QaCommand;
pub use history::History;
pub use qa_pair::QaPair;
pub use repl_command::ReplCommand;

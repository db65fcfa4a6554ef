//! CLI 層（引数解析と端末表示）

mod args;
pub mod render;

#[allow(unused_imports)]
pub use args::parse_args_from;
pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome, HELP_TEXT, USAGE};

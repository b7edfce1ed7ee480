pub mod history;
mod prompt;
mod tokenizer;
mod trim;

pub use history::History;
pub use prompt::{get_prompt, DEFAULT_PROMPT};
pub use tokenizer::{cmd_parse, ParseError, ParsedCommand};
pub use trim::{trim_white, trim_white_opt};

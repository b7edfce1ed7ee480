use std::env;

pub const DEFAULT_PROMPT: &str = "shell>";

/// Returns an owned copy of the prompt stored in the environment variable
/// `var`, or [`DEFAULT_PROMPT`] when the variable is unset or empty.
pub fn get_prompt(var: Option<&str>) -> String {
    var.and_then(env::var_os)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string())
}

//! Built-in placeholder commands
//!
//! Used as a [`super::CommandProcessor`] for placeholders such as `$(Path:ensureSlash)`.

/// Information about a built-in command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Command token as written after `:`.
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

/// Applies a built-in command to resolved text.
///
/// Unknown commands return the text unchanged.
#[must_use]
pub fn standard_commands(command: &str, value: &str) -> String {
    match command {
        "trim" => value.trim().to_string(),
        "trimStart" => value.trim_start().to_string(),
        "trimEnd" => value.trim_end().to_string(),
        "upper" => value.to_uppercase(),
        "lower" => value.to_lowercase(),
        "ensureSlash" if !value.ends_with('/') => format!("{value}/"),
        _ => value.to_string(),
    }
}

/// Lists the built-in commands.
#[must_use]
pub fn available_commands() -> Vec<CommandInfo> {
    vec![
        CommandInfo {
            name: "trim",
            description: "Remove leading and trailing whitespace",
        },
        CommandInfo {
            name: "trimStart",
            description: "Remove leading whitespace",
        },
        CommandInfo {
            name: "trimEnd",
            description: "Remove trailing whitespace",
        },
        CommandInfo {
            name: "upper",
            description: "Convert to upper case",
        },
        CommandInfo {
            name: "lower",
            description: "Convert to lower case",
        },
        CommandInfo {
            name: "ensureSlash",
            description: "Append a trailing '/' if missing",
        },
    ]
}

use std::collections::BTreeMap;

use serde_json::Value;

use super::command_registry::{CommandSpec, FILE_ARG_COMMANDS, NO_ARG_COMMANDS, RAW_ARG_COMMANDS};

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub action: String,
    pub prompt: Option<String>,
    pub command_args: BTreeMap<String, Value>,
}

impl Intent {
    fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            prompt: None,
            command_args: BTreeMap::new(),
        }
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.command_args
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn find_spec(command: &str, specs: &[CommandSpec]) -> Option<CommandSpec> {
    specs.iter().find(|spec| spec.command == command).copied()
}

fn parse_file_arg(arg: &str) -> String {
    if arg.trim().is_empty() {
        return String::new();
    }
    match shell_words::split(arg) {
        Ok(parts) => parts
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect::<Vec<String>>()
            .join(" "),
        Err(_) => arg.trim().to_string(),
    }
}

/// Parses one console line.
///
/// Slash commands map to actions; any other non-empty text is a generation
/// request using that text as the prompt.
pub fn parse_intent(text: &str) -> Intent {
    let raw_trimmed = text.trim();
    if raw_trimmed.is_empty() {
        return Intent::new("noop");
    }

    if let Some(slash_tail) = raw_trimmed.strip_prefix('/') {
        let command_len = slash_tail
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();
        if command_len > 0 {
            let command = slash_tail[..command_len].to_ascii_lowercase();
            let arg = slash_tail[command_len..].trim();

            if let Some(spec) = find_spec(&command, RAW_ARG_COMMANDS) {
                let mut intent = Intent::new(spec.action);
                intent
                    .command_args
                    .insert(spec.arg_key.to_string(), Value::String(arg.to_string()));
                return intent;
            }

            if let Some(spec) = find_spec(&command, FILE_ARG_COMMANDS) {
                let mut intent = Intent::new(spec.action);
                intent
                    .command_args
                    .insert(spec.arg_key.to_string(), Value::String(parse_file_arg(arg)));
                return intent;
            }

            if let Some(spec) = find_spec(&command, NO_ARG_COMMANDS) {
                return Intent::new(spec.action);
            }

            let mut intent = Intent::new("unknown");
            intent
                .command_args
                .insert("command".to_string(), Value::String(command));
            intent
                .command_args
                .insert("arg".to_string(), Value::String(arg.to_string()));
            return intent;
        }
    }

    let mut intent = Intent::new("generate");
    intent.prompt = Some(raw_trimmed.to_string());
    intent
}

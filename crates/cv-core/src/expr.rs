use std::sync::OnceLock;

use regex::Regex;

use crate::memory::Memory;

fn variable_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)\{(.*?)\}").expect("variable regex"))
}

pub fn extract_variable_name(input: &str) -> &str {
    variable_regex()
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

pub fn extract_function_name(input: &str) -> &str {
    input
        .find('(')
        .map(|position| &input[..position])
        .unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression<'a> {
    pub function: &'a str,
    pub variable: &'a str,
}

impl<'a> Expression<'a> {
    pub fn parse(input: &'a str) -> Self {
        Self {
            function: extract_function_name(input),
            variable: extract_variable_name(input),
        }
    }
}

pub fn render_text(text: &str, memory: &Memory) -> String {
    let key = extract_variable_name(text);
    if key.is_empty() {
        return text.to_string();
    }
    text.replacen(&format!("{{{}}}", key), memory.get(key), 1)
}

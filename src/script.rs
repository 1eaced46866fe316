//! Line-oriented scripts describing a sequence of user interactions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Reasons a script fails to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown step '{step}'")]
    UnknownStep { line: usize, step: String },

    #[error("line {line}: step '{step}' needs an argument")]
    MissingArgument { line: usize, step: &'static str },

    #[error("line {line}: '{value}' is not a valid number")]
    InvalidNumber { line: usize, value: String },
}

/// One interaction in a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Open the panel directly.
    Open,
    /// Close the panel directly.
    Close,
    /// Click the trigger button.
    Toggle,
    /// Replace the search text.
    Type(String),
    /// Empty the search field.
    Clear,
    Down,
    Up,
    Enter,
    Escape,
    ClickOutside,
    /// Click the country item carrying this value.
    Click(String),
    /// Click the reset button.
    Reset,
    /// Scroll the country list to this offset.
    Scroll(u32),
    /// Choose a language in the language select.
    Language(String),
    /// Let the clock run.
    Wait(Duration),
}

impl Step {
    fn keyword(&self) -> &'static str {
        match self {
            Step::Open => "open",
            Step::Close => "close",
            Step::Toggle => "toggle",
            Step::Type(_) => "type",
            Step::Clear => "clear",
            Step::Down => "down",
            Step::Up => "up",
            Step::Enter => "enter",
            Step::Escape => "escape",
            Step::ClickOutside => "click-outside",
            Step::Click(_) => "click",
            Step::Reset => "reset",
            Step::Scroll(_) => "scroll",
            Step::Language(_) => "language",
            Step::Wait(_) => "wait",
        }
    }

    fn parse_line(line: usize, source: &str) -> Result<Self, ScriptError> {
        let source = source.trim();
        let (keyword, rest) = match source.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (source, ""),
        };

        let argument = |step: &'static str| {
            if rest.is_empty() {
                Err(ScriptError::MissingArgument { line, step })
            } else {
                Ok(rest.to_string())
            }
        };
        let number = |step: &'static str| -> Result<u64, ScriptError> {
            let raw = argument(step)?;
            raw.parse()
                .map_err(|_| ScriptError::InvalidNumber { line, value: raw })
        };

        let step = match keyword.to_ascii_lowercase().as_str() {
            "open" => Step::Open,
            "close" => Step::Close,
            "toggle" => Step::Toggle,
            // The search text may legitimately be blank after trimming.
            "type" => Step::Type(rest.to_string()),
            "clear" => Step::Clear,
            "down" => Step::Down,
            "up" => Step::Up,
            "enter" => Step::Enter,
            "escape" | "esc" => Step::Escape,
            "click-outside" => Step::ClickOutside,
            "click" => Step::Click(argument("click")?),
            "reset" => Step::Reset,
            "scroll" => {
                let offset = number("scroll")?;
                let offset = u32::try_from(offset).map_err(|_| ScriptError::InvalidNumber {
                    line,
                    value: offset.to_string(),
                })?;
                Step::Scroll(offset)
            }
            "language" => Step::Language(argument("language")?),
            "wait" => Step::Wait(Duration::from_millis(number("wait")?)),
            _ => {
                return Err(ScriptError::UnknownStep {
                    line,
                    step: keyword.to_string(),
                });
            }
        };
        Ok(step)
    }
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Step::parse_line(1, source)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Type(text) => write!(f, "type {text}"),
            Step::Click(value) => write!(f, "click {value}"),
            Step::Scroll(offset) => write!(f, "scroll {offset}"),
            Step::Language(code) => write!(f, "language {code}"),
            Step::Wait(delay) => write!(f, "wait {}", delay.as_millis()),
            other => f.write_str(other.keyword()),
        }
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| Step::parse_line(index + 1, line))
        .collect()
}

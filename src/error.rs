use std::fmt;

/// The main error type for MODCFG parsing, lexing, and resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ModcfgError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for unexpected characters in the input.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a line dedents to a width that was never opened.
    IndentationError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a module body mixes mapping entries and sequence items.
    MixedModuleContents {
        module: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a `date(...)`/`datetime(...)` literal fails strict validation.
    InvalidDateFormat {
        literal: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when an enum reference cannot be resolved uniquely.
    EnumResolveError {
        reference: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    ValidationError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for ModcfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModcfgError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[MODCFG] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::InvalidToken { token, line, column, hint, code } =>
                write!(f, "[MODCFG] Invalid Token '{}' at {}:{}{}{}",
                    token, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[MODCFG] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[MODCFG] Unclosed string starting with '{}' at {}:{}{}{}",
                    quote, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[MODCFG] Unexpected character '{}' at {}:{}{}{}",
                    character, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::IndentationError { message, line, column, hint, code } =>
                write!(f, "[MODCFG] Indentation Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::MixedModuleContents { module, line, column, hint, code } =>
                write!(f, "[MODCFG] Mixed module contents in '{}' at {}:{}{}{}",
                    module, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::InvalidDateFormat { literal, line, column, hint, code } =>
                write!(f, "[MODCFG] Invalid date format '{}' at {}:{}{}{}",
                    literal, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::EnumResolveError { reference, message, hint, code } =>
                write!(f, "[MODCFG] Enum Resolve Error for '{}': {}{}{}",
                    reference, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::TypeError { message, line, column, hint, code } =>
                write!(f, "[MODCFG] Type Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::ValidationError { message, line, column, hint, code } =>
                write!(f, "[MODCFG] Validation Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            ModcfgError::FileError { message, path, hint, code } =>
                write!(f, "[MODCFG] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for ModcfgError {}

use std::fmt;

pub type SendableError = Box<dyn std::error::Error + Send + Sync>;

/// Message substituted whenever an error carries no text of its own.
pub const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug)]
pub struct RuntimeError {
    code: String,
    message: String,
}

impl RuntimeError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn boxed(code: impl Into<String>, message: impl Into<String>) -> SendableError {
        Box::new(Self::new(code, message))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Human readable text for an error, never empty.
pub fn error_message(err: &(dyn std::error::Error + Send + Sync)) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_displays_code_and_message() {
        let err = RuntimeError::new("scheduler.login", "session expired");
        assert_eq!(err.to_string(), "scheduler.login: session expired");
        assert_eq!(err.code(), "scheduler.login");
    }

    #[test]
    fn blank_messages_become_unknown_error() {
        let err: SendableError = "   ".into();
        assert_eq!(error_message(err.as_ref()), UNKNOWN_ERROR);

        let err: SendableError = "boom".into();
        assert_eq!(error_message(err.as_ref()), "boom");
    }
}

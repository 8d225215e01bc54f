use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Usage,
    Input,
    Parse,
    Other,
}

impl ErrorClass {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorClass::Usage => 2,
            ErrorClass::Input => 3,
            ErrorClass::Parse => 4,
            ErrorClass::Other => 1,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ErrorClass::Usage => "USAGE",
            ErrorClass::Input => "INPUT",
            ErrorClass::Parse => "PARSE",
            ErrorClass::Other => "ERROR",
        }
    }
}

/// Fatal condition that aborts a trace run before any report is printed.
///
/// Missing extensions and unresolved issuers are not errors; they surface
/// as `None` fields on the records instead.
#[derive(Debug, Error)]
#[error("error[{}]: {}", .class.tag(), .message)]
pub struct TraceError {
    pub class: ErrorClass,
    pub message: String,
}

impl TraceError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self { class, message: message.into() }
    }

    pub fn usage(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Usage, msg) }
    pub fn input(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Input, msg) }
    pub fn parse(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Parse, msg) }
    pub fn other(msg: impl Into<String>) -> Self { Self::new(ErrorClass::Other, msg) }
}

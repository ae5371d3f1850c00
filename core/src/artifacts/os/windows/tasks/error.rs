use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TaskError {
    Initialize,
    ServiceUnavailable,
    Connection,
    Serialize,
}

impl std::error::Error for TaskError {}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Initialize => write!(f, "Could not initialize Windows COM API"),
            TaskError::ServiceUnavailable => write!(f, "Could not query Task Scheduler 2.0"),
            TaskError::Connection => write!(f, "Could not connect to Task Scheduler 2.0"),
            TaskError::Serialize => write!(f, "Could not serialize tasks"),
        }
    }
}

/// Errors from a single call into the Task Scheduler. These never leave the walker
#[derive(Debug, PartialEq)]
pub enum ServiceError {
    /**Failing `HRESULT` returned by the service */
    Call(i32),
    UnknownProperty,
    Decode,
}

impl std::error::Error for ServiceError {}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Call(code) => write!(f, "Task Scheduler call failed: {code:#x}"),
            ServiceError::UnknownProperty => write!(f, "Unknown Task Scheduler property"),
            ServiceError::Decode => write!(f, "Unexpected property type"),
        }
    }
}

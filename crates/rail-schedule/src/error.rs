use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("service {0:?} is defined twice")]
    DuplicateService(String),

    #[error("service {service:?} chains to unknown service {next:?}")]
    UnknownNextService { service: String, next: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

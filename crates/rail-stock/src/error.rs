use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("train type {0:?} is registered twice")]
    DuplicateType(String),

    #[error("train type {type_code:?} lists unknown element {element:?}")]
    UnknownElement { type_code: String, element: String },

    #[error("train type {code:?} has invalid {what}: {value}")]
    InvalidParameter { code: String, what: &'static str, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StockResult<T> = Result<T, StockError>;

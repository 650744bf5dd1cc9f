#[derive(thiserror::Error, Debug)]
pub enum WheelError {
    #[error("dataset contains no usable rows")]
    EmptyDataset,
    #[error("invalid wheel config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
    #[error("wheel config field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
    #[error("reel {index} out of range ({count} reels)")]
    ReelOutOfRange { index: usize, count: usize },
}

pub type WheelResult<T> = Result<T, WheelError>;

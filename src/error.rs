use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("time range cannot be built from an empty dataset")]
    EmptyData,

    #[error("coordinate mapping unavailable: {0}")]
    MappingUnavailable(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type TexplotResult<T> = Result<T, TexplotError>;

#[derive(thiserror::Error, Debug)]
pub enum TexplotError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("toolchain error: {0}")]
    Toolchain(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexplotError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn toolchain(msg: impl Into<String>) -> Self {
        Self::Toolchain(msg.into())
    }
}

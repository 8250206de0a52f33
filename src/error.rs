use crate::{config::ConfigError, periphery::PeripheryError};

#[derive(Debug, thiserror::Error)]
pub enum CimError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Periphery(#[from] PeripheryError),

    #[error("{msg} >> {err}")]
    Context { msg: String, err: Box<dyn std::error::Error + Send + Sync> }
}

pub type CimResult<T> = Result<T, CimError>;

pub trait ErrorContext<T> {
    fn context<S: Into<String>>(self, msg: S) -> CimResult<T>;
    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> CimResult<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, msg: S) -> CimResult<T> {
        self.map_err(|e| CimError::Context { msg: msg.into(), err: Box::new(e) }) 
    }

    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> CimResult<T> {
        let msg = f();
        self.context(msg)
    }
}

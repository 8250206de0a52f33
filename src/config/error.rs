#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("lack config field '{0}'")]
    MissingField(&'static str),

    #[error("more than one mode flag set: {0:?}")]
    AmbiguousMode(Vec<&'static str>),

    #[error("array geometry undefined: {0} is zero")]
    UndefinedGeometry(&'static str),

    #[error("config field '{0}' must be >= 1")]
    ZeroDenominator(&'static str),

    #[error("config field '{0}' must be a finite non-negative value, got {1}")]
    InvalidPhysical(&'static str, f64),

    #[error("config arguments invalid: {0}")]
    InvalidArguments(String),
}

impl ConfigError {
    pub fn invalid_arg<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::MissingField(e.field_name())
    }
}

#[macro_export]
macro_rules! check_config {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            Err($err)?
        }
    };
    ($cond:expr, $fmt:literal, $($arg:tt)*) => {
        if !($cond) {
            Err($crate::config::ConfigError::invalid_arg(format!($fmt, $($arg)*)))?
        }
    };
}

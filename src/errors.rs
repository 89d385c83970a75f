pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // 清理间隔无法解析
    #[error("invalid duration '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },
    // 内部通用错误
    #[error("internal error: {0}")]
    Internal(String),
    // 包装 bollard::errors::Error
    #[error("Docker error: {0}")]
    Docker(#[from] bollard::errors::Error),
    // 包装 std::io::Error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_interval(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidInterval {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[macro_export]
macro_rules! fail {
    ($msg:expr) => {
        $crate::errors::Error::Internal(format!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::errors::Error::Internal(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! err {
    ($msg:expr) => {
        Err($crate::fail!($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::fail!($fmt, $($arg)*))
    };
}

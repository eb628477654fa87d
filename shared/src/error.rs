//! 客户端错误类型
//!
//! 所有可失败的客户端操作都返回 [`ApiError`]，
//! 其 `Display` 输出即为展示给用户的提示文本。

use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "네트워크 오류가 발생했습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 传输层失败（DNS、连接中断等）
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(String),
    /// 401: 令牌失效或未认证
    #[error("{0}")]
    Unauthorized(String),
    /// 其他非 2xx 响应
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 客户端校验失败，请求不会发出
    #[error("{0}")]
    Validation(String),
    /// 响应体无法转换为期望的类型
    #[error("응답 해석 실패: {0}")]
    Decode(String),
    /// 浏览器 API 调用失败（Blob、FormData 等）
    #[error("{0}")]
    Browser(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 根据状态码构造 HTTP 错误
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 401 {
            Self::Unauthorized(message)
        } else {
            Self::Status { status, message }
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_gets_its_own_variant() {
        let err = ApiError::from_status(401, "Not authenticated");
        assert_eq!(err, ApiError::Unauthorized("Not authenticated".into()));
        assert_eq!(err.status_code(), Some(401));

        let err = ApiError::from_status(404, "Not Found");
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn network_error_displays_generic_message() {
        let err = ApiError::Network("TypeError: Failed to fetch".into());
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    }
}

use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 客户端错误的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// 网络层失败 (fetch 抛出、连接被拒绝等)
    Transport,
    /// 服务端返回了非 2xx 状态码
    Status(u16),
    /// 响应体无法解析为期望的结构
    Decode,
    /// 请求体序列化失败
    Encode,
}

impl ClientErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ClientErrorKind::Transport => "TRANSPORT",
            ClientErrorKind::Status(_) => "HTTP_STATUS",
            ClientErrorKind::Decode => "DECODE",
            ClientErrorKind::Encode => "ENCODE",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 远程资源客户端的统一错误
///
/// UI 层只记录日志、保留原状态，不会把错误抛给用户，
/// 所以这里只携带分类和消息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Transport, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Encode, message)
    }

    /// 服务端返回的状态码 (仅 `Status` 类错误)
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ClientErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    /// 401 / 403 视为凭据失效
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ClientErrorKind::Status(code) => {
                write!(f, "[{} {}] {}", self.kind.label(), code, self.message)
            }
            _ => write!(f, "[{}] {}", self.kind.label(), self.message),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::transport(e.to_string())
        } else {
            Self::decode(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_code() {
        let err = ClientError::status(404, "course not found");
        assert_eq!(err.to_string(), "[HTTP_STATUS 404] course not found");
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn serde_errors_map_to_decode() {
        let err: ClientError = serde_json::from_str::<Vec<i64>>("{").unwrap_err().into();
        assert_eq!(err.kind, ClientErrorKind::Decode);
    }

    #[test]
    fn forbidden_counts_as_unauthorized() {
        assert!(ClientError::status(403, "nope").is_unauthorized());
        assert!(!ClientError::transport("offline").is_unauthorized());
    }
}

//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。CLI は `exit_code()` で終了コードに変換する。

use thiserror::Error as ThisError;

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 引数不正（usage を表示して終了）
    #[error("{0}")]
    InvalidArgs(String),

    /// 質問が空（ネットワークに出る前に拒否）
    #[error("question is empty")]
    EmptyInput,

    /// 設定不備（起動時に一度だけ検査する致命的エラー）
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 上流が非 2xx を返した
    #[error("upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// 通信レベルの失敗（接続・TLS・読み取り）
    #[error("{0}")]
    Http(String),

    #[error("{0}")]
    Json(String),

    #[error("{0}")]
    Io(String),

    /// 環境変数からの解決に失敗
    #[error("{0}")]
    Env(String),
}

impl Error {
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }

    /// sysexits.h に沿った終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgs(_) | Self::EmptyInput => 64,
            Self::Json(_) => 65,
            Self::Upstream { .. } | Self::Http(_) => 69,
            Self::Io(_) => 74,
            Self::Configuration(_) | Self::Env(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

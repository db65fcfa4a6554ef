//! HTTP クライアント Outbound ポート
//!
//! プロバイダクライアントは JSON を POST して (status, body) を受け取るだけ。
//! テストでは呼び出し回数を数えるスタブを注入する。

use crate::error::Error;

/// HTTP レスポンス（ステータスと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON POST を 1 回だけ実行する抽象（リトライしない）
pub trait HttpClient: Send + Sync {
    /// 通信自体の失敗は `Error::Http`。非 2xx はエラーにせず HttpResponse で返す。
    fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, Error>;
}

//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリと資格情報を環境変数から解決する。
//! usecase・wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の固定値など。
pub trait EnvResolver: Send + Sync {
    /// 任意の環境変数を読む（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. QA_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/qa（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/qa
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;
}

//! キー・バリュー永続化 Outbound ポート
//!
//! 1 キーに 1 つの文字列値を保存する。書き込みは常に全体の上書き。
//! 標準実装はファイル（`FileKeyValueStore`）、テストはメモリ（`MemoryKeyValueStore`）。

use crate::error::Error;

pub trait KeyValueStore: Send + Sync {
    /// 値を読む。キーが無ければ Ok(None)。
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    /// 値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
    /// キーを削除する。無ければ何もしない。
    fn remove(&self, key: &str) -> Result<(), Error>;
}

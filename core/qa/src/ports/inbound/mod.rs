//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::domain::QaCommand;
use common::error::Error;
use std::io::{BufRead, Write};

/// qa アプリケーションを実行する Inbound ポート
///
/// main はこの trait を実装した型（QaUseCase）の run を呼び出す。
pub trait RunQaApp {
    /// 終了コードを返す。対話ループは `input` から読み、結果は `out` に書く。
    fn run(&self, command: QaCommand, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32, Error>;
}

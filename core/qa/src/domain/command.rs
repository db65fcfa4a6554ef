//! qa コマンドの enum（Command Pattern）
//!
//! CLI の解析結果をどの処理に振り分けるかを enum で明示する。

use common::domain::QaId;

/// qa の実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaCommand {
    /// ヘルプ表示
    Help,
    /// 1 回だけ質問して終了
    Ask { question: String },
    /// 対話ループ
    Interactive,
    /// 履歴一覧
    ListHistory,
    /// 1 件表示
    Show { id: QaId },
    /// 1 件削除
    Delete { id: QaId },
    /// 履歴全消去
    Clear,
}

impl QaCommand {
    /// プロバイダ（資格情報）を必要とするか
    pub fn needs_provider(&self) -> bool {
        matches!(self, Self::Ask { .. } | Self::Interactive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Ask { .. } => "ask",
            Self::Interactive => "interactive",
            Self::ListHistory => "list",
            Self::Show { .. } => "show",
            Self::Delete { .. } => "delete",
            Self::Clear => "clear",
        }
    }
}

//! 対話ループの 1 行を解釈した結果

use common::domain::QaId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// 空行（何もしない）
    Empty,
    /// 質問として送る
    Ask(String),
    History,
    Show(QaId),
    /// id 省略時は現在選択中の項目
    Like(Option<QaId>),
    Dislike(Option<QaId>),
    Delete(QaId),
    Clear,
    Help,
    Quit,
    /// 解釈できないスラッシュコマンド（メッセージ付き）
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Ask(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or("");
        let arg = parts.next().map(QaId::from);
        let extra = parts.next().is_some();
        if extra {
            return Self::Invalid(format!("too many arguments for /{}", name));
        }

        match (name, arg) {
            ("history" | "h", None) => Self::History,
            ("show", Some(id)) => Self::Show(id),
            ("like", id) => Self::Like(id),
            ("dislike", id) => Self::Dislike(id),
            ("delete" | "rm", Some(id)) => Self::Delete(id),
            ("clear", None) => Self::Clear,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit" | "q", None) => Self::Quit,
            ("show" | "delete" | "rm", None) => Self::Invalid(format!("/{} needs an id", name)),
            _ => Self::Invalid(format!("unknown command: /{}", name)),
        }
    }
}

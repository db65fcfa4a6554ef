//! qa 共通ライブラリ
//!
//! エラー型・Outbound ポートとその標準アダプタ・チャット API のワイヤ形式を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// チャット API のメッセージとワイヤ形式
pub mod llm;

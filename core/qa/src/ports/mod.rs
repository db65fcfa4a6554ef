//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出す trait
//! - outbound: アプリが外界（回答プロバイダ・通知先）に依頼する trait

pub mod inbound;
pub mod outbound;

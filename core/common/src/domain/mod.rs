//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// ホームディレクトリのパス（config.json・storage・logs の親）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn config_file(&self) -> PathBuf {
        self.0.join("config.json")
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.0.join("storage")
    }

    pub fn log_file(&self) -> PathBuf {
        self.0.join("logs").join("qa.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// QAPair の ID（通常は 11 文字 base62、辞書順＝時系列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QaId(String);

impl QaId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_layout() {
        let home = HomeDir::new("/tmp/qa_home");
        assert_eq!(home.config_file(), PathBuf::from("/tmp/qa_home/config.json"));
        assert_eq!(home.storage_dir(), PathBuf::from("/tmp/qa_home/storage"));
        assert_eq!(home.log_file(), PathBuf::from("/tmp/qa_home/logs/qa.jsonl"));
    }

    #[test]
    fn test_qa_id_serializes_as_plain_string() {
        let id = QaId::new("0abcDEF1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0abcDEF1\"");
        let back: QaId = serde_json::from_str("\"0abcDEF1\"").unwrap();
        assert_eq!(back, id);
    }
}

//! config.json の読み込みとプロバイダ設定の解決
//!
//! 資格情報は起動時に一度だけ環境変数から読み、`ProviderConfig` に詰めて注入する。

use common::error::Error;
use common::ports::outbound::{EnvResolver, FileSystem};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-coder";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_APP_TITLE: &str = "Computer Science Revision App";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful computer science tutor. Provide concise, accurate responses to questions about computer science concepts. Include examples where helpful. Keep responses under 300 words when possible.";

/// config.json の内容（すべて省略可）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QaSettings {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// API キーを読む環境変数名
    pub api_key_env: Option<String>,
    pub system_prompt: Option<String>,
    /// X-Title ヘッダ
    pub app_title: Option<String>,
    /// HTTP-Referer ヘッダ
    pub referer: Option<String>,
}

impl QaSettings {
    /// ファイルが無ければ既定値。壊れていれば Json エラー。
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, Error> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        let content = fs.read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("Invalid config at {}: {}", path.display(), e)))
    }

    /// CLI 指定で上書きする
    pub fn with_overrides(mut self, model: Option<String>, endpoint: Option<String>) -> Self {
        if model.is_some() {
            self.model = model;
        }
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// 資格情報を解決してプロバイダ設定を作る。無ければ Configuration エラー。
    pub fn provider_config(&self, env: &dyn EnvResolver) -> Result<ProviderConfig, Error> {
        let var = self.api_key_env();
        let credential = env
            .var(var)
            .map(|raw| normalize_api_key(&raw))
            .filter(|key| !key.is_empty())
            .map(Credential)
            .ok_or_else(|| Error::configuration(format!("{} is not set", var)))?;

        Ok(ProviderConfig {
            endpoint: self.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            credential,
            system_prompt: self
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            app_title: Some(
                self.app_title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),
            )
            .filter(|s| !s.is_empty()),
            referer: self.referer.clone().filter(|s| !s.is_empty()),
        })
    }
}

/// Bearer 資格情報（Debug では伏せる）
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 回答プロバイダの構築時設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub model: String,
    pub credential: Credential,
    pub system_prompt: String,
    pub app_title: Option<String>,
    pub referer: Option<String>,
}

/// 貼り付けられた API キーの前後の空白と引用符を取り除く
pub fn normalize_api_key(raw: &str) -> String {
    fn is_quote_char(c: char) -> bool {
        matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’')
    }
    raw.trim().trim_matches(is_quote_char).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use common::domain::HomeDir;
    use std::collections::HashMap;

    struct MapEnv(HashMap<String, String>);

    impl MapEnv {
        fn with(name: &str, value: &str) -> Self {
            let mut m = HashMap::new();
            m.insert(name.to_string(), value.to_string());
            Self(m)
        }
    }

    impl EnvResolver for MapEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned()
        }

        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new("/tmp/qa_test_home"))
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = QaSettings::load(&StdFileSystem, &dir.path().join("config.json")).unwrap();
        assert_eq!(settings, QaSettings::default());
        assert_eq!(settings.api_key_env(), DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_load_reads_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model":"openrouter/auto","api_key_env":"MY_KEY"}"#).unwrap();
        let settings = QaSettings::load(&StdFileSystem, &path).unwrap();
        assert_eq!(settings.model.as_deref(), Some("openrouter/auto"));
        assert_eq!(settings.api_key_env(), "MY_KEY");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"modle":"typo"}"#).unwrap();
        let err = QaSettings::load(&StdFileSystem, &path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_overrides_win() {
        let settings = QaSettings {
            model: Some("from-file".to_string()),
            ..QaSettings::default()
        }
        .with_overrides(Some("from-cli".to_string()), None);
        assert_eq!(settings.model.as_deref(), Some("from-cli"));
        assert_eq!(settings.endpoint, None);
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let env = MapEnv(HashMap::new());
        let err = QaSettings::default().provider_config(&env).unwrap_err();
        assert_eq!(err, Error::configuration("OPENROUTER_API_KEY is not set"));
    }

    #[test]
    fn test_quoted_blank_credential_is_rejected() {
        let env = MapEnv::with(DEFAULT_API_KEY_ENV, " \"\" ");
        assert!(matches!(
            QaSettings::default().provider_config(&env),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_provider_config_defaults() {
        let env = MapEnv::with(DEFAULT_API_KEY_ENV, "  'sk-or-123'\n");
        let cfg = QaSettings::default().provider_config(&env).unwrap();
        assert_eq!(cfg.credential.expose(), "sk-or-123");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.app_title.as_deref(), Some(DEFAULT_APP_TITLE));
        assert_eq!(cfg.referer, None);
        assert!(!format!("{:?}", cfg).contains("sk-or-123"));
    }

    #[test]
    fn test_normalize_api_key() {
        assert_eq!(normalize_api_key("  sk-1  "), "sk-1");
        assert_eq!(normalize_api_key("\"sk-1\""), "sk-1");
        assert_eq!(normalize_api_key("“sk-1”"), "sk-1");
        assert_eq!(normalize_api_key("''"), "");
    }
}

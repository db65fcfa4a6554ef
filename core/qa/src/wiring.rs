//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileKeyValueStore, ReqwestHttpClient, StderrMirrorLog, StdClock, StdEnvResolver,
    StdFileSystem, StdIdGenerator,
};
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, HttpClient, IdGenerator, KeyValueStore, Log};

use crate::adapter::{ChatAnswerProvider, QaSettings, StderrNotifier};
use crate::ports::outbound::{AnswerProvider, Notifier};
use crate::usecase::{QaDeps, QaUseCase, StorageDeps};

/// 配線の入力（CLI から渡される分だけ）
#[derive(Debug, Clone, Default)]
pub struct WireOptions {
    pub verbose: bool,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    /// 質問するコマンドのときだけ資格情報を解決する
    pub needs_provider: bool,
}

/// 配線で組み立てたもの（main の Runner で利用）
pub struct App {
    pub use_case: QaUseCase,
    /// 構造化ログ（ファイルへ JSONL）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_qa(options: &WireOptions) -> Result<App, Error> {
    let http: Option<Arc<dyn HttpClient>> = if options.needs_provider {
        Some(Arc::new(ReqwestHttpClient::new()?) as Arc<dyn HttpClient>)
    } else {
        None
    };
    wire_qa_with(Arc::new(StdEnvResolver), http, options)
}

/// 環境変数と HTTP を差し替えて組み立てる（テストからも使う）
pub fn wire_qa_with(
    env_resolver: Arc<dyn EnvResolver>,
    http: Option<Arc<dyn HttpClient>>,
    options: &WireOptions,
) -> Result<App, Error> {
    let home = env_resolver.resolve_home_dir()?;
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(fs.clone(), home.log_file()));
    let logger: Arc<dyn Log> = if options.verbose {
        Arc::new(StderrMirrorLog::new(file_log)) as Arc<dyn Log>
    } else {
        file_log
    };

    let settings = QaSettings::load(fs.as_ref(), &home.config_file())?
        .with_overrides(options.model.clone(), options.endpoint.clone());

    let provider: Option<Arc<dyn AnswerProvider>> = if options.needs_provider {
        let config = settings.provider_config(env_resolver.as_ref())?;
        let http = http.ok_or_else(|| Error::configuration("HTTP client is not configured"))?;
        Some(Arc::new(ChatAnswerProvider::new(config, http, logger.clone())) as Arc<dyn AnswerProvider>)
    } else {
        None
    };

    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(clock.clone()));
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(fs, home.storage_dir()));
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

    let use_case = QaUseCase::new(QaDeps {
        storage: StorageDeps {
            kv,
            id_gen,
            clock,
            log: logger.clone(),
        },
        provider,
        notifier,
        log: logger.clone(),
    });
    Ok(App { use_case, logger })
}

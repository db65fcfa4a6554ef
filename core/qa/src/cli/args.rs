use crate::domain::QaCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::QaId;
use common::error::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -l / --list: 履歴一覧を表示
    pub list: bool,
    /// --show <id>: 1 件を表示
    pub show: Option<QaId>,
    /// --delete <id>: 1 件を削除
    pub delete: Option<QaId>,
    /// --clear: 履歴をすべて削除
    pub clear: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub question_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("qa")
        .about("Ask computer science questions and keep a history of the answers")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list")
                .short('l')
                .long("list")
                .help("List previous questions, newest first")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["show", "delete", "clear", "question"]),
        )
        .arg(
            clap::Arg::new("show")
                .long("show")
                .value_name("id")
                .help("Show a previous question and its answer")
                .num_args(1)
                .conflicts_with_all(["delete", "clear", "question"]),
        )
        .arg(
            clap::Arg::new("delete")
                .long("delete")
                .value_name("id")
                .help("Delete one history entry")
                .num_args(1)
                .conflicts_with_all(["clear", "question"]),
        )
        .arg(
            clap::Arg::new("clear")
                .long("clear")
                .help("Delete all history entries")
                .action(ArgAction::SetTrue)
                .conflicts_with("question"),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name sent to the chat completions endpoint")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("endpoint")
                .long("endpoint")
                .value_name("url")
                .help("Chat completions endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("question")
                .index(1)
                .help("Question words; omit to start an interactive session")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list: matches.get_flag("list"),
        show: matches.get_one::<String>("show").map(|s| QaId::new(s.clone())),
        delete: matches.get_one::<String>("delete").map(|s| QaId::new(s.clone())),
        clear: matches.get_flag("clear"),
        verbose: matches.get_flag("verbose"),
        model: matches.get_one::<String>("model").cloned(),
        endpoint: matches.get_one::<String>("endpoint").cloned(),
        question_args: matches
            .get_many::<String>("question")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "qa", &mut std::io::stdout());
}

/// Config から実行モードを決める（help > 履歴操作 > 質問 > 対話）
pub fn config_to_command(config: Config) -> QaCommand {
    if config.help {
        return QaCommand::Help;
    }
    if config.list {
        return QaCommand::ListHistory;
    }
    if let Some(id) = config.show {
        return QaCommand::Show { id };
    }
    if let Some(id) = config.delete {
        return QaCommand::Delete { id };
    }
    if config.clear {
        return QaCommand::Clear;
    }
    if config.question_args.is_empty() {
        return QaCommand::Interactive;
    }
    QaCommand::Ask {
        question: config.question_args.join(" "),
    }
}

pub const USAGE: &str = "Usage: qa [options] [question...]";

pub const HELP_TEXT: &str = "\
Usage: qa [options] [question...]
Options:
  -h, --help               Show this help message
  -l, --list               List previous questions, newest first
      --show <id>          Show a previous question and its answer
      --delete <id>        Delete one history entry
      --clear              Delete all history entries
  -m, --model <model>      Model name (default: config.json model, or deepseek/deepseek-coder)
      --endpoint <url>     Chat completions endpoint (default: OpenRouter)
  -v, --verbose            Mirror structured logs to stderr
      --generate <shell>   Generate shell completion script (bash, zsh, fish, elvish, powershell)

Without a question, qa starts an interactive session (type /help inside it).

Environment:
  OPENROUTER_API_KEY  API key sent as a Bearer token (the variable name can be changed with
                      \"api_key_env\" in config.json)
  QA_HOME             Home directory. If unset, $XDG_CONFIG_HOME/qa (e.g. ~/.config/qa) is used.
                      Holds config.json, storage/ (history) and logs/qa.jsonl.

Examples:
  qa What is a hash table?
  qa -m openrouter/auto Explain big-O notation
  qa --list
  qa --show 0aB3xY9zK2m";

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("qa")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_no_args_is_interactive() {
        let config = parse_args_from(&args(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config_to_command(config), QaCommand::Interactive);
    }

    #[test]
    fn test_parse_args_question_words_are_joined() {
        let config = parse_args_from(&args(&["What", "is", "a", "heap?"])).unwrap();
        assert_eq!(
            config_to_command(config),
            QaCommand::Ask {
                question: "What is a heap?".to_string()
            }
        );
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args_from(&args(&["-h"])).unwrap().help);
        let config = parse_args_from(&args(&["--help", "--list"])).unwrap();
        assert_eq!(config_to_command(config), QaCommand::Help);
    }

    #[test]
    fn test_parse_args_history_actions() {
        let config = parse_args_from(&args(&["-l"])).unwrap();
        assert_eq!(config_to_command(config), QaCommand::ListHistory);

        let config = parse_args_from(&args(&["--show", "abc123"])).unwrap();
        assert_eq!(
            config_to_command(config),
            QaCommand::Show {
                id: QaId::new("abc123")
            }
        );

        let config = parse_args_from(&args(&["--delete", "abc123"])).unwrap();
        assert_eq!(
            config_to_command(config),
            QaCommand::Delete {
                id: QaId::new("abc123")
            }
        );

        let config = parse_args_from(&args(&["--clear"])).unwrap();
        assert_eq!(config_to_command(config), QaCommand::Clear);
    }

    #[test]
    fn test_parse_args_overrides() {
        let config =
            parse_args_from(&args(&["-m", "openrouter/auto", "--endpoint", "http://localhost:8080", "-v", "hi"]))
                .unwrap();
        assert_eq!(config.model.as_deref(), Some("openrouter/auto"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080"));
        assert!(config.verbose);
        assert_eq!(config.question_args, vec!["hi".to_string()]);
    }

    #[test]
    fn test_parse_args_conflicting_actions_are_usage_errors() {
        let err = parse_args_from(&args(&["--list", "--clear"])).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 64);

        let err = parse_args_from(&args(&["--show", "abc", "what?"])).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let err = parse_args_from(&args(&["--unknown"])).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_show_requires_value() {
        assert!(parse_args_from(&args(&["--show"])).is_err());
    }
}

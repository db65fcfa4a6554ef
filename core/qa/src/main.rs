mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{BufRead, Write};
use std::process;

use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, ParseOutcome, USAGE};
use domain::QaCommand;
use ports::inbound::RunQaApp;
use wiring::{wire_qa, App, WireOptions};

/// QaCommand を UseCase へ渡し、前後に lifecycle ログを残す Runner
struct Runner {
    app: App,
}

impl Runner {
    fn run(&self, command: QaCommand, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<i32, Error> {
        let command_name = command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.app.use_case.run(command, input, out);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                eprintln!("{}", USAGE);
            }
            eprintln!("qa: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let options = WireOptions {
        verbose: config.verbose,
        model: config.model.clone(),
        endpoint: config.endpoint.clone(),
        needs_provider: false,
    };
    let command = config_to_command(config);
    let app = wire_qa(&WireOptions {
        needs_provider: command.needs_provider(),
        ..options
    })?;

    let runner = Runner { app };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    runner.run(command, &mut stdin.lock(), &mut stdout.lock())
}

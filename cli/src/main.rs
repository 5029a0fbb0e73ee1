mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, lookup};
use terminal::format::Style;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    logging::init_logging(commands.verbose, cfg.colorize);

    match lookup::lookup(&commands.target, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print::error(&e.to_string(), Style::new(cfg.colorize));
            ExitCode::FAILURE
        }
    }
}

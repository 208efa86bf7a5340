use clap::{Args, Parser, Subcommand};
use hiring_guru::error::AppError;

use crate::commands::{run_languages, run_score, ScoreArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Hiring Guru",
    about = "Run the hiring assessment API and its offline tooling",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the supported languages and their judge ids
    Languages,
    /// Score a JSON file of coding test results without calling the judge
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Languages => run_languages(),
        Command::Score(args) => run_score(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["hiring-guru-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_host_and_port_overrides() {
        let cli = Cli::try_parse_from([
            "hiring-guru-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(8080));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn score_takes_a_path() {
        let cli = Cli::try_parse_from(["hiring-guru-api", "score", "results.json", "--json"])
            .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.path.to_str(), Some("results.json"));
                assert!(args.json);
            }
            other => panic!("expected score, got {other:?}"),
        }
    }
}

use crate::commands::{run_features, run_options, run_predict, FeaturesArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_scoring::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Creditworthiness Scoring",
    about = "Predict whether an applicant has good or bad credit from financial and demographic inputs",
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
    /// Score one applicant and print the result with its confidence
    Predict(PredictArgs),
    /// Print the engineered feature record without scoring it
    Features(FeaturesArgs),
    /// List every categorical option with its code, plus numeric ranges
    Options,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured classifier artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Features(args) => run_features(args),
        Command::Options => {
            run_options();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["credit-scoring-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "credit-scoring-api",
            "serve",
            "--port",
            "8080",
            "--model",
            "/srv/models/credit.json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.model, Some(PathBuf::from("/srv/models/credit.json")));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn predict_accepts_applicant_flags() {
        let cli = Cli::try_parse_from([
            "credit-scoring-api",
            "predict",
            "--status-checking-account",
            "No checking account",
            "--age",
            "42",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Predict(args)) => {
                let form = args.applicant.into_form().expect("form builds");
                assert_eq!(form.status_checking_account, "No checking account");
                assert_eq!(form.age, 42);
                assert_eq!(form.duration_months, 12);
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }
}

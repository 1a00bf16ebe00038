use clap::Parser;
use churn_predictor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Api(args) => cli::api::run(args).await,
        Command::Ui(args) => cli::ui::run(args).await,
    }
}

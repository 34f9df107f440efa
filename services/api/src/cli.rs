use crate::demo::{
    run_baseline, run_classify, run_demo, run_predict, run_survey, PredictArgs, SurveyArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use radon_watch::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Radon Watch",
    about = "Estimate residential radon risk from the command line or over HTTP",
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
    /// Score a home and print the prediction with its factor breakdown
    Predict(PredictArgs),
    /// Print the typical radon level for a region
    Baseline {
        /// Region key, e.g. Ontario_South
        region: String,
    },
    /// Classify a radon level in Bq/m³
    Classify {
        /// Radon concentration in Bq/m³
        level: u32,
    },
    /// Summarize a residential radon survey export by province
    Survey(SurveyArgs),
    /// Walk through a handful of sample homes end to end
    Demo,
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
        Command::Predict(args) => run_predict(args),
        Command::Baseline { region } => run_baseline(&region),
        Command::Classify { level } => run_classify(level),
        Command::Survey(args) => run_survey(args),
        Command::Demo => run_demo(),
    }
}

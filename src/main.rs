use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use onboarding_lib::bootstrap::{self, tracing::init_tracing_subscriber, RunOutcome};
use onboarding_lib::profile::Profile;
use tracing::error;

#[derive(Parser)]
#[command(name = "onboarding")]
#[command(about = "Run an applicant profile through the account onboarding wizard", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/onboarding/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Applicant profile with a [fields] table
    profile: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    match run(cli).await {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %format!("{err:#}"), "onboarding driver failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let config = bootstrap::load_config_or_default(cli.config)?;
    let profile = Profile::load(&cli.profile)
        .with_context(|| format!("Failed to load profile {}", cli.profile.display()))?;

    let deps = bootstrap::wire_onboarding(&config);
    let outcome = bootstrap::run_profile(&deps.orchestrator, &profile).await?;

    match &outcome {
        RunOutcome::Completed(account) => {
            println!(
                "Account {} created at {}",
                account.account_id,
                account.created_at.to_rfc3339()
            );
        }
        RunOutcome::Stopped { step, title, error } => {
            println!("Stopped on step {} ({title}): {}", step + 1, error.message());
        }
        RunOutcome::Abandoned => println!("Onboarding abandoned"),
    }

    Ok(outcome)
}

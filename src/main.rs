use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod config;
mod github;
mod marker;
mod run;

#[derive(Parser, Debug)]
#[command(name = "diffpost")]
#[command(about = "Posts a pull request diff as a comment, collapsing the previous run's one")]
#[command(version)]
struct Args {
    /// Path to the diff file to post
    #[arg(long, env = "DIFF_PATH")]
    diff_path: PathBuf,

    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Target repository ("owner/name")
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: String,

    /// Pull request number (defaults to the pull_request event ref)
    #[arg(long)]
    pr: Option<u32>,

    /// Identifier of this CI run, embedded in the comment marker
    #[arg(long, env = "GITHUB_RUN_ID")]
    run_id: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match try_run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // GitHub Actions workflow command: annotates and fails the run.
            eprintln!("::error::{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn try_run(args: Args) -> Result<()> {
    let ctx = config::RunContext::resolve(
        &args.repo,
        args.pr,
        std::env::var("GITHUB_REF").ok(),
        args.run_id,
    )?;

    run::post_diff_comment(&args.github_token, &ctx, &args.diff_path).await
}

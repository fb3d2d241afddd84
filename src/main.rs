use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use jobpoll::cli::{Cli, Command, PollArgs};
use jobpoll::config::JobPollConfig;
use jobpoll::logging::init_logging;
use jobpoll::simulator;
use jobpoll::ui::PollProgress;
use jobpoll::{
    BlockingJobPoller, BlockingStatusClient, JobPoller, JobStatus, Observer, PollError,
    StatusClient,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => JobPollConfig::load_from(path)?,
        None => JobPollConfig::load()?,
    };

    match cli.command {
        Command::Poll {
            job_id,
            base_url,
            timeout,
            blocking,
            poll,
        } => {
            let job_id = job_id.unwrap_or_default();
            let mut config = config;
            if let Some(url) = base_url {
                config.base_url = url;
            }
            if let Some(secs) = timeout {
                config.request_timeout_secs = secs;
            }
            let outcome = if blocking {
                poll_blocking(&config, &job_id, &poll)?
            } else {
                poll_cooperative(&config, &job_id, &poll)?
            };
            Ok(exit_code(&outcome))
        }
        Command::Serve { addr } => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(async {
                let listener = tokio::net::TcpListener::bind(&addr)
                    .await
                    .with_context(|| format!("failed to bind {addr}"))?;
                simulator::serve(listener, config.simulator).await
            })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn poll_cooperative(
    config: &JobPollConfig,
    job_id: &str,
    args: &PollArgs,
) -> Result<std::result::Result<JobStatus, PollError>> {
    let timeout = config.request_timeout()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(async {
        let client = StatusClient::new(config.base_url.clone(), timeout)?;
        let poller = JobPoller::new(client, args.apply(config.poll.clone()));
        let mut progress = PollProgress::start(job_id);
        let outcome = poller
            .poll_status(job_id, Observer::Sync(&mut progress))
            .await;
        progress.complete(&outcome);
        Ok::<_, anyhow::Error>(outcome)
    })
}

fn poll_blocking(
    config: &JobPollConfig,
    job_id: &str,
    args: &PollArgs,
) -> Result<std::result::Result<JobStatus, PollError>> {
    let timeout = config.request_timeout()?;
    let client = BlockingStatusClient::new(config.base_url.clone(), timeout)?;
    let poller = BlockingJobPoller::new(client, args.apply(config.poll.clone()));
    let mut progress = PollProgress::start(job_id);
    let outcome = poller.poll_status(job_id, Some(&mut progress));
    progress.complete(&outcome);
    Ok(outcome)
}

/// 0 for `completed`, 1 for a terminal `error` status, 2 when polling itself failed.
fn exit_code(outcome: &std::result::Result<JobStatus, PollError>) -> ExitCode {
    match outcome {
        Ok(JobStatus::Completed) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(_) => ExitCode::from(2),
    }
}

//! Single-host stack subcommand.

use crate::cli::StackArgs;
use anyhow::{Context, Result};
use dragnet_core::process::SystemRunner;
use dragnet_env::lifecycle::{InitOptions, Orchestrator, StackRequest};
use dragnet_services::http::HttpFetcher;
use dragnet_types::RunMode;

pub fn execute(args: &StackArgs) -> Result<bool> {
    let mut request = StackRequest {
        check: args.check,
        init: args.init.then(|| InitOptions {
            profile: args.profile.clone(),
            conf_file: args.conf_file.clone(),
        }),
        run: args
            .run
            .as_deref()
            .map(str::parse::<RunMode>)
            .transpose()?,
        stop: args.stop,
        down: args.down,
        reset: args.reset,
    };

    if !request.check
        && request.init.is_none()
        && request.run.is_none()
        && !request.stop
        && !request.down
        && !request.reset
    {
        super::nothing_requested();
        return Ok(true);
    }

    if request.reset
        && !super::confirm_destructive(
            "Delete all materialized environment files, wordlists, and the monitoring add-on?",
            args.yes,
        )?
    {
        request.reset = false;
        if !request.check
            && request.init.is_none()
            && request.run.is_none()
            && !request.stop
            && !request.down
        {
            return Ok(true);
        }
    }

    let runner = SystemRunner;
    let fetcher = HttpFetcher::new()?;
    let root = std::env::current_dir().context("Cannot determine working directory")?;
    let orchestrator = Orchestrator::new(root, &runner, &fetcher);

    let report = orchestrator.run_stack(&request);
    super::print_report(&report);
    Ok(report.ok())
}

//! Cloud-target subcommand.

use crate::cli::CloudArgs;
use anyhow::{Context, Result};
use dragnet_core::process::SystemRunner;
use dragnet_env::lifecycle::{CloudRequest, Orchestrator};
use dragnet_services::http::HttpFetcher;

pub fn execute(args: &CloudArgs) -> Result<bool> {
    let mut request = CloudRequest {
        check: args.check,
        prepare: args.prepare,
        provision: args.provision,
        install: args.install,
        destroy: args.destroy,
    };

    if !request.check && !request.prepare && !request.provision && !request.install && !request.destroy
    {
        super::nothing_requested();
        return Ok(true);
    }

    if request.destroy
        && !super::confirm_destructive(
            "Tear down all provisioned cloud resources?",
            args.yes,
        )?
    {
        request.destroy = false;
        if !request.check && !request.prepare && !request.provision && !request.install {
            return Ok(true);
        }
    }

    let runner = SystemRunner;
    let fetcher = HttpFetcher::new()?;
    let root = std::env::current_dir().context("Cannot determine working directory")?;
    let orchestrator = Orchestrator::new(root, &runner, &fetcher);

    let report = orchestrator.run_cloud(&request);
    super::print_report(&report);
    Ok(report.ok())
}

use anyhow::Result;

use super::super::{args::ScanCommand, context::ProjectContext, exit_status::ExitStatus, report};

/// Report texts per file. New texts count as pending work.
pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let scan = ctx.pipeline.scan()?;

    report::print_scan(&ctx, &scan);

    Ok(if scan.new_texts.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    })
}

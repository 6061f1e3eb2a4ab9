use anyhow::Result;

use super::super::{args::RunCommand, context::ProjectContext, exit_status::ExitStatus, report};

pub fn run(cmd: RunCommand) -> Result<ExitStatus> {
    let ctx = ProjectContext::new(&cmd.common)?;
    let result = ctx.pipeline.run(cmd.apply)?;

    report::print_run(&ctx, &result);

    Ok(if result.has_pending_work() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

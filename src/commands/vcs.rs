//! Version control task (`diff`)

use fwtask_core::task::Task;
use fwtask_core::{Context, Result};

/// Open git's configured diff tool on the whole working tree
pub fn cmd_diff(ctx: &mut Context<'_>) -> Result<()> {
    let invocation = ctx
        .command("git", ctx.root(), Task::Diff.path_profile())?
        .args(["difftool", "--dir-diff"]);
    ctx.run(&invocation)
}

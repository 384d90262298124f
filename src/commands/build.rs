//! Build tasks (`configure`, `all`, `clean`, `clean_all`)

use fwtask_core::fs;
use fwtask_core::task::Task;
use fwtask_core::{Context, Result};

use super::run_build_tool;

/// Recreate the build directory and generate a single-config build tree
///
/// cmake is looked up through the `env_gcc` search path, so the cross
/// compiler from the toolchain file resolves the same way.
pub fn cmd_configure(ctx: &mut Context<'_>) -> Result<()> {
    let build_dir = ctx.build_dir();
    fs::ensure_fresh(&build_dir)?;

    let project = &ctx.config().project;
    let invocation = ctx
        .command("cmake", &build_dir, Task::Configure.path_profile())?
        .arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", project.toolchain_file))
        .arg(format!("-G{}", project.generator))
        .arg(ctx.root());
    ctx.run(&invocation)
}

/// Build the default targets
pub fn cmd_all(ctx: &mut Context<'_>) -> Result<()> {
    let jobs = format!("-j{}", ctx.config().project.jobs);
    run_build_tool(ctx, Task::All, &[jobs.as_str(), "all"])
}

/// Run the build tool's own clean target
pub fn cmd_clean(ctx: &mut Context<'_>) -> Result<()> {
    run_build_tool(ctx, Task::Clean, &["clean"])
}

/// Remove the build tree and the staged doxygen XML outright
pub fn cmd_clean_all(ctx: &mut Context<'_>) -> Result<()> {
    let layout = &ctx.config().layout;
    fs::ensure_absent(&ctx.build_dir())?;
    fs::ensure_absent(&ctx.path(&layout.doxy_xml_dir))?;
    Ok(())
}

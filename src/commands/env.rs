//! Search path tasks (`env`, `env_gcc`)

use fwtask_core::env::PathProfile;
use fwtask_core::{Context, Result};

/// Print the augmented search path for `profile`
///
/// Nothing is changed; tools get this path attached per invocation. The
/// output can be used to reproduce the environment in a shell.
pub fn cmd_env(ctx: &mut Context<'_>, profile: PathProfile) -> Result<()> {
    let path = ctx.search_path(Some(profile))?.unwrap_or_default();
    log::debug!(
        "{:?} search path has {} entries",
        profile,
        std::env::split_paths(&path).count()
    );
    println!("{}", path.to_string_lossy());
    Ok(())
}

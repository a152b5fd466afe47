//! Host-side setup commands
//!
//! Emits `ln -sf` for each volume and, once the rc file is in place, an
//! instruction to source it. Anything that needs a human (a real file in the
//! way, a stale rc file) turns the whole result into warnings only.

use ysenv_fs::io;

use crate::Result;
use crate::environment::Environment;
use crate::resolver::ResolvedInstance;

use super::rc::RcFilePlan;
use super::shell::quote;
use super::Outcome;

/// Render host commands for `instance`.
///
/// The rc file is written only when no warning was produced.
pub fn render_host(instance: &ResolvedInstance, env: &Environment) -> Result<Outcome> {
    let mut commands = Vec::new();
    let mut warnings = Vec::new();

    for volume in instance.volumes.iter().flatten() {
        let target = &volume.container_path;
        if !target.exists() || target.is_symlink() {
            commands.push(format!(
                "ln -sf {} {}",
                quote(volume.host_path.as_str()),
                quote(target.as_str())
            ));
        } else {
            warnings.push(format!(
                "echo \"Please delete {} manually\"",
                quote(target.as_str())
            ));
        }
    }

    let plan = instance.rc().map(|rc| RcFilePlan::from_list(rc, env.home()));

    for name in io::list_entry_names(env.home())? {
        if !RcFilePlan::is_rc_file_name(&name) {
            continue;
        }
        if plan.as_ref().is_some_and(|plan| plan.file_name == name) {
            continue;
        }
        warnings.push(format!(
            "echo \"Please run \\`rm {}\\`\"",
            env.home().join(&name)
        ));
    }

    if !warnings.is_empty() {
        tracing::debug!(
            instance = %instance.id(),
            count = warnings.len(),
            "Host setup needs manual fixes"
        );
        return Ok(Outcome::failure(warnings.join("\n")));
    }

    if let Some(plan) = plan {
        plan.materialize()?;
        commands.push(format!(
            "echo \"Please run \\`source {}\\`\"",
            quote(plan.file_path.as_str())
        ));
    }

    Ok(Outcome::success(commands.join("\n")))
}

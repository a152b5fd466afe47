//! Host and docker command implementation
//!
//! Loads the environment document and hands it to the resolution engine.

use serde_json::Value;
use ysenv_core::{DockerHomeProbe, Engine, Environment, InstanceKind, Outcome};
use ysenv_fs::ConfigStore;

use crate::cli::TargetArgs;
use crate::context::DocumentLocation;
use crate::error::Result;

/// Resolve and render `target` of `kind`.
///
/// Document and environment failures are errors; everything the engine
/// reports comes back as an [`Outcome`].
pub fn run_resolve(
    location: &DocumentLocation,
    kind: InstanceKind,
    target: &TargetArgs,
    docker: &str,
) -> Result<Outcome> {
    location.require_existing()?;
    let raw: Value = ConfigStore::new().load(&location.path)?;

    let env = Environment::from_process()?;
    let probe = DockerHomeProbe::with_program(docker);
    tracing::debug!(
        %kind,
        instance = ?target.instance,
        list = target.list,
        home = %env.home(),
        "Resolving"
    );

    let engine = Engine::new(&env, &probe);
    Ok(engine.resolve_and_render(&raw, kind, target.instance.as_deref(), target.list))
}

//! Top-level entry point: raw document in, [`Outcome`] out.

use serde_json::Value;

use crate::document::{Document, InstanceKind};
use crate::environment::Environment;
use crate::probe::ContainerHomeProbe;
use crate::render::{Outcome, render_docker, render_host, render_listing};
use crate::resolver::InstanceResolver;
use crate::Result;

/// Ties a document to the process environment and renders one request.
pub struct Engine<'a> {
    env: &'a Environment,
    probe: &'a dyn ContainerHomeProbe,
}

impl<'a> Engine<'a> {
    pub fn new(env: &'a Environment, probe: &'a dyn ContainerHomeProbe) -> Self {
        Self { env, probe }
    }

    /// Resolve and render a request, folding every error into a failed
    /// [`Outcome`] carrying its message.
    ///
    /// With no `instance`, the instance names of `kind` are listed.
    pub fn resolve_and_render(
        &self,
        raw: &Value,
        kind: InstanceKind,
        instance: Option<&str>,
        want_listing: bool,
    ) -> Outcome {
        match self.try_resolve_and_render(raw, kind, instance, want_listing) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "Resolution failed");
                Outcome::failure(e.to_string())
            }
        }
    }

    /// Like [`Engine::resolve_and_render`] but keeps the typed error.
    pub fn try_resolve_and_render(
        &self,
        raw: &Value,
        kind: InstanceKind,
        instance: Option<&str>,
        want_listing: bool,
    ) -> Result<Outcome> {
        let document = Document::from_value(raw)?;

        let Some(name) = instance else {
            return Ok(Outcome::success(document.instance_names(kind).join(" ")));
        };

        let resolved = InstanceResolver::new(self.env, self.probe).resolve(&document, kind, name)?;
        tracing::debug!(instance = %resolved.id(), "Instance resolved");

        if want_listing {
            let base_path = self.env.expand_user(document.base_path());
            return Ok(Outcome::success(render_listing(&resolved, &base_path)));
        }

        match kind {
            InstanceKind::Host => render_host(&resolved, self.env),
            InstanceKind::Docker => render_docker(&resolved, self.env, &mut rand::thread_rng()),
        }
    }
}

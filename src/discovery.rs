use crate::loader::Loaders;
use crate::model::capability::{Capability, CapabilityType, Scope};
use crate::model::view_model::CapabilityView;

/// View models split by scope, ready for the browser.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub user: Vec<CapabilityView>,
    pub project: Vec<CapabilityView>,
}

/// Runs the loaders over scopes and kinds and merges their output.
#[derive(Debug, Clone)]
pub struct Aggregator {
    loaders: Loaders,
}

impl Aggregator {
    pub fn new(loaders: Loaders) -> Self {
        Self { loaders }
    }

    /// Scopes outer, kinds inner in [`CapabilityType::ALL`] order,
    /// whatever order `kinds` is given in. A failing (kind, scope) pair is
    /// logged and contributes nothing.
    pub fn collect(&self, kinds: &[CapabilityType], scopes: &[Scope]) -> Vec<Capability> {
        let mut capabilities = Vec::new();

        for &scope in scopes {
            for kind in CapabilityType::ALL.into_iter().filter(|kind| kinds.contains(kind)) {
                match self.loaders.load(kind, scope) {
                    Ok(found) => capabilities.extend(found),
                    Err(err) => {
                        tracing::warn!(scope = %scope, kind = %kind, "failed to load capabilities: {err}");
                    }
                }
            }
        }

        capabilities
    }

    /// Every kind for both scopes, converted to view models.
    pub fn load_buckets(&self) -> Buckets {
        let mut buckets = Buckets::default();

        for capability in self.collect(&CapabilityType::ALL, &Scope::ALL) {
            let view = CapabilityView::from(&capability);
            match view.scope() {
                Scope::User => buckets.user.push(view),
                Scope::Project => buckets.project.push(view),
            }
        }

        tracing::info!(
            user_capabilities = buckets.user.len(),
            project_capabilities = buckets.project.len(),
            "loaded capabilities"
        );
        buckets
    }
}

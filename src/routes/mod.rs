//! Route registry.
//!
//! # Responsibilities
//! - Map path prefixes to routers in an explicit, compile-time registry
//! - Mount everything in deterministic order at startup
//!
//! # Design Decisions
//! - No filesystem-driven route discovery: the registry replaces dynamic
//!   module loading with a typed mapping, so startup ordering is predictable
//!   and a missing route is a compile error, never a silent absence

pub mod kubernetes;
pub mod public;

use axum::Router;

use crate::http::server::AppState;

/// Explicit mapping from path prefix to router.
#[derive(Default)]
pub struct RouteRegistry {
    entries: Vec<(String, Router<AppState>)>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in route set: probe routes at the root, the public test
    /// routes under `/pub`.
    pub fn builtin() -> Self {
        Self::new()
            .mount("/", kubernetes::router())
            .mount("/pub", public::router())
    }

    /// Register `router` under `prefix`. `/` merges at the root.
    pub fn mount(mut self, prefix: &str, router: Router<AppState>) -> Self {
        self.entries.push((prefix.to_string(), router));
        self
    }

    /// Registered prefixes, in mount order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(prefix, _)| prefix.as_str())
    }

    /// Collapse the registry into a single router.
    pub fn into_router(self) -> Router<AppState> {
        for (prefix, _) in &self.entries {
            tracing::debug!(%prefix, "mounting routes");
        }
        self.entries
            .into_iter()
            .fold(Router::new(), |app, (prefix, router)| {
                if prefix == "/" {
                    app.merge(router)
                } else {
                    app.nest(&prefix, router)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_mounts_expected_prefixes() {
        let registry = RouteRegistry::builtin();
        let prefixes: Vec<_> = registry.prefixes().collect();
        assert_eq!(prefixes, vec!["/", "/pub"]);
    }
}

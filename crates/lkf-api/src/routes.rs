//! Route Table
//!
//! Declarative list of resource routers and the prefixes they mount under.
//! The table is validated once at startup: prefixes must be well formed,
//! unique, must not nest inside one another and must not shadow the gateway's
//! own paths. Mounting is keyed by prefix, so the order entries are declared
//! in has no effect on the composed router.

use axum::Router;
use std::collections::BTreeMap;
use tracing::debug;

use crate::api::{alerts_router, basins_router, levels_router, rivers_router, stations_router};
use crate::api::ResourceState;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Builds a resource router; an error aborts gateway construction
pub type RouterFactory = fn(ResourceState, &GatewayConfig) -> Result<Router>;

/// A resource router mounted under a path prefix
#[derive(Debug, Clone, Copy)]
pub struct Mount {
    pub prefix: &'static str,
    /// Documentation grouping for the router's paths
    pub tag: &'static str,
    pub build: RouterFactory,
}

/// The resource routers served by the gateway
pub const API_MOUNTS: [Mount; 5] = [
    Mount { prefix: "/api/stations", tag: "Stations", build: stations_router },
    Mount { prefix: "/api/rivers", tag: "Rivers", build: rivers_router },
    Mount { prefix: "/api/basins", tag: "Basins", build: basins_router },
    Mount { prefix: "/api/levels", tag: "Water Levels", build: levels_router },
    Mount { prefix: "/api/alerts", tag: "Alerts", build: alerts_router },
];

/// Paths owned by the gateway itself
const RESERVED_PREFIXES: [&str; 7] = [
    "/dashboard",
    "/demo",
    "/health",
    "/static",
    "/docs",
    "/openapi.json",
    "/api-docs",
];

fn nests_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix).map_or(false, |rest| rest.starts_with('/'))
}

fn check_prefix(prefix: &str) -> Result<()> {
    let well_formed = prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains("//")
        && !prefix.contains(':')
        && !prefix.contains('*');
    if !well_formed {
        return Err(GatewayError::configuration(format!("Invalid mount prefix: '{}'", prefix)));
    }

    for reserved in RESERVED_PREFIXES {
        if prefix == reserved || nests_under(prefix, reserved) || nests_under(reserved, prefix) {
            return Err(GatewayError::configuration(format!(
                "Mount prefix '{}' conflicts with gateway path '{}'",
                prefix, reserved
            )));
        }
    }
    Ok(())
}

/// Validated set of mounts, ordered by prefix
#[derive(Debug, Clone)]
pub struct RouteTable {
    mounts: BTreeMap<&'static str, Mount>,
}

impl RouteTable {
    pub fn new(mounts: &[Mount]) -> Result<Self> {
        let mut table: BTreeMap<&'static str, Mount> = BTreeMap::new();

        for mount in mounts {
            check_prefix(mount.prefix)?;

            if table.contains_key(mount.prefix) {
                return Err(GatewayError::configuration(format!(
                    "Duplicate mount prefix: '{}'",
                    mount.prefix
                )));
            }
            if let Some(existing) = table
                .keys()
                .find(|p| nests_under(mount.prefix, p) || nests_under(p, mount.prefix))
            {
                return Err(GatewayError::configuration(format!(
                    "Mount prefix '{}' overlaps '{}'",
                    mount.prefix, existing
                )));
            }

            table.insert(mount.prefix, *mount);
        }

        Ok(Self { mounts: table })
    }

    /// `(prefix, tag)` pairs in prefix order
    pub fn resolved(&self) -> Vec<(&'static str, &'static str)> {
        self.mounts.values().map(|m| (m.prefix, m.tag)).collect()
    }

    /// Tag of the mount owning `path`, if any
    pub fn tag_for(&self, path: &str) -> Option<&'static str> {
        self.mounts
            .values()
            .find(|m| path == m.prefix || nests_under(path, m.prefix))
            .map(|m| m.tag)
    }

    /// Build every router and nest it under its prefix
    pub fn mount(&self, mut router: Router, state: &ResourceState, config: &GatewayConfig) -> Result<Router> {
        for mount in self.mounts.values() {
            let resource = (mount.build)(state.clone(), config)?;
            debug!("Mounted {} at {}", mount.tag, mount.prefix);
            router = router.nest(mount.prefix, resource);
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_router(_state: ResourceState, _config: &GatewayConfig) -> Result<Router> {
        Ok(Router::new())
    }

    fn mount(prefix: &'static str) -> Mount {
        Mount { prefix, tag: "Test", build: empty_router }
    }

    #[test]
    fn test_api_mounts_are_valid() {
        let table = RouteTable::new(&API_MOUNTS).unwrap();
        assert_eq!(table.resolved().len(), 5);
    }

    #[test]
    fn test_order_independent() {
        let mut reversed = API_MOUNTS;
        reversed.reverse();
        let a = RouteTable::new(&API_MOUNTS).unwrap();
        let b = RouteTable::new(&reversed).unwrap();
        assert_eq!(a.resolved(), b.resolved());
    }

    #[test]
    fn test_duplicate_prefix_rejected() {
        let err = RouteTable::new(&[mount("/api/a"), mount("/api/a")]).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }

    #[test]
    fn test_nested_prefix_rejected() {
        assert!(RouteTable::new(&[mount("/api/a"), mount("/api/a/b")]).is_err());
        assert!(RouteTable::new(&[mount("/api/a/b"), mount("/api/a")]).is_err());
        // Shared leading characters are not nesting
        assert!(RouteTable::new(&[mount("/api/a"), mount("/api/ab")]).is_ok());
    }

    #[test]
    fn test_malformed_and_reserved_prefixes_rejected() {
        for bad in ["", "/", "api/a", "/api/a/", "/api//a", "/api/:id", "/health", "/static/x", "/docs"] {
            assert!(RouteTable::new(&[mount(bad)]).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_tag_for() {
        let table = RouteTable::new(&API_MOUNTS).unwrap();
        assert_eq!(table.tag_for("/api/levels/hanwella/trend"), Some("Water Levels"));
        assert_eq!(table.tag_for("/api/alerts"), Some("Alerts"));
        assert_eq!(table.tag_for("/api/stationsx"), None);
        assert_eq!(table.tag_for("/dashboard"), None);
    }
}

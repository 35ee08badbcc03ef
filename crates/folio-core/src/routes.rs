use std::collections::HashSet;

use anyhow::{bail, Result};
use folio_schema::{PlaceholderId, Route, ViewId};

/// The navigation surface of the portfolio. The landing route carries the
/// profile panel and doubles as the fallback for unknown paths.
const PORTFOLIO_ROUTES: &[Route] = &[
    Route {
        path: "/",
        view: ViewId::Home,
        placeholder: PlaceholderId::Home,
        shows_profile_panel: true,
        is_landing: true,
    },
    Route {
        path: "/about",
        view: ViewId::About,
        placeholder: PlaceholderId::About,
        shows_profile_panel: false,
        is_landing: false,
    },
    Route {
        path: "/skills",
        view: ViewId::Skills,
        placeholder: PlaceholderId::Skills,
        shows_profile_panel: false,
        is_landing: false,
    },
    Route {
        path: "/projects",
        view: ViewId::Projects,
        placeholder: PlaceholderId::Projects,
        shows_profile_panel: false,
        is_landing: false,
    },
    Route {
        path: "/contact",
        view: ViewId::Contact,
        placeholder: PlaceholderId::Contact,
        shows_profile_panel: false,
        is_landing: false,
    },
];

/// Pure static path lookup. Unknown paths are signaled with `None`, never a
/// panic; callers that need a deterministic answer use the fallback variant.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    landing: usize,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.path) {
                bail!("duplicate route path: {}", route.path);
            }
        }
        let landings: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_landing)
            .map(|(i, _)| i)
            .collect();
        let landing = match landings.as_slice() {
            [index] => *index,
            [] => bail!("route table has no landing route"),
            _ => bail!("route table has {} landing routes, expected one", landings.len()),
        };
        Ok(Self { routes, landing })
    }

    pub fn portfolio() -> Self {
        // The static set above is validated by tests; indices are known.
        Self {
            routes: PORTFOLIO_ROUTES.to_vec(),
            landing: 0,
        }
    }

    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Lookup with the deterministic fallback: unknown paths resolve to the
    /// landing route.
    pub fn resolve_or_fallback(&self, path: &str) -> &Route {
        self.resolve(path).unwrap_or(&self.routes[self.landing])
    }

    pub fn landing(&self) -> &Route {
        &self.routes[self.landing]
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

use std::sync::Arc;

use folio_schema::{PlaceholderId, Session, SessionState, ViewBundle, ViewId, ViewLoadState};

use crate::loader::ViewLoader;
use crate::routes::RouteTable;

/// What the UI layer should put on screen for a given path and instant.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationDecision {
    /// Loading UI shaped like the destination page, keyed to the path's
    /// route rather than a generic spinner.
    ShowPlaceholder(PlaceholderId),
    /// The view's acquisition failed; re-navigation retries it.
    ShowFailure {
        placeholder: PlaceholderId,
        error: String,
    },
    ShowView {
        view: ViewId,
        bundle: Arc<ViewBundle>,
        session: Session,
        shows_profile_panel: bool,
    },
}

/// Composes the route table, session state, and view loader into a
/// presentation decision. Re-evaluated by the UI loop whenever the current
/// path, the session, or a view-load state changes.
pub struct PresentationController {
    table: RouteTable,
}

impl PresentationController {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn present(
        &self,
        path: &str,
        session: &SessionState,
        loader: &ViewLoader,
    ) -> PresentationDecision {
        let route = self.table.resolve_or_fallback(path);

        // While the session is unresolved nothing is acquired yet; the
        // placeholder must still match the destination page's shape.
        let SessionState::Resolved(session) = session else {
            return PresentationDecision::ShowPlaceholder(route.placeholder);
        };

        // Recomposition observes failures without restarting them: only an
        // explicit navigation event calls `ViewLoader::load`, otherwise
        // failures would retry themselves in a loop.
        match loader.observe(*route) {
            ViewLoadState::NotRequested | ViewLoadState::Pending => {
                PresentationDecision::ShowPlaceholder(route.placeholder)
            }
            ViewLoadState::Failed(error) => PresentationDecision::ShowFailure {
                placeholder: route.placeholder,
                error,
            },
            ViewLoadState::Ready(bundle) => PresentationDecision::ShowView {
                view: route.view,
                bundle,
                session: session.clone(),
                shows_profile_panel: route.is_landing && route.shows_profile_panel,
            },
        }
    }
}

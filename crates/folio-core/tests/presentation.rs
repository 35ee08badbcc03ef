use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use folio_core::{PresentationController, PresentationDecision, RouteTable, ViewLoader, ViewSource};
use folio_schema::{
    PlaceholderId, ProfileCard, Route, Session, SessionState, ViewBundle, ViewId, ViewLoadState,
};
use tokio::sync::{mpsc, Notify};
use tokio::time::{timeout, Duration};

/// Source that parks every acquisition on a gate until released. The first
/// `fail_next` releases produce acquisition failures.
struct GatedSource {
    gate: Notify,
    calls: AtomicUsize,
    fail_next: AtomicUsize,
}

impl GatedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
            fail_next: AtomicUsize::new(0),
        })
    }

    async fn release(&self) {
        // Let the spawned acquisition reach the gate first.
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.gate.notify_waiters();
    }
}

#[async_trait]
impl ViewSource for GatedSource {
    async fn acquire(&self, route: Route) -> Result<ViewBundle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        if self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(anyhow!("network failure fetching view chunk"));
        }
        Ok(match route.view {
            ViewId::Home => ViewBundle::Home(ProfileCard::default()),
            ViewId::About => ViewBundle::About { visit_count: 42 },
            ViewId::Skills => ViewBundle::Skills(vec![]),
            ViewId::Projects => ViewBundle::Projects(vec![]),
            ViewId::Contact => ViewBundle::Contact(Default::default()),
        })
    }
}

fn setup(source: Arc<GatedSource>) -> (PresentationController, ViewLoader, mpsc::Receiver<ViewId>) {
    let (loader, events) = ViewLoader::new(source);
    (
        PresentationController::new(RouteTable::portfolio()),
        loader,
        events,
    )
}

async fn settled(events: &mut mpsc::Receiver<ViewId>) -> ViewId {
    timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("acquisition timed out")
        .expect("event channel closed")
}

fn anonymous() -> SessionState {
    SessionState::Resolved(Session::anonymous())
}

#[tokio::test]
async fn unresolved_session_shows_route_matched_placeholder_everywhere() {
    let source = GatedSource::new();
    let (controller, loader, _events) = setup(source.clone());

    let cases = [
        ("/", PlaceholderId::Home),
        ("/about", PlaceholderId::About),
        ("/skills", PlaceholderId::Skills),
        ("/projects", PlaceholderId::Projects),
        ("/contact", PlaceholderId::Contact),
    ];
    for (path, placeholder) in cases {
        let decision = controller.present(path, &SessionState::Unresolved, &loader);
        assert_eq!(decision, PresentationDecision::ShowPlaceholder(placeholder));
    }

    // An unresolved session never advances the loader.
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert_eq!(loader.state(ViewId::Projects), ViewLoadState::NotRequested);
}

#[tokio::test]
async fn projects_scenario_placeholder_until_ready_then_view() {
    let source = GatedSource::new();
    let (controller, loader, mut events) = setup(source.clone());

    // Session still resolving.
    let decision = controller.present("/projects", &SessionState::Unresolved, &loader);
    assert_eq!(
        decision,
        PresentationDecision::ShowPlaceholder(PlaceholderId::Projects)
    );

    // Session resolves anonymous; acquisition begins, placeholder continues.
    let session = anonymous();
    let decision = controller.present("/projects", &session, &loader);
    assert_eq!(
        decision,
        PresentationDecision::ShowPlaceholder(PlaceholderId::Projects)
    );

    // Rapid repeat navigation while pending must not duplicate the fetch.
    controller.present("/projects", &session, &loader);
    controller.present("/projects", &session, &loader);

    source.release().await;
    assert_eq!(settled(&mut events).await, ViewId::Projects);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    match controller.present("/projects", &session, &loader) {
        PresentationDecision::ShowView {
            view,
            session: props,
            shows_profile_panel,
            ..
        } => {
            assert_eq!(view, ViewId::Projects);
            assert!(props.is_anonymous());
            assert!(!shows_profile_panel);
        }
        other => panic!("expected ShowView, got {other:?}"),
    }
}

#[tokio::test]
async fn ready_decision_is_stable_without_state_changes() {
    let source = GatedSource::new();
    let (controller, loader, mut events) = setup(source.clone());
    let session = anonymous();

    controller.present("/", &session, &loader);
    source.release().await;
    settled(&mut events).await;

    let first = controller.present("/", &session, &loader);
    let second = controller.present("/", &session, &loader);
    assert!(matches!(first, PresentationDecision::ShowView { .. }));
    assert_eq!(first, second);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn landing_route_carries_profile_panel_flag() {
    let source = GatedSource::new();
    let (controller, loader, mut events) = setup(source.clone());
    let session = anonymous();

    controller.present("/", &session, &loader);
    source.release().await;
    settled(&mut events).await;

    match controller.present("/", &session, &loader) {
        PresentationDecision::ShowView {
            shows_profile_panel,
            ..
        } => assert!(shows_profile_panel),
        other => panic!("expected ShowView, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_path_resolves_through_fallback_route() {
    let source = GatedSource::new();
    let (controller, loader, mut events) = setup(source.clone());

    let decision = controller.present("/xyz", &SessionState::Unresolved, &loader);
    assert_eq!(
        decision,
        PresentationDecision::ShowPlaceholder(PlaceholderId::Home)
    );

    let session = anonymous();
    controller.present("/xyz", &session, &loader);
    source.release().await;
    settled(&mut events).await;

    match controller.present("/xyz", &session, &loader) {
        PresentationDecision::ShowView { view, .. } => assert_eq!(view, ViewId::Home),
        other => panic!("expected ShowView, got {other:?}"),
    }
}

#[tokio::test]
async fn skills_failure_then_retry_succeeds() {
    let source = GatedSource::new();
    source.fail_next.store(1, Ordering::SeqCst);
    let (controller, loader, mut events) = setup(source.clone());
    let session = anonymous();

    // First visit: acquisition fails.
    controller.present("/skills", &session, &loader);
    source.release().await;
    settled(&mut events).await;

    match controller.present("/skills", &session, &loader) {
        PresentationDecision::ShowFailure { placeholder, error } => {
            assert_eq!(placeholder, PlaceholderId::Skills);
            assert!(error.contains("network failure"));
        }
        other => panic!("expected ShowFailure, got {other:?}"),
    }
    // Recomposition alone never retries a failure.
    controller.present("/skills", &session, &loader);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    // Re-navigation is the retry trigger: the navigation event calls load.
    let route = *controller.table().resolve("/skills").unwrap();
    assert_eq!(loader.load(route), ViewLoadState::Pending);
    source.release().await;
    settled(&mut events).await;

    match controller.present("/skills", &session, &loader) {
        PresentationDecision::ShowView { view, .. } => assert_eq!(view, ViewId::Skills),
        other => panic!("expected ShowView, got {other:?}"),
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

use std::sync::{Arc, Mutex, RwLock};

use anyhow::Result;
use folio_schema::{Session, SessionState};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::provider::IdentityProvider;

const OBSERVER_CHANNEL_CAPACITY: usize = 16;

/// Owns the process-wide session state. On activation it issues exactly one
/// initial fetch and one change-stream subscription against the identity
/// provider; every update is fanned out to observers. The forwarding task is
/// aborted on drop, so no notification ever lands on a torn-down consumer.
pub struct SessionResolver {
    state: Arc<RwLock<SessionState>>,
    observers: Arc<Mutex<Vec<mpsc::Sender<SessionState>>>>,
    provider: Arc<dyn IdentityProvider>,
    forward: JoinHandle<()>,
}

impl SessionResolver {
    pub fn activate(provider: Arc<dyn IdentityProvider>) -> Self {
        let state = Arc::new(RwLock::new(SessionState::Unresolved));
        let observers: Arc<Mutex<Vec<mpsc::Sender<SessionState>>>> =
            Arc::new(Mutex::new(Vec::new()));

        let forward = tokio::spawn(forward_changes(
            provider.clone(),
            state.clone(),
            observers.clone(),
        ));

        Self {
            state,
            observers,
            provider,
            forward,
        }
    }

    /// Synchronous read of the latest known session state.
    pub fn current(&self) -> SessionState {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Observe every session-state change, including the initial resolution.
    /// A subscriber arriving after resolution is handed the current state
    /// immediately; around a concurrent update that state may arrive twice,
    /// which is harmless since every notification is a full replacement.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> mpsc::Receiver<SessionState> {
        let (tx, rx) = mpsc::channel(OBSERVER_CHANNEL_CAPACITY);
        if let Ok(mut observers) = self.observers.lock() {
            let current = self.current();
            if current.is_resolved() {
                let _ = tx.try_send(current);
            }
            observers.push(tx);
        }
        rx
    }

    /// Request provider sign-out. On success the provider emits an anonymous
    /// change notification which flows through the normal update path. On
    /// failure local state is left untouched (no optimistic clear).
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(e) = self.provider.sign_out().await {
            tracing::warn!("sign-out failed, keeping current session: {e}");
            return Err(e);
        }
        Ok(())
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.forward.abort();
    }
}

async fn forward_changes(
    provider: Arc<dyn IdentityProvider>,
    state: Arc<RwLock<SessionState>>,
    observers: Arc<Mutex<Vec<mpsc::Sender<SessionState>>>>,
) {
    // Subscribe before the initial fetch so a change racing the fetch is
    // still observed.
    let mut changes = provider.subscribe();

    let initial = match provider.fetch_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("identity provider unreachable, degrading to anonymous: {e}");
            Session::anonymous()
        }
    };
    apply(&state, &observers, SessionState::Resolved(initial));

    while let Some(session) = changes.recv().await {
        apply(&state, &observers, SessionState::Resolved(session));
    }
}

fn apply(
    state: &RwLock<SessionState>,
    observers: &Mutex<Vec<mpsc::Sender<SessionState>>>,
    next: SessionState,
) {
    if let Ok(mut guard) = state.write() {
        *guard = next.clone();
    }
    if let Ok(mut observers) = observers.lock() {
        observers.retain(|tx| !tx.is_closed());
        for tx in observers.iter() {
            let _ = tx.try_send(next.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use async_trait::async_trait;
    use folio_schema::Identity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{timeout, Duration};
    use uuid::Uuid;

    use super::*;

    struct FakeProvider {
        session: Session,
        unreachable: bool,
        sign_out_fails: bool,
        fetches: AtomicUsize,
        subscriptions: AtomicUsize,
        subscribers: Mutex<Vec<mpsc::Sender<Session>>>,
    }

    impl FakeProvider {
        fn resolved(session: Session) -> Self {
            Self {
                session,
                unreachable: false,
                sign_out_fails: false,
                fetches: AtomicUsize::new(0),
                subscriptions: AtomicUsize::new(0),
                subscribers: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            let mut provider = Self::resolved(Session::anonymous());
            provider.unreachable = true;
            provider
        }

        fn emit(&self, session: Session) {
            let subs = self.subscribers.lock().unwrap();
            for tx in subs.iter() {
                let _ = tx.try_send(session.clone());
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn fetch_session(&self) -> Result<Session> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                return Err(anyhow!("connection refused"));
            }
            Ok(self.session.clone())
        }

        fn subscribe(&self) -> mpsc::Receiver<Session> {
            self.subscriptions.fetch_add(1, Ordering::SeqCst);
            let (tx, rx) = mpsc::channel(8);
            self.subscribers.lock().unwrap().push(tx);
            rx
        }

        async fn sign_out(&self) -> Result<()> {
            if self.sign_out_fails {
                return Err(anyhow!("network error"));
            }
            self.emit(Session::anonymous());
            Ok(())
        }
    }

    fn signed_in() -> Session {
        Session {
            identity: Some(Identity {
                id: Uuid::new_v4(),
                email: Some("owner@example.com".into()),
            }),
        }
    }

    async fn wait_resolved(resolver: &SessionResolver) -> SessionState {
        let mut rx = resolver.subscribe();
        if resolver.current().is_resolved() {
            return resolver.current();
        }
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("resolution timed out")
            .expect("observer channel closed")
    }

    #[tokio::test]
    async fn starts_unresolved_then_resolves_once() {
        let provider = Arc::new(FakeProvider::resolved(signed_in()));
        let resolver = SessionResolver::activate(provider.clone());

        let state = wait_resolved(&resolver).await;
        assert!(state.is_resolved());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(provider.subscriptions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreachable_provider_degrades_to_anonymous() {
        let provider = Arc::new(FakeProvider::unreachable());
        let resolver = SessionResolver::activate(provider);

        let state = wait_resolved(&resolver).await;
        assert_eq!(state, SessionState::Resolved(Session::anonymous()));
    }

    #[tokio::test]
    async fn change_notification_updates_state_and_observers() {
        let provider = Arc::new(FakeProvider::resolved(signed_in()));
        let resolver = SessionResolver::activate(provider.clone());
        wait_resolved(&resolver).await;

        let mut rx = resolver.subscribe();
        // The subscription replays the current signed-in state first.
        let replay = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replay, resolver.current());

        provider.emit(Session::anonymous());

        let next = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next, SessionState::Resolved(Session::anonymous()));
        assert_eq!(resolver.current(), SessionState::Resolved(Session::anonymous()));
    }

    #[tokio::test]
    async fn failed_sign_out_leaves_session_unchanged() {
        let mut fake = FakeProvider::resolved(signed_in());
        fake.sign_out_fails = true;
        let provider = Arc::new(fake);
        let resolver = SessionResolver::activate(provider);
        let before = wait_resolved(&resolver).await;

        assert!(resolver.sign_out().await.is_err());
        assert_eq!(resolver.current(), before);
    }

    #[tokio::test]
    async fn successful_sign_out_flows_through_change_stream() {
        let provider = Arc::new(FakeProvider::resolved(signed_in()));
        let resolver = SessionResolver::activate(provider);
        wait_resolved(&resolver).await;

        let mut rx = resolver.subscribe();
        let replay = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replay, resolver.current());

        resolver.sign_out().await.unwrap();

        let next = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next, SessionState::Resolved(Session::anonymous()));
    }

    #[tokio::test]
    async fn subscriber_arriving_after_resolution_observes_current_state() {
        let provider = Arc::new(FakeProvider::resolved(signed_in()));
        let resolver = SessionResolver::activate(provider);
        wait_resolved(&resolver).await;
        assert!(resolver.current().is_resolved());

        // A fresh subscription must not depend on having been registered
        // before the initial fetch settled.
        let mut late = resolver.subscribe();
        let state = timeout(Duration::from_secs(1), late.recv())
            .await
            .expect("late subscriber saw nothing")
            .expect("observer channel closed");
        assert_eq!(state, resolver.current());
    }

    #[tokio::test]
    async fn drop_aborts_forwarding() {
        let provider = Arc::new(FakeProvider::resolved(signed_in()));
        let resolver = SessionResolver::activate(provider.clone());
        wait_resolved(&resolver).await;

        drop(resolver);

        // The provider-side channel closes once the forward task is gone.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        loop {
            let closed = provider
                .subscribers
                .lock()
                .unwrap()
                .iter()
                .all(|tx| tx.is_closed());
            if closed {
                break;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "forward task not torn down"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

use claimscout::accounts::{
    RepositoryError, SubscriptionTier, UserRecord, UserRepository,
};
use claimscout::matching::MatchResult;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mutex-backed user store for the single-process deployment.
#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<u32, UserRecord>>>,
    matches: Arc<Mutex<HashMap<u32, Vec<MatchResult>>>>,
}

impl InMemoryUserRepository {
    /// Repository pre-loaded with the showcase account.
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        let demo = UserRecord::demo();
        repository
            .users
            .lock()
            .expect("user mutex poisoned")
            .insert(demo.id, demo);
        repository
    }
}

impl UserRepository for InMemoryUserRepository {
    fn fetch(&self, id: u32) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn update_tier(&self, id: u32, tier: SubscriptionTier) -> Result<UserRecord, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        match guard.get_mut(&id) {
            Some(user) => {
                user.subscription_tier = tier;
                Ok(user.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn record_matches(&self, id: u32, matches: Vec<MatchResult>) -> Result<(), RepositoryError> {
        let mut guard = self.matches.lock().expect("match mutex poisoned");
        guard.insert(id, matches);
        Ok(())
    }

    fn fetch_matches(&self, id: u32) -> Result<Vec<MatchResult>, RepositoryError> {
        let guard = self.matches.lock().expect("match mutex poisoned");
        Ok(guard.get(&id).cloned().unwrap_or_default())
    }
}

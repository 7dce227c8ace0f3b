//! Query state sitting between the accessor and the views.
//!
//! The state is advanced synchronously. Anything that needs the accessor is
//! returned as an [`Effect`] for the runtime to perform; the outcome comes
//! back through [`ProductQuery::on_fetched`] or [`ProductQuery::on_deleted`].

use super::{Collection, ProductId, Snapshot};
use crate::error::AccessorError;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_FETCH_RETRIES: u32 = 3;

/// Work the runtime must perform against the accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Fetch { attempt: u32 },
    Delete(ProductId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct ProductQuery {
    snapshot: Option<Arc<Snapshot>>,
    state: LoadState,
    revision: u64,
    fetching: bool,
    // invalidated while a fetch was already running
    stale: bool,
    deleting: BTreeSet<ProductId>,
    max_retries: u32,
    notice: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_RETRIES)
    }
}

/// Backoff before retry `attempt` (1-based): 1s, 2s, 4s... capped at 30s.
pub fn retry_delay(attempt: u32) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }
    let secs = 1u64 << (attempt - 1).min(5);
    Duration::from_secs(secs.min(30))
}

impl ProductQuery {
    pub fn new(max_retries: u32) -> Self {
        ProductQuery {
            snapshot: None,
            state: LoadState::Loading,
            revision: 0,
            fetching: false,
            stale: false,
            deleting: BTreeSet::new(),
            max_retries,
            notice: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    pub fn is_deleting(&self, id: ProductId) -> bool {
        self.deleting.contains(&id)
    }

    pub fn pending_deletes(&self) -> usize {
        self.deleting.len()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Start a fetch unless one is already running, in which case the
    /// running one is followed by another.
    pub fn begin_fetch(&mut self) -> Option<Effect> {
        if self.fetching {
            self.stale = true;
            return None;
        }
        self.fetching = true;
        if self.snapshot.is_none() {
            self.state = LoadState::Loading;
        }
        Some(Effect::Fetch { attempt: 0 })
    }

    pub fn on_fetched(
        &mut self,
        attempt: u32,
        result: Result<Collection, AccessorError>,
    ) -> Option<Effect> {
        match result {
            Ok(collection) => {
                self.revision += 1;
                info!(
                    revision = self.revision,
                    products = collection.content.len(),
                    "product list fetched"
                );
                self.snapshot = Some(Arc::new(Snapshot {
                    revision: self.revision,
                    collection,
                }));
                self.state = LoadState::Ready;
                self.fetching = false;
                if self.stale {
                    self.stale = false;
                    return self.begin_fetch();
                }
                None
            }
            Err(e) if attempt < self.max_retries => {
                warn!(attempt, error = %e, "product fetch failed, retrying");
                Some(Effect::Fetch {
                    attempt: attempt + 1,
                })
            }
            Err(e) => {
                warn!(attempt, error = %e, "product fetch failed, giving up");
                self.fetching = false;
                // a fetch asked for while this one ran still has to happen
                if self.stale {
                    self.stale = false;
                    return self.begin_fetch();
                }
                if self.snapshot.is_some() {
                    // keep showing the last good snapshot
                    self.notice = Some(e.to_string());
                } else {
                    self.state = LoadState::Failed(e.to_string());
                }
                None
            }
        }
    }

    /// Ask for `id` to be deleted. A second request for the same id while the
    /// first is still running is dropped.
    pub fn request_delete(&mut self, id: ProductId) -> Option<Effect> {
        if !self.deleting.insert(id) {
            debug!(id, "delete already in flight");
            return None;
        }
        info!(id, "delete requested");
        Some(Effect::Delete(id))
    }

    pub fn request_bulk_delete<I>(&mut self, ids: I) -> Vec<Effect>
    where
        I: IntoIterator<Item = ProductId>,
    {
        ids.into_iter()
            .filter_map(|id| self.request_delete(id))
            .collect()
    }

    pub fn on_deleted(
        &mut self,
        id: ProductId,
        result: Result<(), AccessorError>,
    ) -> Option<Effect> {
        self.deleting.remove(&id);
        match result {
            Ok(()) => {
                info!(id, "delete confirmed, invalidating list");
                self.begin_fetch()
            }
            Err(AccessorError::NotFound(_)) => {
                warn!(id, "product already gone, invalidating list");
                self.begin_fetch()
            }
            Err(e) => {
                warn!(id, error = %e, "delete failed");
                self.notice = Some(e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_collection;

    fn ready() -> ProductQuery {
        let mut q = ProductQuery::default();
        let eff = q.begin_fetch();
        assert_eq!(eff, Some(Effect::Fetch { attempt: 0 }));
        assert!(q.on_fetched(0, Ok(seed_collection())).is_none());
        q
    }

    #[test]
    fn starts_loading_and_becomes_ready() {
        let mut q = ProductQuery::default();
        assert!(q.is_loading());
        q.begin_fetch();
        q.on_fetched(0, Ok(seed_collection()));
        assert_eq!(q.state(), &LoadState::Ready);
        assert_eq!(q.snapshot().map(|s| s.revision), Some(1));
    }

    #[test]
    fn every_successful_fetch_bumps_revision() {
        let mut q = ready();
        q.begin_fetch();
        q.on_fetched(0, Ok(seed_collection()));
        let snap = q.snapshot().unwrap();
        assert_eq!(snap.revision, 2);
        assert_eq!(snap.len(), 12);
    }

    #[test]
    fn fetch_retries_then_fails_with_distinct_state() {
        let mut q = ProductQuery::new(2);
        q.begin_fetch();
        let err = || Err(AccessorError::Unavailable("down".into()));
        assert_eq!(q.on_fetched(0, err()), Some(Effect::Fetch { attempt: 1 }));
        assert!(q.is_loading());
        assert_eq!(q.on_fetched(1, err()), Some(Effect::Fetch { attempt: 2 }));
        assert_eq!(q.on_fetched(2, err()), None);
        assert_eq!(
            q.state(),
            &LoadState::Failed("product service unavailable: down".into())
        );
        assert!(!q.is_fetching());
    }

    #[test]
    fn failed_refetch_keeps_previous_snapshot() {
        let mut q = ProductQuery::new(0);
        q.begin_fetch();
        q.on_fetched(0, Ok(seed_collection()));
        q.begin_fetch();
        q.on_fetched(0, Err(AccessorError::Unavailable("down".into())));
        assert_eq!(q.state(), &LoadState::Ready);
        assert_eq!(q.snapshot().map(|s| s.revision), Some(1));
        assert!(q.notice().is_some());
    }

    #[test]
    fn concurrent_fetch_requests_coalesce_into_one_follow_up() {
        let mut q = ProductQuery::default();
        assert!(q.begin_fetch().is_some());
        assert!(q.begin_fetch().is_none());
        assert!(q.begin_fetch().is_none());
        let follow = q.on_fetched(0, Ok(seed_collection()));
        assert_eq!(follow, Some(Effect::Fetch { attempt: 0 }));
        assert!(q.on_fetched(0, Ok(seed_collection())).is_none());
    }

    #[test]
    fn delete_is_issued_once_while_in_flight() {
        let mut q = ready();
        assert_eq!(q.request_delete(5), Some(Effect::Delete(5)));
        assert_eq!(q.request_delete(5), None);
        assert!(q.is_deleting(5));
        // no local mutation until fresh data arrives
        assert!(q.snapshot().unwrap().contains(5));
    }

    #[test]
    fn confirmed_delete_invalidates_and_refetches() {
        let mut q = ready();
        q.request_delete(5);
        let eff = q.on_deleted(5, Ok(()));
        assert_eq!(eff, Some(Effect::Fetch { attempt: 0 }));
        assert!(!q.is_deleting(5));
        assert!(q.snapshot().unwrap().contains(5));
    }

    #[test]
    fn failed_delete_sets_notice_and_does_not_refetch() {
        let mut q = ready();
        q.request_delete(5);
        let eff = q.on_deleted(5, Err(AccessorError::Unavailable("busy".into())));
        assert!(eff.is_none());
        assert_eq!(q.notice(), Some("product service unavailable: busy"));
        q.clear_notice();
        assert!(q.notice().is_none());
    }

    #[test]
    fn bulk_delete_skips_ids_already_in_flight() {
        let mut q = ready();
        q.request_delete(2);
        let effects = q.request_bulk_delete([1, 2, 3]);
        assert_eq!(effects, vec![Effect::Delete(1), Effect::Delete(3)]);
        assert_eq!(q.pending_deletes(), 3);
    }

    #[test]
    fn delete_during_fetch_refetches_even_if_that_fetch_fails() {
        let mut q = ProductQuery::new(0);
        q.begin_fetch();
        q.on_fetched(0, Ok(seed_collection()));
        assert_eq!(q.begin_fetch(), Some(Effect::Fetch { attempt: 0 }));
        q.request_delete(5);
        // the list is already being fetched, so the invalidation waits
        assert_eq!(q.on_deleted(5, Ok(())), None);
        let eff = q.on_fetched(0, Err(AccessorError::Unavailable("down".into())));
        assert_eq!(eff, Some(Effect::Fetch { attempt: 0 }));
        assert!(q.is_fetching());
        assert_eq!(q.state(), &LoadState::Ready);
        // the follow-up fetch succeeds and settles
        assert!(q.on_fetched(0, Ok(seed_collection())).is_none());
        assert!(!q.is_fetching());
        assert_eq!(q.snapshot().map(|s| s.revision), Some(2));
    }

    #[test]
    fn failed_first_load_with_pending_refetch_tries_again() {
        let mut q = ProductQuery::new(0);
        q.begin_fetch();
        assert_eq!(q.begin_fetch(), None);
        let eff = q.on_fetched(0, Err(AccessorError::Unavailable("down".into())));
        assert_eq!(eff, Some(Effect::Fetch { attempt: 0 }));
        assert!(q.is_loading());
    }

    #[test]
    fn retry_delay_grows_and_caps() {
        assert_eq!(retry_delay(0), Duration::ZERO);
        assert_eq!(retry_delay(1), Duration::from_secs(1));
        assert_eq!(retry_delay(3), Duration::from_secs(4));
        assert_eq!(retry_delay(40), Duration::from_secs(30));
    }
}

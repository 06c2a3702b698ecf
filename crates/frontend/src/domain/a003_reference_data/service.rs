use crate::shared::api_utils::get_json;
use contracts::domain::common::{parse_reference_list, ReferenceEntity, ReferenceKind};
use leptos::prelude::*;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;

/// Lookup lists are small; one page holds all active rows.
const LOOKUP_PAGE_SIZE: usize = 1000;

pub type LookupKey = (ReferenceKind, Option<i64>);

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Loading,
    Ready(Vec<ReferenceEntity>),
    Failed(String),
}

/// Query string for one lookup list.
pub fn lookup_query(kind: ReferenceKind, parent: Option<i64>) -> String {
    let mut query = format!("page=1&per_page={}&status=active", LOOKUP_PAGE_SIZE);
    if let (Some(param), Some(id)) = (kind.parent_param(), parent) {
        query.push_str(&format!("&{}={}", param, id));
    }
    query
}

/// Kinds keyed by a parent cannot be listed until the parent is chosen.
pub fn is_fetchable(kind: ReferenceKind, parent: Option<i64>) -> bool {
    kind.parent_param().is_none() || parent.is_some()
}

/// Read-through cache with one entry per `(kind, parent id)`.
///
/// The first reader starts the fetch; later readers see `Loading` and wait on
/// the same entry. Nothing is ever written back to the backend.
#[derive(Clone, Copy)]
pub struct ReferenceDataService {
    cache: RwSignal<HashMap<LookupKey, LookupState>>,
}

impl ReferenceDataService {
    pub fn new() -> Self {
        Self {
            cache: RwSignal::new(HashMap::new()),
        }
    }

    /// Start a fetch unless the entry exists. A failed entry stays failed so
    /// effects that re-run on cache changes do not refetch in a loop.
    pub fn ensure(&self, kind: ReferenceKind, parent: Option<i64>) {
        if !is_fetchable(kind, parent) {
            return;
        }
        let key = (kind, parent);
        let needs_fetch = self.cache.with_untracked(|c| !c.contains_key(&key));
        if !needs_fetch {
            return;
        }
        self.cache.update(|c| {
            c.insert(key, LookupState::Loading);
        });

        let cache = self.cache;
        spawn_local(async move {
            let query = lookup_query(kind, parent);
            let state = match get_json(kind.endpoint(), Some(&query)).await {
                Ok(body) => {
                    let entries = parse_reference_list(&body);
                    log::debug!(
                        "{} lookup loaded: {} entries (parent {:?})",
                        kind.label(),
                        entries.len(),
                        parent
                    );
                    LookupState::Ready(entries)
                }
                Err(e) => {
                    log::warn!("{} lookup failed: {}", kind.label(), e);
                    LookupState::Failed(e.to_string())
                }
            };
            cache.update(|c| {
                c.insert(key, state);
            });
        });
    }

    /// Tracked read of one entry.
    pub fn state(&self, kind: ReferenceKind, parent: Option<i64>) -> Option<LookupState> {
        self.cache.with(|c| c.get(&(kind, parent)).cloned())
    }

    /// Tracked read; `None` until the list has arrived.
    pub fn ready(&self, kind: ReferenceKind, parent: Option<i64>) -> Option<Vec<ReferenceEntity>> {
        match self.state(kind, parent) {
            Some(LookupState::Ready(entries)) => Some(entries),
            _ => None,
        }
    }

    pub fn is_loading(&self, kind: ReferenceKind, parent: Option<i64>) -> bool {
        matches!(self.state(kind, parent), Some(LookupState::Loading))
    }
}

impl Default for ReferenceDataService {
    fn default() -> Self {
        Self::new()
    }
}

/// Context accessor.
pub fn use_reference_data() -> ReferenceDataService {
    use_context::<ReferenceDataService>().expect("ReferenceDataService not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_query() {
        assert_eq!(
            lookup_query(ReferenceKind::Bank, None),
            "page=1&per_page=1000&status=active"
        );
        assert_eq!(
            lookup_query(ReferenceKind::Municipality, Some(14)),
            "page=1&per_page=1000&status=active&province_id=14"
        );
        // Parent ids are ignored for kinds outside the address chain
        assert_eq!(
            lookup_query(ReferenceKind::Schedule, Some(3)),
            "page=1&per_page=1000&status=active"
        );
    }

    #[test]
    fn test_child_lists_wait_for_parent() {
        assert!(!is_fetchable(ReferenceKind::Province, None));
        assert!(is_fetchable(ReferenceKind::Province, Some(1)));
        assert!(is_fetchable(ReferenceKind::Region, None));
    }
}

//! Bounded translation history
//!
//! Records live newest-first in a deque guarded by one mutex together with
//! the id counter. The server runs on tokio's multi-threaded runtime, so
//! every mutation takes the lock; it is never held across an `.await`.

use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::shared::types::{NewTranslation, TranslationRecord};

struct HistoryInner {
    records: VecDeque<TranslationRecord>,
    next_id: u64,
}

pub struct HistoryStore {
    inner: Mutex<HistoryInner>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                records: VecDeque::with_capacity(capacity.min(1024)),
                next_id: 1,
            }),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("[History] mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Insert a record, evicting the oldest ones past capacity.
    pub fn append(&self, entry: NewTranslation) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        inner.records.push_front(TranslationRecord {
            id,
            source_text: entry.source_text,
            translated_text: entry.translated_text,
            source_language: entry.source_language,
            target_language: entry.target_language,
            detected_language: entry.detected_language,
            user_id: entry.user_id,
            created_at: Utc::now(),
        });

        while inner.records.len() > self.capacity {
            if let Some(evicted) = inner.records.pop_back() {
                tracing::debug!("[History] evicted record {}", evicted.id);
            }
        }

        id
    }

    /// Up to `limit` most recent records, newest first.
    pub fn list(&self, limit: usize) -> Vec<TranslationRecord> {
        self.lock().records.iter().take(limit).cloned().collect()
    }

    pub fn list_for_owner(&self, user_id: u64, limit: usize) -> Vec<TranslationRecord> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.user_id == Some(user_id))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Drop every record. Ids keep counting from where they were.
    pub fn clear(&self) {
        let mut inner = self.lock();
        let removed = inner.records.len();
        inner.records.clear();
        tracing::info!("[History] cleared {} records", removed);
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(text: &str) -> NewTranslation {
        NewTranslation {
            source_text: text.to_string(),
            translated_text: format!("{} (es)", text),
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            detected_language: None,
            user_id: None,
        }
    }

    #[test]
    fn test_append_and_list_newest_first() {
        let history = HistoryStore::new(10);
        let first = history.append(entry("First"));
        let second = history.append(entry("Second"));

        assert!(second > first);
        let items = history.list(10);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source_text, "Second");
        assert_eq!(items[1].source_text, "First");
    }

    #[test]
    fn test_list_respects_limit() {
        let history = HistoryStore::new(10);
        for i in 0..6 {
            history.append(entry(&format!("Item {}", i)));
        }

        let items = history.list(3);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].source_text, "Item 5");
        assert_eq!(items[2].source_text, "Item 3");
        assert!(history.list(0).is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = HistoryStore::new(5);
        for i in 0..10 {
            history.append(entry(&format!("Item {}", i)));
        }

        let items = history.list(100);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].source_text, "Item 9");
        assert_eq!(items[4].source_text, "Item 5");
        assert_eq!(items[0].id, 10);
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let history = HistoryStore::new(5);
        history.append(entry("Item 1"));
        history.append(entry("Item 2"));
        assert_eq!(history.len(), 2);

        history.clear();
        assert!(history.is_empty());
        assert!(history.list(10).is_empty());

        let id = history.append(entry("Item 3"));
        assert_eq!(id, 3);
    }

    #[test]
    fn test_list_for_owner() {
        let history = HistoryStore::new(10);
        let mut mine = entry("Mine");
        mine.user_id = Some(7);
        history.append(mine);
        history.append(entry("Anonymous"));

        let items = history.list_for_owner(7, 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source_text, "Mine");
        assert!(history.list_for_owner(8, 10).is_empty());
    }

    #[test]
    fn test_concurrent_appends_assign_unique_ids() {
        let history = Arc::new(HistoryStore::new(1000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let history = Arc::clone(&history);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| history.append(entry(&format!("{}-{}", t, i))))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(history.len(), 400);
    }
}

//! Saved phrases
//!
//! User-curated and unbounded; entries leave only through `remove`.

use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::shared::types::{NewSavedPhrase, SavedPhrase};

struct PhrasesInner {
    // Insertion order, oldest first.
    phrases: Vec<SavedPhrase>,
    next_id: u64,
}

pub struct SavedPhraseStore {
    inner: Mutex<PhrasesInner>,
}

impl SavedPhraseStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PhrasesInner {
                phrases: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PhrasesInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("[SavedPhrases] mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn add(&self, phrase: NewSavedPhrase) -> SavedPhrase {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;

        let saved = SavedPhrase {
            id,
            source_text: phrase.source_text,
            translated_text: phrase.translated_text,
            source_language: phrase.source_language,
            target_language: phrase.target_language,
            user_id: phrase.user_id,
            created_at: Utc::now(),
        };
        inner.phrases.push(saved.clone());
        saved
    }

    /// All phrases, newest first.
    pub fn list(&self) -> Vec<SavedPhrase> {
        self.lock().phrases.iter().rev().cloned().collect()
    }

    pub fn list_for_owner(&self, user_id: u64) -> Vec<SavedPhrase> {
        self.lock()
            .phrases
            .iter()
            .rev()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect()
    }

    /// Returns false when no phrase had that id.
    pub fn remove(&self, id: u64) -> bool {
        let mut inner = self.lock();
        match inner.phrases.iter().position(|p| p.id == id) {
            Some(index) => {
                inner.phrases.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SavedPhraseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: &str) -> NewSavedPhrase {
        NewSavedPhrase {
            source_text: text.to_string(),
            translated_text: format!("{}!", text),
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_add_and_list_newest_first() {
        let store = SavedPhraseStore::new();
        let a = store.add(phrase("Good morning"));
        let b = store.add(phrase("Thank you"));

        assert!(b.id > a.id);
        let items = store.list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source_text, "Thank you");
        assert_eq!(items[1].source_text, "Good morning");
    }

    #[test]
    fn test_remove() {
        let store = SavedPhraseStore::new();
        let a = store.add(phrase("Keep"));
        let b = store.add(phrase("Drop"));

        assert!(store.remove(b.id));
        assert!(!store.remove(b.id));
        assert!(!store.remove(999));

        let items = store.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, a.id);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let store = SavedPhraseStore::new();
        let a = store.add(phrase("One"));
        store.remove(a.id);
        let b = store.add(phrase("Two"));
        assert!(b.id > a.id);
    }

    #[test]
    fn test_unbounded() {
        let store = SavedPhraseStore::new();
        for i in 0..500 {
            store.add(phrase(&format!("Phrase {}", i)));
        }
        assert_eq!(store.len(), 500);
    }

    #[test]
    fn test_list_for_owner() {
        let store = SavedPhraseStore::new();
        let mut owned = phrase("Owned");
        owned.user_id = Some(1);
        store.add(owned);
        store.add(phrase("Shared"));

        let items = store.list_for_owner(1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source_text, "Owned");
        assert_eq!(store.list().len(), 2);
    }
}

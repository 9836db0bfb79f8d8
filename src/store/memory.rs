use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{CanonicalKey, FormUpdate, InsertOutcome, StoredForm};
use crate::store::traits::{ConditionalStore, FormStore};

/// Process-local form store for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    forms: RwLock<HashMap<CanonicalKey, StoredForm>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.read().is_empty()
    }
}

#[async_trait::async_trait]
impl FormStore for InMemoryStore {
    async fn find_one(&self, key: &CanonicalKey) -> Result<Option<StoredForm>> {
        Ok(self.forms.read().get(key).cloned())
    }

    async fn insert(&self, form: StoredForm) -> Result<InsertOutcome> {
        let mut forms = self.forms.write();
        if forms.contains_key(&form.key) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        forms.insert(form.key.clone(), form);
        Ok(InsertOutcome::Inserted)
    }
}

#[async_trait::async_trait]
impl ConditionalStore for InMemoryStore {
    async fn apply_if_exists(&self, key: &CanonicalKey, values: FormUpdate) -> Result<bool> {
        let mut forms = self.forms.write();
        let Some(form) = forms.get_mut(key) else {
            return Ok(false);
        };
        form.data = values.data;
        form.last_modified_on = Some(values.last_modified_on);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FormIdentity;

    fn stored(identity: &FormIdentity, data: &str) -> StoredForm {
        StoredForm {
            key: CanonicalKey::for_storage(identity),
            data: data.to_string(),
            created_on: Some(chrono::Utc::now()),
            last_modified_on: None,
        }
    }

    #[tokio::test]
    async fn test_insert_refuses_duplicate_key() {
        let store = InMemoryStore::new();
        let identity = FormIdentity::new("lesson", "list").with_subtype("all");

        assert_eq!(
            store.insert(stored(&identity, "{\"v\":1}")).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert(stored(&identity, "{\"v\":2}")).await.unwrap(),
            InsertOutcome::AlreadyExists
        );

        let key = CanonicalKey::for_storage(&identity);
        let found = store.find_one(&key).await.unwrap().unwrap();
        assert_eq!(found.data, "{\"v\":1}");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_apply_if_exists_only_touches_existing_rows() {
        let store = InMemoryStore::new();
        let identity = FormIdentity::new("lesson", "list");
        let key = CanonicalKey::for_storage(&identity);
        let update = FormUpdate {
            data: "{\"v\":2}".to_string(),
            last_modified_on: chrono::Utc::now(),
        };

        assert!(!store.apply_if_exists(&key, update.clone()).await.unwrap());
        assert!(store.is_empty());

        store.insert(stored(&identity, "{\"v\":1}")).await.unwrap();
        assert!(store.apply_if_exists(&key, update.clone()).await.unwrap());

        let found = store.find_one(&key).await.unwrap().unwrap();
        assert_eq!(found.data, "{\"v\":2}");
        assert_eq!(found.last_modified_on, Some(update.last_modified_on));
        assert!(found.created_on.is_some());
    }
}

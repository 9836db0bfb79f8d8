use crate::model::{CanonicalKey, FormUpdate, InsertOutcome, StoredForm};
use anyhow::Result;

#[async_trait::async_trait]
pub trait FormStore: Send + Sync {
    /// Look up the form stored under exactly this key.
    async fn find_one(&self, key: &CanonicalKey) -> Result<Option<StoredForm>>;
    /// Insert a new form. Must never overwrite an existing row with the same key.
    async fn insert(&self, form: StoredForm) -> Result<InsertOutcome>;
}

/// Write capability that only succeeds when a row already exists under the key.
#[async_trait::async_trait]
pub trait ConditionalStore: Send + Sync {
    /// Apply `values` atomically if a row exists at `key`. Returns whether it was applied.
    async fn apply_if_exists(&self, key: &CanonicalKey, values: FormUpdate) -> Result<bool>;
}

pub trait Store: FormStore + ConditionalStore + Send + Sync {}
impl<T: FormStore + ConditionalStore + Send + Sync> Store for T {}

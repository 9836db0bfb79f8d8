use anyhow::Result;
use itertools::Itertools;

use crate::model::{CanonicalKey, ResolutionQuery, ResolvedForm, WILDCARD};
use crate::store::traits::FormStore;

pub struct Resolver;

impl Resolver {
    /// Keys to try for `query`, most specific first.
    ///
    /// The requested scope comes first, then the organisation default, then
    /// the global default. Subtype and component are never relaxed, and
    /// repeated candidates are dropped so a lookup is never issued twice.
    pub fn candidate_keys(query: &ResolutionQuery) -> Vec<CanonicalKey> {
        let root_org = query.root_org.as_deref().unwrap_or(WILDCARD);
        let framework = query.framework.as_deref().unwrap_or(WILDCARD);

        [
            query.scoped(root_org, framework),
            query.scoped(root_org, WILDCARD),
            query.scoped(WILDCARD, WILDCARD),
        ]
        .into_iter()
        .dedup()
        .collect()
    }

    /// Resolve `query` to the most specific stored form, or the empty form
    /// when nothing matches at any level. Only storage failures are errors.
    pub async fn resolve<S: FormStore + ?Sized>(
        store: &S,
        query: &ResolutionQuery,
    ) -> Result<ResolvedForm> {
        for key in Self::candidate_keys(query) {
            if let Some(stored) = store.find_one(&key).await? {
                log::debug!(
                    "resolved {} at rootOrg '{}' framework '{}'",
                    key.composite(),
                    key.root_org,
                    key.framework
                );
                return Ok(ResolvedForm::from_stored(stored));
            }
        }

        log::debug!(
            "no form found for {}.{}.{}.{}",
            query.form_type,
            query.subtype,
            query.action,
            query.component
        );
        Ok(ResolvedForm::empty())
    }
}

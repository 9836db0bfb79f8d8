use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FormError, FormResult};
use crate::model::{encode_payload, CanonicalKey, FormIdentity, FormUpdate, InsertOutcome, StoredForm};
use crate::store::traits::{ConditionalStore, FormStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    #[serde(rename = "rootOrgId")]
    pub root_org_id: String,
    pub key: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Updated {
    pub response: Vec<UpdateStatus>,
}

pub struct Mutator;

impl Mutator {
    /// Insert a new form. An existing form with the same canonical key is
    /// left untouched and reported as [`FormError::AlreadyExists`].
    pub async fn create<S: FormStore + ?Sized>(
        store: &S,
        identity: &FormIdentity,
        payload: &Map<String, Value>,
    ) -> FormResult<Created> {
        let key = CanonicalKey::for_storage(identity);
        let form = StoredForm {
            key: key.clone(),
            data: encode_payload(payload)?,
            created_on: Some(chrono::Utc::now()),
            last_modified_on: None,
        };

        match store.insert(form).await? {
            InsertOutcome::Inserted => {
                log::info!(
                    "created form {} for rootOrg '{}' framework '{}'",
                    key.composite(),
                    key.root_org,
                    key.framework
                );
                Ok(Created {
                    created: "OK".to_string(),
                })
            }
            InsertOutcome::AlreadyExists => Err(FormError::AlreadyExists {
                key: key.composite(),
                root_org: key.root_org,
                framework: key.framework,
            }),
        }
    }

    /// Replace the payload of an existing form. A missing form is a client
    /// error; the store's answer is final and is not retried.
    pub async fn update<S: ConditionalStore + ?Sized>(
        store: &S,
        identity: &FormIdentity,
        payload: &Map<String, Value>,
    ) -> FormResult<Updated> {
        let key = CanonicalKey::for_storage(identity);
        let values = FormUpdate {
            data: encode_payload(payload)?,
            last_modified_on: chrono::Utc::now(),
        };

        if !store.apply_if_exists(&key, values).await? {
            return Err(FormError::NotFound);
        }

        log::info!(
            "updated form {} for rootOrg '{}' framework '{}'",
            key.composite(),
            key.root_org,
            key.framework
        );
        Ok(Updated {
            response: vec![UpdateStatus {
                key: key.composite(),
                root_org_id: key.root_org,
                status: "SUCCESS".to_string(),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Resolver;
    use crate::model::ResolutionQuery;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn lesson() -> FormIdentity {
        FormIdentity::new("lesson", "list")
            .with_subtype("all")
            .with_root_org("org1")
            .with_framework("NCF")
    }

    async fn read(store: &InMemoryStore, identity: &FormIdentity) -> Option<Value> {
        Resolver::resolve(store, &ResolutionQuery::from_identity(identity))
            .await
            .unwrap()
            .data
    }

    #[tokio::test]
    async fn test_create_then_read_round_trips_payload() {
        let store = InMemoryStore::new();
        let data = json!({"x": 1, "fields": [{"code": "board", "templateOptions": {"options": []}}]});

        let created = Mutator::create(&store, &lesson(), &payload(data.clone()))
            .await
            .unwrap();
        assert_eq!(created.created, "OK");

        assert_eq!(read(&store, &lesson()).await, Some(data));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_key() {
        let store = InMemoryStore::new();
        Mutator::create(&store, &lesson(), &payload(json!({"v": 1})))
            .await
            .unwrap();

        let err = Mutator::create(&store, &lesson(), &payload(json!({"v": 2})))
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::AlreadyExists { .. }));
        assert!(err.is_client_error());
        assert_eq!(read(&store, &lesson()).await, Some(json!({"v": 1})));
    }

    #[tokio::test]
    async fn test_create_without_scope_stores_global_default() {
        let store = InMemoryStore::new();
        let identity = FormIdentity::new("lesson", "list");
        Mutator::create(&store, &identity, &payload(json!({"v": 1})))
            .await
            .unwrap();

        let key = CanonicalKey::for_storage(&identity);
        let stored = store.find_one(&key).await.unwrap().unwrap();
        assert!(stored.key.is_global_default());
        assert_eq!(stored.key.subtype, "*");
        assert_eq!(stored.key.component, "*");
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let store = InMemoryStore::new();

        let err = Mutator::update(&store, &lesson(), &payload(json!({"v": 2})))
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::NotFound));
        assert!(err.is_client_error());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_payload_and_acknowledges() {
        let store = InMemoryStore::new();
        Mutator::create(&store, &lesson(), &payload(json!({"v": 1})))
            .await
            .unwrap();

        let updated = Mutator::update(&store, &lesson(), &payload(json!({"v": 2})))
            .await
            .unwrap();

        assert_eq!(
            updated.response,
            vec![UpdateStatus {
                root_org_id: "org1".to_string(),
                key: "lesson.all.list.*".to_string(),
                status: "SUCCESS".to_string(),
            }]
        );
        assert_eq!(read(&store, &lesson()).await, Some(json!({"v": 2})));

        let stored = store
            .find_one(&CanonicalKey::for_storage(&lesson()))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.created_on.is_some());
        assert!(stored.last_modified_on.is_some());
    }

    #[tokio::test]
    async fn test_update_does_not_fall_back_to_defaults() {
        let store = InMemoryStore::new();
        let global = FormIdentity::new("lesson", "list").with_subtype("all");
        Mutator::create(&store, &global, &payload(json!({"v": 1})))
            .await
            .unwrap();

        let err = Mutator::update(&store, &lesson(), &payload(json!({"v": 2})))
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::NotFound));
        assert_eq!(store.len(), 1);
        assert_eq!(read(&store, &global).await, Some(json!({"v": 1})));
    }
}

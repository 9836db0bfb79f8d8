use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::common::{non_empty, or_wildcard, WILDCARD};

/// Identity fields of a form as they arrive on a request, before defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormIdentity {
    pub root_org: Option<String>,
    pub framework: Option<String>,
    pub form_type: String,
    pub subtype: Option<String>,
    pub action: String,
    pub component: Option<String>,
}

impl FormIdentity {
    pub fn new(form_type: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            form_type: form_type.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_root_org(mut self, root_org: impl Into<String>) -> Self {
        self.root_org = Some(root_org.into());
        self
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }
}

/// Fully defaulted six-field key. At most one stored form exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalKey {
    pub root_org: String,
    pub framework: String,
    pub form_type: String,
    pub subtype: String,
    pub action: String,
    pub component: String,
}

impl CanonicalKey {
    /// Key under which create and update persist a form.
    pub fn for_storage(identity: &FormIdentity) -> Self {
        Self {
            root_org: or_wildcard(identity.root_org.as_deref()),
            framework: or_wildcard(identity.framework.as_deref()),
            form_type: identity.form_type.clone(),
            subtype: or_wildcard(identity.subtype.as_deref()),
            action: identity.action.clone(),
            component: or_wildcard(identity.component.as_deref()),
        }
    }

    /// `type.subtype.action.component`
    pub fn composite(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.form_type, self.subtype, self.action, self.component
        )
    }

    pub fn is_global_default(&self) -> bool {
        self.root_org == WILDCARD && self.framework == WILDCARD
    }
}

/// Read-side key. Organisation and framework stay optional until the cascade
/// decides which scopes to try; subtype and component are already defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionQuery {
    pub root_org: Option<String>,
    pub framework: Option<String>,
    pub form_type: String,
    pub subtype: String,
    pub action: String,
    pub component: String,
}

impl ResolutionQuery {
    pub fn from_identity(identity: &FormIdentity) -> Self {
        Self {
            root_org: non_empty(identity.root_org.as_deref()).map(str::to_string),
            framework: non_empty(identity.framework.as_deref()).map(str::to_string),
            form_type: identity.form_type.clone(),
            subtype: or_wildcard(identity.subtype.as_deref()),
            action: identity.action.clone(),
            component: or_wildcard(identity.component.as_deref()),
        }
    }

    /// Key with the given scope and this query's exact type/subtype/action/component.
    pub fn scoped(&self, root_org: &str, framework: &str) -> CanonicalKey {
        CanonicalKey {
            root_org: root_org.to_string(),
            framework: framework.to_string(),
            form_type: self.form_type.clone(),
            subtype: self.subtype.clone(),
            action: self.action.clone(),
            component: self.component.clone(),
        }
    }
}

/// A form row as persisted. `data` holds the JSON-encoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredForm {
    pub key: CanonicalKey,
    pub data: String,
    pub created_on: Option<DateTime<Utc>>,
    pub last_modified_on: Option<DateTime<Utc>>,
}

/// Values written by a conditional update.
#[derive(Debug, Clone, PartialEq)]
pub struct FormUpdate {
    pub data: String,
    pub last_modified_on: DateTime<Utc>,
}

/// Outcome of an insert, decided atomically by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}

/// Outward view of a resolved form. The empty value serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedForm {
    #[serde(rename = "rootOrgId", skip_serializing_if = "Option::is_none")]
    pub root_org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_on: Option<DateTime<Utc>>,
}

impl ResolvedForm {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Builds the outward view from a stored row, decoding the payload.
    ///
    /// A payload that is not valid JSON is returned as a plain string value
    /// rather than failing the whole read.
    pub fn from_stored(stored: StoredForm) -> Self {
        let data = match serde_json::from_str::<Value>(&stored.data) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "stored payload for {} is not valid JSON ({}); returning it verbatim",
                    stored.key.composite(),
                    e
                );
                Value::String(stored.data)
            }
        };

        let key = stored.key;
        Self {
            root_org_id: Some(key.root_org),
            framework: Some(key.framework),
            form_type: Some(key.form_type),
            subtype: Some(key.subtype),
            action: Some(key.action),
            component: Some(key.component),
            data: Some(data),
            created_on: stored.created_on,
            last_modified_on: stored.last_modified_on,
        }
    }
}

/// Serializes a payload object into its stored string form.
pub fn encode_payload(payload: &Map<String, Value>) -> anyhow::Result<String> {
    Ok(serde_json::to_string(payload)?)
}

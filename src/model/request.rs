use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::form::FormIdentity;

/// Wire names of the request fields the service understands. Anything else in
/// the request object is dropped during validation.
pub const RECOGNIZED_FIELDS: [&str; 7] = [
    "type",
    "subType",
    "action",
    "rootOrgId",
    "framework",
    "data",
    "component",
];

/// Body of every form endpoint: `{"request": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub request: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormOperation {
    Create,
    Update,
    Read,
}

impl FormOperation {
    /// API identifier echoed in every response envelope.
    pub fn api_id(self) -> &'static str {
        match self {
            FormOperation::Create => "api.form.create",
            FormOperation::Update => "api.form.update",
            FormOperation::Read => "api.form.read",
        }
    }

    /// Machine-readable error code reported on any failure of this operation.
    pub fn error_code(self) -> &'static str {
        match self {
            FormOperation::Create => "ERR_CREATE_FORM_DATA",
            FormOperation::Update => "ERR_UPDATE_FORM_DATA",
            FormOperation::Read => "ERR_READ_FORM_DATA",
        }
    }

    pub fn requires_payload(self) -> bool {
        matches!(self, FormOperation::Create | FormOperation::Update)
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRequest {
    pub identity: FormIdentity,
    /// Present exactly when the operation carries a payload.
    pub data: Option<Map<String, Value>>,
}

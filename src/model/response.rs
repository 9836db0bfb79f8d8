use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::common::generate_id;
use crate::model::request::FormOperation;

pub const API_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Ok,
    ClientError,
    ServerError,
}

/// Error message(s): a list for schema violations, a single line otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseParams {
    pub resmsgid: String,
    pub msgid: String,
    pub status: String,
    pub err: Option<String>,
    pub errmsg: Option<ErrorMessage>,
}

/// Envelope shared by all form endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub id: String,
    pub ver: String,
    pub ts: String,
    pub params: ResponseParams,
    #[serde(rename = "responseCode")]
    pub response_code: ResponseCode,
    pub result: Value,
}

impl FormResponse {
    pub fn success(operation: FormOperation, msg_id: String, result: Value) -> Self {
        Self {
            id: operation.api_id().to_string(),
            ver: API_VERSION.to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            params: ResponseParams {
                resmsgid: generate_id(),
                msgid: msg_id,
                status: "successful".to_string(),
                err: None,
                errmsg: None,
            },
            response_code: ResponseCode::Ok,
            result,
        }
    }

    pub fn failure(
        operation: FormOperation,
        msg_id: String,
        response_code: ResponseCode,
        errmsg: ErrorMessage,
    ) -> Self {
        Self {
            id: operation.api_id().to_string(),
            ver: API_VERSION.to_string(),
            ts: chrono::Utc::now().to_rfc3339(),
            params: ResponseParams {
                resmsgid: generate_id(),
                msgid: msg_id,
                status: "failed".to_string(),
                err: Some(operation.error_code().to_string()),
                errmsg: Some(errmsg),
            },
            response_code,
            result: Value::Object(Default::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_shape() {
        let response = FormResponse::failure(
            FormOperation::Update,
            "msg-1".to_string(),
            ResponseCode::ClientError,
            ErrorMessage::Many(vec!["\"type\" is required".to_string()]),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "api.form.update");
        assert_eq!(json["ver"], "1.0");
        assert_eq!(json["responseCode"], "CLIENT_ERROR");
        assert_eq!(json["params"]["status"], "failed");
        assert_eq!(json["params"]["msgid"], "msg-1");
        assert_eq!(json["params"]["err"], "ERR_UPDATE_FORM_DATA");
        assert_eq!(json["params"]["errmsg"], json!(["\"type\" is required"]));
        assert_eq!(json["result"], json!({}));
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = FormResponse::success(
            FormOperation::Create,
            "msg-2".to_string(),
            json!({"created": "OK"}),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "api.form.create");
        assert_eq!(json["responseCode"], "OK");
        assert_eq!(json["params"]["status"], "successful");
        assert!(json["params"]["err"].is_null());
        assert_eq!(json["result"]["created"], "OK");
    }
}

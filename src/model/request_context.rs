use serde::{Deserialize, Serialize};

use crate::model::common::generate_id;

/// Caller metadata taken from request headers, used for telemetry and message ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub msg_id: Option<String>,
    pub channel_id: Option<String>,
    pub device_id: Option<String>,
    pub app_id: Option<String>,
}

impl RequestContext {
    pub fn with_msg_id(msg_id: impl Into<String>) -> Self {
        Self {
            msg_id: Some(msg_id.into()),
            ..Default::default()
        }
    }

    /// The caller's message id, or a fresh one when the caller sent none.
    pub fn msg_id_or_generate(&self) -> String {
        self.msg_id.clone().unwrap_or_else(generate_id)
    }
}

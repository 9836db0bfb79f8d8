//! Side-channel records of form API outcomes.
//!
//! Records go to the `telemetry` log target so they can be routed separately
//! from application logs. Nothing here influences a response.

use axum::http::StatusCode;

use crate::error::FormError;
use crate::model::{FormOperation, RequestContext};

pub const TARGET: &str = "telemetry";

pub fn log_success(operation: FormOperation, ctx: &RequestContext) {
    log::info!(
        target: TARGET,
        "api={} status={} msgid={} channel={} device={} app={}",
        operation.api_id(),
        StatusCode::OK.as_u16(),
        field(&ctx.msg_id),
        field(&ctx.channel_id),
        field(&ctx.device_id),
        field(&ctx.app_id),
    );
}

pub fn log_error(operation: FormOperation, ctx: &RequestContext, error: &FormError) {
    log::log!(
        target: TARGET,
        level_for(error),
        "api={} status={} err={} msgid={} channel={} device={} app={} reason=\"{:#}\"",
        operation.api_id(),
        error.status().as_u16(),
        operation.error_code(),
        field(&ctx.msg_id),
        field(&ctx.channel_id),
        field(&ctx.device_id),
        field(&ctx.app_id),
        error,
    );
}

/// Client mistakes are warnings; anything the service failed at is an error.
fn level_for(error: &FormError) -> log::Level {
    if error.is_client_error() {
        log::Level::Warn
    } else {
        log::Level::Error
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

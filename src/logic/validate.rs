use serde_json::{Map, Value};

use crate::error::{FormError, FormResult};
use crate::model::{FormIdentity, FormOperation, FormRequest, RECOGNIZED_FIELDS};

/// Checks a raw `request` object and turns it into a typed [`FormRequest`].
pub struct RequestValidator;

enum Presence {
    Required,
    Optional,
}

impl RequestValidator {
    /// Validate the `request` member of an envelope for `operation`.
    ///
    /// The framework/rootOrgId pairing is checked first and reported on its
    /// own; otherwise every schema violation is collected and reported
    /// together. Unrecognized fields are dropped.
    pub fn validate(request: Option<&Value>, operation: FormOperation) -> FormResult<FormRequest> {
        let fields = match request {
            None | Some(Value::Null) => {
                return Err(FormError::Validation(vec![r#""request" is required"#.to_string()]))
            }
            Some(Value::Object(fields)) => fields,
            Some(_) => {
                return Err(FormError::Validation(vec![
                    r#""request" must be an object"#.to_string(),
                ]))
            }
        };

        if is_supplied(fields.get("framework")) && !is_supplied(fields.get("rootOrgId")) {
            return Err(FormError::FrameworkWithoutRootOrg);
        }

        for name in fields.keys() {
            if !RECOGNIZED_FIELDS.contains(&name.as_str()) {
                log::debug!("{}: dropping unrecognized field '{}'", operation.api_id(), name);
            }
        }

        let mut violations = Vec::new();
        let form_type = string_field(fields, "type", Presence::Required, &mut violations);
        let subtype = string_field(fields, "subType", Presence::Required, &mut violations);
        let action = string_field(fields, "action", Presence::Required, &mut violations);
        let component = string_field(fields, "component", Presence::Optional, &mut violations);
        let root_org = string_field(fields, "rootOrgId", Presence::Optional, &mut violations);
        let framework = string_field(fields, "framework", Presence::Optional, &mut violations);
        let data = payload_field(fields, operation, &mut violations);

        if !violations.is_empty() {
            return Err(FormError::Validation(violations));
        }

        Ok(FormRequest {
            identity: FormIdentity {
                root_org,
                framework,
                form_type: form_type.unwrap_or_default(),
                subtype,
                action: action.unwrap_or_default(),
                component,
            },
            data,
        })
    }
}

fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn string_field(
    fields: &Map<String, Value>,
    name: &str,
    presence: Presence,
    violations: &mut Vec<String>,
) -> Option<String> {
    match fields.get(name) {
        None => {
            if let Presence::Required = presence {
                violations.push(format!(r#""{}" is required"#, name));
            }
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(format!(r#""{}" is not allowed to be empty"#, name));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(format!(r#""{}" must be a string"#, name));
            None
        }
    }
}

fn payload_field(
    fields: &Map<String, Value>,
    operation: FormOperation,
    violations: &mut Vec<String>,
) -> Option<Map<String, Value>> {
    let value = fields.get("data");
    if !operation.requires_payload() {
        if value.is_some() {
            violations.push(r#""data" is not allowed"#.to_string());
        }
        return None;
    }

    match value {
        None => {
            violations.push(r#""data" is required"#.to_string());
            None
        }
        Some(Value::Object(map)) => Some(map.clone()),
        Some(_) => {
            violations.push(r#""data" must be an object"#.to_string());
            None
        }
    }
}

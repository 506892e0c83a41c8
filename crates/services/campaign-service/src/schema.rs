//! JSON Schemas for campaign payloads, one per channel.

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use common::{AppError, AppResult};
use domain::{CampaignChannel, MAX_SMS_BODY_LENGTH};

static EMAIL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["name", "subject", "body_text"],
        "properties": {
            "name": {"type": "string", "minLength": 1, "maxLength": 255},
            "subject": {"type": "string", "minLength": 1, "maxLength": 255},
            "body_text": {"type": "string", "minLength": 1},
            "body_html": {"type": "string"},
            "from_name": {"type": "string", "maxLength": 255},
            "reply_to": {"type": "string", "format": "email"}
        },
        "additionalProperties": false
    })
});

static SMS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["name", "body_text"],
        "properties": {
            "name": {"type": "string", "minLength": 1, "maxLength": 255},
            "body_text": {"type": "string", "minLength": 1, "maxLength": MAX_SMS_BODY_LENGTH}
        },
        "additionalProperties": false
    })
});

static PUSH_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "required": ["name", "title", "body_text"],
        "properties": {
            "name": {"type": "string", "minLength": 1, "maxLength": 255},
            "title": {"type": "string", "minLength": 1, "maxLength": 255},
            "body_text": {"type": "string", "minLength": 1},
            "url": {"type": "string", "format": "uri"}
        },
        "additionalProperties": false
    })
});

type Compiled = Result<JSONSchema, String>;

fn compile(schema: &'static Value) -> Compiled {
    JSONSchema::compile(schema).map_err(|e| e.to_string())
}

static EMAIL_VALIDATOR: Lazy<Compiled> = Lazy::new(|| compile(&EMAIL_SCHEMA));
static SMS_VALIDATOR: Lazy<Compiled> = Lazy::new(|| compile(&SMS_SCHEMA));
static PUSH_VALIDATOR: Lazy<Compiled> = Lazy::new(|| compile(&PUSH_SCHEMA));

fn validator_for(channel: CampaignChannel) -> AppResult<&'static JSONSchema> {
    let compiled = match channel {
        CampaignChannel::Email => &*EMAIL_VALIDATOR,
        CampaignChannel::Sms => &*SMS_VALIDATOR,
        CampaignChannel::Push => &*PUSH_VALIDATOR,
    };
    compiled
        .as_ref()
        .map_err(|e| AppError::internal(format!("Invalid {} schema: {}", channel, e)))
}

/// Validate a channel payload, returning every failure in one message.
pub fn validate_content(channel: CampaignChannel, content: &Map<String, Value>) -> AppResult<()> {
    let compiled = validator_for(channel)?;

    let instance = Value::Object(content.clone());
    let result = compiled.validate(&instance);
    if let Err(errors) = result {
        let failures: Vec<String> = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect();
        return Err(AppError::validation(format!(
            "Invalid {} campaign: {}",
            channel,
            failures.join("; ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validators_compiled_once() {
        for channel in [
            CampaignChannel::Email,
            CampaignChannel::Sms,
            CampaignChannel::Push,
        ] {
            let first = validator_for(channel).unwrap();
            let second = validator_for(channel).unwrap();
            assert!(std::ptr::eq(first, second));
        }
    }

    #[test]
    fn test_email_payload() {
        let ok = object(json!({
            "name": "Spring hiring",
            "subject": "We are hiring",
            "body_text": "Come work with us",
            "reply_to": "jobs@example.com"
        }));
        assert!(validate_content(CampaignChannel::Email, &ok).is_ok());

        let missing = object(json!({"name": "Spring hiring", "body_text": "hi"}));
        let msg = message(validate_content(CampaignChannel::Email, &missing));
        assert!(msg.contains("subject"), "{}", msg);
    }

    #[test]
    fn test_sms_length_limit() {
        let at_limit = object(json!({"name": "n", "body_text": "x".repeat(MAX_SMS_BODY_LENGTH)}));
        assert!(validate_content(CampaignChannel::Sms, &at_limit).is_ok());

        let over = object(json!({"name": "n", "body_text": "x".repeat(MAX_SMS_BODY_LENGTH + 1)}));
        let msg = message(validate_content(CampaignChannel::Sms, &over));
        assert!(msg.starts_with("Invalid sms campaign: /body_text"), "{}", msg);
    }

    #[test]
    fn test_push_lists_every_failure() {
        let bad = object(json!({"name": "", "body_text": 5}));
        let msg = message(validate_content(CampaignChannel::Push, &bad));
        assert!(msg.contains("title"), "{}", msg);
        assert!(msg.contains("/name"), "{}", msg);
        assert!(msg.contains("/body_text"), "{}", msg);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let extra = object(json!({"name": "n", "body_text": "hi", "subject": "x"}));
        assert!(validate_content(CampaignChannel::Sms, &extra).is_err());
    }
}

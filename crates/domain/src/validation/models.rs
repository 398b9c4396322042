//! Model catalogue (`GET /api/models`) validation

use serde_json::{Map, Value};

use super::{FieldCheck, JsonKind, check_field};
use crate::settings::ValidatorOptions;

const REQUIRED_FIELDS: [(&str, JsonKind); 5] = [
    ("id", JsonKind::String),
    ("name", JsonKind::String),
    ("provider", JsonKind::String),
    ("contextWindow", JsonKind::Number),
    ("maxOutput", JsonKind::Number),
];

const CAPABILITY_FIELDS: [&str; 4] = [
    "supportsVision",
    "supportsTools",
    "supportsWebSearch",
    "supportsImageGeneration",
];

/// Validates a model catalogue response body.
///
/// Expected shape: `{"providers": {"<provider>": [<model>, ...], ...}}`.
/// Returns every violation found, ordered by provider, then model index,
/// then field. An empty list means the body conforms.
#[must_use]
pub fn validate_model_catalogue(body: &Value, options: ValidatorOptions) -> Vec<String> {
    let Value::Object(root) = body else {
        return vec!["Response is not a JSON object".to_string()];
    };
    let providers = match check_field(root, "providers", JsonKind::Object) {
        FieldCheck::Present(Value::Object(providers)) => providers,
        FieldCheck::Missing => return vec!["Missing 'providers' field".to_string()],
        _ => return vec!["'providers' field is not an object".to_string()],
    };

    let mut errors = Vec::new();
    if providers.is_empty() {
        errors.push("No providers found".to_string());
    }

    for (provider, models) in providers {
        let Value::Array(models) = models else {
            errors.push(format!("Provider '{provider}' models is not an array"));
            continue;
        };
        if models.is_empty() {
            errors.push(format!("Provider '{provider}' has no models"));
            continue;
        }
        for (index, model) in models.iter().enumerate() {
            let context = format!("Provider '{provider}' model[{index}]");
            match model {
                Value::Object(model) => {
                    validate_model(&context, provider, model, options, &mut errors);
                }
                _ => errors.push(format!("{context} is not an object")),
            }
        }
    }

    errors
}

fn validate_model(
    context: &str,
    provider_key: &str,
    model: &Map<String, Value>,
    options: ValidatorOptions,
    errors: &mut Vec<String>,
) {
    for (field, kind) in REQUIRED_FIELDS {
        match check_field(model, field, kind) {
            FieldCheck::Present(_) => {}
            FieldCheck::Missing => errors.push(format!("{context} missing field '{field}'")),
            FieldCheck::WrongKind(actual) => errors.push(format!(
                "{context} field '{field}' should be a {kind}, got {actual}"
            )),
        }
    }

    for field in CAPABILITY_FIELDS {
        if let FieldCheck::WrongKind(actual) = check_field(model, field, JsonKind::Boolean) {
            errors.push(format!(
                "{context} field '{field}' should be a boolean, got {actual}"
            ));
        }
    }

    if options.strict_provider_match
        && let FieldCheck::Present(Value::String(declared)) =
            check_field(model, "provider", JsonKind::String)
        && declared != provider_key
    {
        errors.push(format!(
            "{context} provider '{declared}' does not match '{provider_key}'"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strict() -> ValidatorOptions {
        ValidatorOptions::default()
    }

    fn model(provider: &str) -> Value {
        json!({
            "id": "m1",
            "name": "M1",
            "provider": provider,
            "contextWindow": 128_000,
            "maxOutput": 4096
        })
    }

    #[test]
    fn valid_catalogue_has_no_errors() {
        let body = json!({"providers": {"openai": [model("openai")]}});
        assert!(validate_model_catalogue(&body, strict()).is_empty());
    }

    #[test]
    fn empty_providers_is_reported() {
        let body = json!({"providers": {}});
        assert_eq!(
            validate_model_catalogue(&body, strict()),
            vec!["No providers found"]
        );
    }

    #[test]
    fn top_level_shape_errors_stop_validation() {
        assert_eq!(
            validate_model_catalogue(&json!([1, 2]), strict()),
            vec!["Response is not a JSON object"]
        );
        assert_eq!(
            validate_model_catalogue(&json!({"models": []}), strict()),
            vec!["Missing 'providers' field"]
        );
        assert_eq!(
            validate_model_catalogue(&json!({"providers": []}), strict()),
            vec!["'providers' field is not an object"]
        );
    }

    #[test]
    fn provider_errors_do_not_stop_other_providers() {
        let body = json!({"providers": {
            "anthropic": [],
            "google": {"not": "a list"},
            "openai": [model("openai"), 42]
        }});
        assert_eq!(
            validate_model_catalogue(&body, strict()),
            vec![
                "Provider 'anthropic' has no models",
                "Provider 'google' models is not an array",
                "Provider 'openai' model[1] is not an object",
            ]
        );
    }

    #[test]
    fn each_bad_field_is_reported_separately() {
        let body = json!({"providers": {"openai": [{
            "id": 7,
            "provider": "openai",
            "contextWindow": "big",
            "maxOutput": 4096,
            "supportsVision": "yes",
            "supportsTools": true
        }]}});
        assert_eq!(
            validate_model_catalogue(&body, strict()),
            vec![
                "Provider 'openai' model[0] field 'id' should be a string, got number",
                "Provider 'openai' model[0] missing field 'name'",
                "Provider 'openai' model[0] field 'contextWindow' should be a number, got string",
                "Provider 'openai' model[0] field 'supportsVision' should be a boolean, got string",
            ]
        );
    }

    #[test]
    fn provider_mismatch_respects_strictness() {
        let body = json!({"providers": {"openai": [model("azure")]}});
        assert_eq!(
            validate_model_catalogue(&body, strict()),
            vec!["Provider 'openai' model[0] provider 'azure' does not match 'openai'"]
        );

        let lenient = ValidatorOptions {
            strict_provider_match: false,
        };
        assert!(validate_model_catalogue(&body, lenient).is_empty());
    }

    #[test]
    fn validation_is_repeatable() {
        let body = json!({"providers": {"b": [{}], "a": "x"}});
        let first = validate_model_catalogue(&body, strict());
        let second = validate_model_catalogue(&body, strict());
        assert_eq!(first, second);
        assert_eq!(first[0], "Provider 'a' models is not an array");
    }
}

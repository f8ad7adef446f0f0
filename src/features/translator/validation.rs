//! Request validation
//!
//! Every check runs and every violation is reported; nothing is applied
//! unless the whole request is valid.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use super::types::{DetectInput, SavedPhraseInput, TranslateInput, ValidatedRequest};
use crate::shared::error::{AppError, AppResult, FieldError};
use crate::shared::types::{NewSavedPhrase, AUTO_LANGUAGE};

fn language_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").expect("valid language code regex")
    })
}

fn is_auto(code: &str) -> bool {
    code.eq_ignore_ascii_case(AUTO_LANGUAGE)
}

/// A required string field. `null` counts as missing.
fn required_str<'a>(
    field: &str,
    value: Option<&'a Value>,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn check_text(
    field: &str,
    value: Option<&Value>,
    max_chars: Option<usize>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let text = required_str(field, value, errors)?;
    if text.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
        return None;
    }
    if let Some(max) = max_chars {
        let count = text.graphemes(true).count();
        if count > max {
            errors.push(FieldError::new(
                field,
                format!("must be at most {} characters (got {})", max, count),
            ));
            return None;
        }
    }
    Some(text.to_string())
}

/// Checks a language code, returning the trimmed value when it is usable.
fn check_language(
    field: &str,
    value: Option<&Value>,
    allow_auto: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let code = required_str(field, value, errors)?.trim();
    if code.is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
        return None;
    }
    if is_auto(code) {
        if allow_auto {
            return Some(AUTO_LANGUAGE.to_string());
        }
        errors.push(FieldError::new(field, "cannot be \"auto\""));
        return None;
    }
    if !language_code_regex().is_match(code) {
        errors.push(FieldError::new(
            field,
            format!("\"{}\" is not a valid language code", code),
        ));
        return None;
    }
    Some(code.to_string())
}

/// Optional owner tag; absent or `null` means no owner.
fn check_user_id(value: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<u64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => {
            let id = v.as_u64();
            if id.is_none() {
                errors.push(FieldError::new("userId", "must be a non-negative integer"));
            }
            id
        }
    }
}

/// Missing `sourceLanguage` means auto-detect.
pub fn validate_translate(input: TranslateInput, max_chars: usize) -> AppResult<ValidatedRequest> {
    let mut errors = Vec::new();

    let text = check_text("sourceText", input.source_text.as_ref(), Some(max_chars), &mut errors);
    let source = match input.source_language.as_ref() {
        None | Some(Value::Null) => Some(AUTO_LANGUAGE.to_string()),
        value => check_language("sourceLanguage", value, true, &mut errors),
    };
    let target = check_language("targetLanguage", input.target_language.as_ref(), false, &mut errors);
    let user_id = check_user_id(input.user_id.as_ref(), &mut errors);

    match (text, source, target) {
        (Some(source_text), Some(source_language), Some(target_language)) if errors.is_empty() => {
            Ok(ValidatedRequest {
                source_text,
                source_language,
                target_language,
                user_id,
            })
        }
        _ => Err(AppError::Validation(errors)),
    }
}

pub fn validate_detect(input: DetectInput, max_chars: usize) -> AppResult<String> {
    let mut errors = Vec::new();
    match check_text("q", input.q.as_ref(), Some(max_chars), &mut errors) {
        Some(text) if errors.is_empty() => Ok(text),
        _ => Err(AppError::Validation(errors)),
    }
}

pub fn validate_saved_phrase(input: SavedPhraseInput) -> AppResult<NewSavedPhrase> {
    let mut errors = Vec::new();

    let source_text = check_text("sourceText", input.source_text.as_ref(), None, &mut errors);
    let translated_text =
        check_text("translatedText", input.translated_text.as_ref(), None, &mut errors);
    let source = check_language("sourceLanguage", input.source_language.as_ref(), true, &mut errors);
    let target = check_language("targetLanguage", input.target_language.as_ref(), false, &mut errors);
    let user_id = check_user_id(input.user_id.as_ref(), &mut errors);

    match (source_text, translated_text, source, target) {
        (Some(source_text), Some(translated_text), Some(source_language), Some(target_language))
            if errors.is_empty() =>
        {
            Ok(NewSavedPhrase {
                source_text,
                translated_text,
                source_language,
                target_language,
                user_id,
            })
        }
        _ => Err(AppError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(text: Option<&str>, source: Option<&str>, target: Option<&str>) -> TranslateInput {
        TranslateInput {
            source_text: text.map(Value::from),
            source_language: source.map(Value::from),
            target_language: target.map(Value::from),
            user_id: None,
        }
    }

    fn fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        let req = validate_translate(input(Some("Hello"), Some(" en "), Some("es")), 5000).unwrap();
        assert_eq!(req.source_text, "Hello");
        assert_eq!(req.source_language, "en");
        assert_eq!(req.target_language, "es");
    }

    #[test]
    fn test_missing_source_defaults_to_auto() {
        let req = validate_translate(input(Some("Hello"), None, Some("es")), 5000).unwrap();
        assert_eq!(req.source_language, "auto");

        let req = validate_translate(input(Some("Hello"), Some("AUTO"), Some("es")), 5000).unwrap();
        assert_eq!(req.source_language, "auto");
    }

    #[test]
    fn test_reports_every_violation() {
        let err = validate_translate(input(Some("   "), Some(""), None), 5000).unwrap_err();
        assert_eq!(fields(err), vec!["sourceText", "sourceLanguage", "targetLanguage"]);
    }

    #[test]
    fn test_target_cannot_be_auto() {
        let err = validate_translate(input(Some("Hi"), Some("en"), Some("auto")), 5000).unwrap_err();
        assert_eq!(fields(err), vec!["targetLanguage"]);
    }

    #[test]
    fn test_rejects_malformed_codes() {
        let err =
            validate_translate(input(Some("Hi"), Some("english!"), Some("e")), 5000).unwrap_err();
        assert_eq!(fields(err), vec!["sourceLanguage", "targetLanguage"]);

        assert!(validate_translate(input(Some("Hi"), Some("zh-Hans"), Some("pt_BR")), 5000).is_ok());
    }

    #[test]
    fn test_length_bound_counts_characters() {
        let at_limit = "é".repeat(10);
        assert!(validate_translate(input(Some(&at_limit), Some("fr"), Some("en")), 10).is_ok());

        let over = "a".repeat(11);
        let err = validate_translate(input(Some(&over), Some("fr"), Some("en")), 10).unwrap_err();
        assert_eq!(fields(err), vec!["sourceText"]);
    }

    #[test]
    fn test_detect_requires_text() {
        assert_eq!(
            validate_detect(DetectInput { q: Some("Bonjour".into()) }, 100).unwrap(),
            "Bonjour"
        );
        let err = validate_detect(DetectInput { q: None }, 100).unwrap_err();
        assert_eq!(fields(err), vec!["q"]);
    }

    #[test]
    fn test_saved_phrase_validation() {
        let ok = validate_saved_phrase(SavedPhraseInput {
            source_text: Some("Hello".into()),
            translated_text: Some("Hola".into()),
            source_language: Some("en".into()),
            target_language: Some("es".into()),
            user_id: Some(json!(2)),
        })
        .unwrap();
        assert_eq!(ok.translated_text, "Hola");
        assert_eq!(ok.user_id, Some(2));

        let err = validate_saved_phrase(SavedPhraseInput::default()).unwrap_err();
        assert_eq!(
            fields(err),
            vec!["sourceText", "translatedText", "sourceLanguage", "targetLanguage"]
        );
    }

    #[test]
    fn test_wrong_types_reported_per_field() {
        let err = validate_translate(
            TranslateInput {
                source_text: Some(json!(5)),
                source_language: Some(json!("")),
                target_language: Some(json!(["es"])),
                user_id: Some(json!("me")),
            },
            5000,
        )
        .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            vec![
                FieldError::new("sourceText", "must be a string"),
                FieldError::new("sourceLanguage", "must not be empty"),
                FieldError::new("targetLanguage", "must be a string"),
                FieldError::new("userId", "must be a non-negative integer"),
            ]
        );
    }

    #[test]
    fn test_null_source_language_means_auto() {
        let mut raw = input(Some("Hello"), None, Some("es"));
        raw.source_language = Some(Value::Null);
        raw.user_id = Some(json!(7));
        let req = validate_translate(raw, 5000).unwrap();
        assert_eq!(req.source_language, "auto");
        assert_eq!(req.user_id, Some(7));
    }
}

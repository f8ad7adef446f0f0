//! Provider response normalization
//!
//! The only place provider JSON shapes are interpreted. Two shapes are
//! understood:
//!
//! - LibreTranslate: `{ translatedText, detectedLanguage: { language, confidence } }`
//!   with confidence as a 0-100 percentage.
//! - MyMemory: `{ responseData: { translatedText, match, detectedLanguage? },
//!   responseStatus, responseDetails }` with `match` as a 0-1 fraction.
//!
//! Confidence values in `[0, 1]` are treated as fractions, anything above as
//! a percentage; both end up as a rounded integer in `0..=100`.

use serde_json::Value;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{DetectedLanguage, TranslationResult};

/// Scale a provider confidence onto the canonical 0-100 integer scale.
pub fn normalize_confidence(raw: f64) -> u8 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let percent = if raw <= 1.0 { raw * 100.0 } else { raw };
    percent.round().min(100.0) as u8
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn detection_from(language: Option<&Value>, confidence: Option<&Value>) -> Option<DetectedLanguage> {
    let language = non_empty_str(language)?;
    let confidence = confidence.and_then(number).map(normalize_confidence).unwrap_or(0);
    Some(DetectedLanguage {
        language: language.to_string(),
        confidence,
    })
}

fn mymemory_status(body: &Value) -> Option<u16> {
    body.get("responseStatus")
        .and_then(number)
        .map(|status| status as u16)
}

fn translated_text(value: Option<&Value>) -> AppResult<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(Value::String(_)) => Err(AppError::ProviderResponseInvalid(
            "translatedText is empty".to_string(),
        )),
        Some(_) => Err(AppError::ProviderResponseInvalid(
            "translatedText is not a string".to_string(),
        )),
        None => Err(AppError::ProviderResponseInvalid(
            "missing translatedText".to_string(),
        )),
    }
}

/// Turn a successful provider translate body into the canonical result.
pub fn normalize_translation(body: &Value) -> AppResult<TranslationResult> {
    if let Some(data) = body.get("responseData") {
        if let Some(status) = mymemory_status(body) {
            if status >= 400 {
                let details = body
                    .get("responseDetails")
                    .and_then(Value::as_str)
                    .unwrap_or("no details");
                return Err(AppError::ProviderUnavailable(format!(
                    "provider reported status {}: {}",
                    status, details
                )));
            }
        }

        let translated_text = translated_text(data.get("translatedText"))?;
        let detected_language = detection_from(
            data.get("detectedLanguage").or_else(|| body.get("detectedLanguage")),
            data.get("match"),
        );
        return Ok(TranslationResult {
            translated_text,
            detected_language,
        });
    }

    let translated_text = translated_text(body.get("translatedText"))?;
    let detected_language = body
        .get("detectedLanguage")
        .filter(|d| d.is_object())
        .and_then(|d| detection_from(d.get("language"), d.get("confidence")));

    Ok(TranslationResult {
        translated_text,
        detected_language,
    })
}

/// Normalize a detection body (`[{ language, confidence }]`), most confident first.
pub fn normalize_detections(body: &Value) -> AppResult<Vec<DetectedLanguage>> {
    let candidates = body.as_array().ok_or_else(|| {
        AppError::ProviderResponseInvalid("detection response is not a list".to_string())
    })?;

    let mut detections: Vec<DetectedLanguage> = candidates
        .iter()
        .filter_map(|c| detection_from(c.get("language"), c.get("confidence")))
        .collect();
    detections.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confidence_scales_agree() {
        assert_eq!(normalize_confidence(0.87), 87);
        assert_eq!(normalize_confidence(87.0), 87);
        assert_eq!(normalize_confidence(1.0), 100);
        assert_eq!(normalize_confidence(100.0), 100);
        assert_eq!(normalize_confidence(0.0), 0);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(normalize_confidence(250.0), 100);
        assert_eq!(normalize_confidence(-3.0), 0);
        assert_eq!(normalize_confidence(f64::NAN), 0);
        assert_eq!(normalize_confidence(83.6), 84);
    }

    #[test]
    fn test_libretranslate_shape() {
        let body = json!({
            "translatedText": "Hola",
            "detectedLanguage": { "language": "en", "confidence": 87 }
        });
        let result = normalize_translation(&body).unwrap();
        assert_eq!(result.translated_text, "Hola");
        assert_eq!(
            result.detected_language,
            Some(DetectedLanguage { language: "en".into(), confidence: 87 })
        );
    }

    #[test]
    fn test_libretranslate_without_detection() {
        let result = normalize_translation(&json!({ "translatedText": "Hola" })).unwrap();
        assert_eq!(result.translated_text, "Hola");
        assert_eq!(result.detected_language, None);
    }

    #[test]
    fn test_mymemory_shape_fractional_match() {
        let body = json!({
            "responseData": { "translatedText": "Ciao", "match": 0.87, "detectedLanguage": "en" },
            "responseStatus": 200,
            "responseDetails": ""
        });
        let result = normalize_translation(&body).unwrap();
        assert_eq!(result.translated_text, "Ciao");
        assert_eq!(
            result.detected_language,
            Some(DetectedLanguage { language: "en".into(), confidence: 87 })
        );
    }

    #[test]
    fn test_mymemory_without_detected_language() {
        let body = json!({
            "responseData": { "translatedText": "Ciao", "match": 1 },
            "responseStatus": "200"
        });
        let result = normalize_translation(&body).unwrap();
        assert_eq!(result.detected_language, None);
    }

    #[test]
    fn test_mymemory_error_status() {
        let body = json!({
            "responseData": { "translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS" },
            "responseStatus": 429,
            "responseDetails": "quota exceeded"
        });
        let err = normalize_translation(&body).unwrap_err();
        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }

    #[test]
    fn test_missing_translated_text_is_invalid() {
        for body in [
            json!({}),
            json!({ "translatedText": null }),
            json!({ "translatedText": "" }),
            json!({ "responseData": {} }),
            json!(["Hola"]),
        ] {
            let err = normalize_translation(&body).unwrap_err();
            assert!(
                matches!(err, AppError::ProviderResponseInvalid(_)),
                "body {} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_detections_sorted_and_scaled() {
        let body = json!([
            { "language": "es", "confidence": 0.2 },
            { "language": "pt", "confidence": 64.0 },
            { "confidence": 99 }
        ]);
        let detections = normalize_detections(&body).unwrap();
        assert_eq!(
            detections,
            vec![
                DetectedLanguage { language: "pt".into(), confidence: 64 },
                DetectedLanguage { language: "es".into(), confidence: 20 },
            ]
        );
    }

    #[test]
    fn test_detections_not_a_list() {
        let err = normalize_detections(&json!({ "language": "en" })).unwrap_err();
        assert!(matches!(err, AppError::ProviderResponseInvalid(_)));
    }
}

//! Guard parsing and validating a JSON request body.

use std::collections::BTreeMap;

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use serde_path_to_error::Segment;
use validator::Validate;

use crate::error::AppError;

const COMPONENT: &str = "ValidateDtoMiddleware";

/// Upper bound for buffered request bodies.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Top-level JSON keys a request body must carry.
pub trait RequiredFields {
    const REQUIRED: &'static [&'static str];
}

/// Deserializes the body into `T` and runs its validation rules.
///
/// On success the typed DTO is stored in the request extensions; handlers read
/// it with `Extension<T>`. The original bytes are passed on unchanged.
///
/// # Errors
///
/// Returns `400 Bad Request` when the body is not JSON, when required fields
/// are missing or ill-typed, or when any constraint fails. Shape and
/// constraint failures list every offending field under `details.fields`.
///
/// # Example
///
/// ```rust,ignore
/// post(create_handler).route_layer(middleware::from_fn(validate_dto::layer::<CreateOfferDto>))
/// ```
pub async fn layer<T>(req: Request, next: Next) -> Result<Response, AppError>
where
    T: DeserializeOwned + Validate + RequiredFields + Clone + Send + Sync + 'static,
{
    let (mut parts, body) = req.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        AppError::bad_request("Failed to read request body", json!({ "reason": e.to_string() }))
            .with_component(COMPONENT)
    })?;

    let dto: T = parse_body(&bytes).map_err(|e| e.with_component(COMPONENT))?;

    dto.validate()
        .map_err(|e| AppError::from(e).with_component(COMPONENT))?;

    parts.extensions.insert(dto);

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Parses `bytes` as `T`, collecting every shape error instead of the first.
pub(crate) fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + RequiredFields,
{
    let mut value: Value = serde_json::from_slice(bytes).map_err(|e| {
        AppError::bad_request("Malformed request body", json!({ "reason": e.to_string() }))
    })?;

    let Some(object) = value.as_object() else {
        return Err(AppError::bad_request(
            "Request body must be a JSON object",
            json!({}),
        ));
    };

    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in T::REQUIRED {
        if object.get(*name).is_none_or(Value::is_null) {
            fields
                .entry((*name).to_string())
                .or_default()
                .push("required".to_string());
        }
    }

    // Each failing key is reported and dropped, so the loop ends after at most one pass per key.
    loop {
        match serde_path_to_error::deserialize::<_, T>(&value) {
            Ok(dto) if fields.is_empty() => return Ok(dto),
            Ok(_) => break,
            Err(e) => {
                let top = match e.path().iter().next() {
                    Some(Segment::Map { key }) => Some(key.clone()),
                    _ => None,
                };
                let Some(top) = top else {
                    if fields.is_empty() {
                        fields
                            .entry("body".to_string())
                            .or_default()
                            .push(e.inner().to_string());
                    }
                    break;
                };

                fields
                    .entry(e.path().to_string())
                    .or_default()
                    .push(e.inner().to_string());

                let removed = value
                    .as_object_mut()
                    .is_some_and(|object| object.remove(&top).is_some());
                if !removed {
                    break;
                }
            }
        }
    }

    Err(AppError::bad_request(
        "Validation failed",
        json!({ "fields": fields }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Listing {
        title: String,
        room_count: i32,
        #[serde(default)]
        note: Option<String>,
        location: Location,
    }

    #[derive(Debug, Deserialize)]
    struct Location {
        latitude: f64,
    }

    impl RequiredFields for Listing {
        const REQUIRED: &'static [&'static str] = &["title", "roomCount", "location"];
    }

    fn fields(err: AppError) -> Value {
        match err {
            AppError::Validation { details, .. } => details["fields"].clone(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_body_accepts_valid_body() {
        let listing: Listing =
            parse_body(br#"{"title":"Loft","roomCount":2,"location":{"latitude":48.8}}"#)
                .unwrap();

        assert_eq!(listing.title, "Loft");
        assert_eq!(listing.room_count, 2);
        assert!(listing.note.is_none());
        assert_eq!(listing.location.latitude, 48.8);
    }

    #[test]
    fn test_empty_object_lists_every_required_field() {
        let fields = fields(parse_body::<Listing>(b"{}").unwrap_err());

        assert_eq!(fields["title"][0], "required");
        assert_eq!(fields["roomCount"][0], "required");
        assert_eq!(fields["location"][0], "required");
        assert!(fields.get("note").is_none());
    }

    #[test]
    fn test_ill_typed_fields_are_all_listed() {
        let fields = fields(
            parse_body::<Listing>(
                br#"{"title":7,"roomCount":"two","location":{"latitude":"north"}}"#,
            )
            .unwrap_err(),
        );

        assert!(fields.get("title").is_some());
        assert!(fields.get("roomCount").is_some());
        assert!(fields.get("location.latitude").is_some());
    }

    #[test]
    fn test_missing_and_ill_typed_fields_are_combined() {
        let fields =
            fields(parse_body::<Listing>(br#"{"roomCount":"two"}"#).unwrap_err());

        assert_eq!(fields["title"][0], "required");
        assert!(fields.get("roomCount").is_some());
        assert_eq!(fields["location"][0], "required");
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = parse_body::<Listing>(b"not json").unwrap_err();
        assert_eq!(err.to_string(), "Malformed request body");
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = parse_body::<Listing>(b"[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "Request body must be a JSON object");
    }
}

use axum::extract::{
  Request,
  State
};
use axum::http::{
  Method,
  StatusCode,
  header
};
use axum::middleware::Next;
use axum::response::{
  IntoResponse,
  Response
};
use tracing::warn;

use crate::AppState;

/// Encodings of `.` that have no
/// legitimate use in a static site path.
const ENCODED_DOTS: [&str; 2] =
  ["%2e", "%%32%65"];

/// Checks a request before dispatch.
///
/// An oversized declared body is refused
/// with 413 before anything else is looked
/// at. Then only GET is served, and
/// traversal attempts get 403.
pub fn verify(
  method: &Method,
  target: &str,
  content_length: Option<u64>,
  max_request_bytes: u64
) -> Result<(), StatusCode> {
  if content_length
    .is_some_and(|len| len >= max_request_bytes)
  {
    return Err(
      StatusCode::PAYLOAD_TOO_LARGE
    );
  }

  if method != Method::GET {
    return Err(
      StatusCode::METHOD_NOT_ALLOWED
    );
  }

  let lowered =
    target.to_ascii_lowercase();
  if target.contains("..")
    || ENCODED_DOTS
      .iter()
      .any(|needle| lowered.contains(needle))
  {
    return Err(StatusCode::FORBIDDEN);
  }

  Ok(())
}

pub fn is_malicious(
  status: StatusCode
) -> bool {
  matches!(
    status,
    StatusCode::FORBIDDEN
      | StatusCode::PAYLOAD_TOO_LARGE
  )
}

pub async fn verify_request(
  State(state): State<AppState>,
  req: Request,
  next: Next
) -> Response {
  let target = req
    .uri()
    .path_and_query()
    .map(|pq| pq.as_str().to_string())
    .unwrap_or_else(|| "/".to_string());
  let content_length = req
    .headers()
    .get(header::CONTENT_LENGTH)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.parse().ok());

  match verify(
    req.method(),
    &target,
    content_length,
    state.config.max_request_bytes
  ) {
    | Ok(()) => next.run(req).await,
    | Err(status) => {
      if is_malicious(status) {
        state.analytics.record_malicious();
      } else {
        state.analytics.record_invalid();
      }
      warn!(
        method = %req.method(),
        path = %target,
        content_length = ?content_length,
        status = status.as_u16(),
        "rejected request"
      );
      status.into_response()
    }
  }
}

#[cfg(test)]
mod tests {
  use axum::http::{
    Method,
    StatusCode
  };

  use super::verify;

  const LIMIT: u64 = 16_384;

  #[test]
  fn plain_get_passes() {
    assert_eq!(
      verify(
        &Method::GET,
        "/projects?x=1",
        None,
        LIMIT
      ),
      Ok(())
    );
  }

  #[test]
  fn other_methods_are_not_allowed() {
    for method in [
      Method::POST,
      Method::HEAD,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
      Method::TRACE,
      Method::PATCH
    ] {
      assert_eq!(
        verify(&method, "/", None, LIMIT),
        Err(StatusCode::METHOD_NOT_ALLOWED)
      );
    }
  }

  #[test]
  fn traversal_is_forbidden() {
    for target in [
      "/../etc/passwd",
      "/a/..",
      "/%2e%2e/secret",
      "/%2E%2E/secret",
      "/%%32%65%%32%65/x"
    ] {
      assert_eq!(
        verify(
          &Method::GET,
          target,
          None,
          LIMIT
        ),
        Err(StatusCode::FORBIDDEN),
        "{target}"
      );
    }
  }

  #[test]
  fn oversized_body_is_rejected() {
    assert_eq!(
      verify(
        &Method::GET,
        "/",
        Some(LIMIT),
        LIMIT
      ),
      Err(StatusCode::PAYLOAD_TOO_LARGE)
    );
    assert_eq!(
      verify(
        &Method::GET,
        "/",
        Some(LIMIT - 1),
        LIMIT
      ),
      Ok(())
    );
  }

  #[test]
  fn size_is_checked_before_method() {
    assert_eq!(
      verify(
        &Method::POST,
        "/",
        Some(1_000_000),
        LIMIT
      ),
      Err(StatusCode::PAYLOAD_TOO_LARGE)
    );
    assert_eq!(
      verify(
        &Method::PUT,
        "/../x",
        Some(LIMIT),
        LIMIT
      ),
      Err(StatusCode::PAYLOAD_TOO_LARGE)
    );
  }
}

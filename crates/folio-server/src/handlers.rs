use std::io::ErrorKind;
use std::path::{
  Path,
  PathBuf
};

use axum::body::Body;
use axum::extract::{
  Request,
  State
};
use axum::http::{
  StatusCode,
  header
};
use axum::response::{
  Html,
  IntoResponse,
  Response
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::AppState;
use crate::config::ReturnDirective;

/// Only the exact target `/health` gets
/// the report; anything with a query goes
/// to the file handler.
pub async fn health(
  State(state): State<AppState>,
  req: Request
) -> Response {
  if req.uri().query().is_some() {
    return serve_file(State(state), req)
      .await;
  }
  state.analytics.record_health();
  Html(state.analytics.report())
    .into_response()
}

/// Where a request target lands under the
/// site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
  pub relative: String,
  pub path:     PathBuf
}

pub fn resolve_target(
  root: &Path,
  index: &str,
  uri_path: &str
) -> Resolved {
  let trimmed =
    uri_path.trim_start_matches('/');
  let relative = if trimmed.is_empty()
    || trimmed.ends_with('/')
  {
    format!("{trimmed}{index}")
  } else {
    trimmed.to_string()
  };

  Resolved {
    path: root.join(&relative),
    relative
  }
}

pub fn has_extension(relative: &str) -> bool {
  Path::new(relative)
    .extension()
    .is_some_and(|ext| !ext.is_empty())
}

fn file_response(
  status: StatusCode,
  path: &Path,
  bytes: Vec<u8>
) -> Response {
  let mime = mime_guess::from_path(path)
    .first_or_octet_stream();
  (
    status,
    [(header::CONTENT_TYPE, mime.to_string())],
    Body::from(bytes)
  )
    .into_response()
}

fn internal_error() -> Response {
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    [(header::CONTENT_TYPE, "text/plain")],
    "500 Internal Server Error"
  )
    .into_response()
}

async fn read_regular_file(
  path: &Path
) -> std::io::Result<Option<Vec<u8>>> {
  match tokio::fs::metadata(path).await {
    | Ok(meta) if meta.is_file() => {
      tokio::fs::read(path).await.map(Some)
    }
    | Ok(_) => Ok(None),
    | Err(err)
      if err.kind() == ErrorKind::NotFound =>
    {
      Ok(None)
    }
    | Err(err) => Err(err)
  }
}

async fn not_found(
  state: &AppState,
  relative: &str
) -> Response {
  let root = state.config.root_dir();

  if state.config.spa_fallback
    && !has_extension(relative)
  {
    let index =
      root.join(&state.config.index);
    match tokio::fs::read(&index).await {
      | Ok(bytes) => {
        debug!(
          path = relative,
          "serving index for client route"
        );
        return file_response(
          StatusCode::OK,
          &index,
          bytes
        );
      }
      | Err(err) => {
        error!(
          error = %err,
          index = %index.display(),
          "index missing for spa fallback"
        );
      }
    }
  }

  warn!(
    path = relative,
    "not found; serving 404 page"
  );
  let page =
    root.join(&state.config.not_found);
  match tokio::fs::read(&page).await {
    | Ok(bytes) => {
      file_response(
        StatusCode::NOT_FOUND,
        &page,
        bytes
      )
    }
    | Err(_) => {
      (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "404 Not Found"
      )
        .into_response()
    }
  }
}

pub async fn serve_file(
  State(state): State<AppState>,
  req: Request
) -> Response {
  state.analytics.record_get();

  let resolved = resolve_target(
    state.config.root_dir(),
    &state.config.index,
    req.uri().path()
  );

  match read_regular_file(&resolved.path)
    .await
  {
    | Ok(Some(bytes)) => {
      info!(
        file = %resolved.relative,
        bytes = bytes.len(),
        "serving file"
      );
      file_response(
        StatusCode::OK,
        &resolved.path,
        bytes
      )
    }
    | Ok(None) => {
      not_found(&state, &resolved.relative)
        .await
    }
    | Err(err) => {
      error!(
        error = %err,
        file = %resolved.relative,
        "could not open file"
      );
      internal_error()
    }
  }
}

/// Expands `$scheme`, `$host` and
/// `$request_uri` in a return target.
pub fn expand_target(
  target: &str,
  host: &str,
  request_uri: &str
) -> String {
  target
    .replace("$scheme", "http")
    .replace("$host", host)
    .replace("$request_uri", request_uri)
}

pub fn return_response(
  directive: &ReturnDirective,
  host: &str,
  request_uri: &str
) -> Response {
  let status =
    StatusCode::from_u16(directive.code)
      .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

  if directive.is_redirect() {
    let location = expand_target(
      &directive.target,
      host,
      request_uri
    );
    let body =
      format!("Redirecting to {location}");
    return (
      status,
      [(header::LOCATION, location)],
      body
    )
      .into_response();
  }

  (status, directive.target.clone())
    .into_response()
}

pub async fn return_directive(
  State(state): State<AppState>,
  req: Request
) -> Response {
  let Some(directive) =
    state.config.return_directive.as_ref()
  else {
    return internal_error();
  };
  let request_uri = req
    .uri()
    .path_and_query()
    .map(|pq| pq.as_str())
    .unwrap_or("/");
  let host = state
    .config
    .server_name
    .as_deref()
    .unwrap_or_default();

  return_response(
    directive,
    host,
    request_uri
  )
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use axum::http::{
    StatusCode,
    header
  };

  use super::{
    expand_target,
    has_extension,
    resolve_target,
    return_response
  };
  use crate::config::ReturnDirective;

  #[test]
  fn directories_resolve_to_index() {
    let root = Path::new("/srv/site");
    let home = resolve_target(
      root,
      "index.html",
      "/"
    );
    assert_eq!(home.relative, "index.html");
    assert_eq!(
      home.path,
      Path::new("/srv/site/index.html")
    );

    let nested = resolve_target(
      root,
      "index.html",
      "/blog/"
    );
    assert_eq!(
      nested.relative,
      "blog/index.html"
    );

    let file = resolve_target(
      root,
      "index.html",
      "/assets/app.js"
    );
    assert_eq!(
      file.relative,
      "assets/app.js"
    );
  }

  #[test]
  fn extension_detection() {
    assert!(has_extension("a/b.css"));
    assert!(!has_extension("projects"));
    assert!(!has_extension("resume/"));
  }

  #[test]
  fn target_variables_expand() {
    assert_eq!(
      expand_target(
        "$scheme://$host$request_uri",
        "example.com",
        "/projects?tag=Web"
      ),
      "http://example.com/projects?tag=Web"
    );
  }

  #[test]
  fn redirect_sets_location_and_body() {
    let directive = ReturnDirective {
      code:   301,
      target: "https://$host$request_uri"
        .to_string()
    };
    let response = return_response(
      &directive,
      "example.com",
      "/x"
    );
    assert_eq!(
      response.status(),
      StatusCode::MOVED_PERMANENTLY
    );
    assert_eq!(
      response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok()),
      Some("https://example.com/x")
    );
  }

  #[test]
  fn plain_return_has_no_location() {
    let directive = ReturnDirective {
      code:   410,
      target: "gone".to_string()
    };
    let response =
      return_response(&directive, "", "/");
    assert_eq!(
      response.status(),
      StatusCode::GONE
    );
    assert!(
      response
        .headers()
        .get(header::LOCATION)
        .is_none()
    );
  }
}

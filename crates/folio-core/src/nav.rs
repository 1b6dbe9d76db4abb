/// Key of the nav link that should be
/// highlighted for `path`: `"/"` plus the
/// first path segment.
///
/// `/projects/chess` highlights
/// `/projects`; `/` and `""` highlight
/// home.
pub fn nav_key(path: &str) -> String {
  let first = path
    .trim_start_matches('/')
    .split('/')
    .next()
    .unwrap_or_default();
  format!("/{first}")
}

use std::fmt;

use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::filter::FilterState;
use crate::project::{
  Project,
  ProjectRecord,
  partition_records
};
use crate::store::ProjectStore;

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub enum LoadState {
  #[default]
  Idle,
  Loading,
  Ready,
  Failed(String)
}

/// Everything fetched from the store in
/// one page view.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct CatalogSnapshot {
  pub tags:    Vec<String>,
  pub records: Vec<ProjectRecord>
}

/// Commands accepted by
/// [`ProjectCatalog::apply`]; the only
/// way catalog state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
  LoadStarted,
  Loaded(CatalogSnapshot),
  LoadFailed(String),
  SetFilter {
    tag:     String,
    enabled: bool
  }
}

#[derive(Debug)]
pub enum LoadError {
  AlreadyStarted,
  Fetch(anyhow::Error)
}

impl fmt::Display for LoadError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::AlreadyStarted => {
        write!(
          f,
          "project catalog load already \
           started"
        )
      }
      | Self::Fetch(error) => {
        write!(
          f,
          "failed fetching projects: \
           {error:#}"
        )
      }
    }
  }
}

impl std::error::Error for LoadError {}

/// One-shot guard for a view that drives
/// the load itself through
/// [`ProjectCatalog::apply`].
#[derive(
  Debug, Clone, Copy, Default, PartialEq,
  Eq,
)]
pub struct LoadLatch {
  started: bool
}

impl LoadLatch {
  /// `true` the first time, `false`
  /// forever after.
  pub fn try_start(&mut self) -> bool {
    if self.started {
      return false;
    }
    self.started = true;
    true
  }
}

/// Fetches tags then projects. Both must
/// succeed for the snapshot to be usable.
#[tracing::instrument(skip_all)]
pub async fn fetch_snapshot<S>(
  store: &S
) -> anyhow::Result<CatalogSnapshot>
where
  S: ProjectStore
{
  let tags = store.fetch_tags().await?;
  debug!(
    count = tags.len(),
    "fetched tags"
  );

  let records =
    store.fetch_projects().await?;
  debug!(
    count = records.len(),
    "fetched project records"
  );

  Ok(CatalogSnapshot {
    tags,
    records
  })
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ProjectCatalog {
  tags:     Vec<String>,
  featured: Vec<Project>,
  general:  Vec<Project>,
  filter:   FilterState,
  state:    LoadState
}

impl ProjectCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn tags(&self) -> &[String] {
    &self.tags
  }

  pub fn featured(&self) -> &[Project] {
    &self.featured
  }

  pub fn general(&self) -> &[Project] {
    &self.general
  }

  pub fn filter(&self) -> &FilterState {
    &self.filter
  }

  pub fn state(&self) -> &LoadState {
    &self.state
  }

  pub fn is_visible(
    &self,
    project: &Project
  ) -> bool {
    self.filter.is_visible(project)
  }

  pub fn visible_featured(
    &self
  ) -> Vec<&Project> {
    self
      .featured
      .iter()
      .filter(|p| self.is_visible(p))
      .collect()
  }

  pub fn visible_general(
    &self
  ) -> Vec<&Project> {
    self
      .general
      .iter()
      .filter(|p| self.is_visible(p))
      .collect()
  }

  pub fn set_filter_enabled(
    &mut self,
    tag: impl Into<String>,
    enabled: bool
  ) {
    self.apply(CatalogAction::SetFilter {
      tag: tag.into(),
      enabled
    });
  }

  pub fn apply(
    &mut self,
    action: CatalogAction
  ) {
    match action {
      | CatalogAction::LoadStarted => {
        self.state = LoadState::Loading;
        info!("loading project catalog");
      }
      | CatalogAction::Loaded(snapshot) => {
        if self.state == LoadState::Ready
        {
          warn!(
            "ignoring second catalog \
             snapshot"
          );
          return;
        }
        let (featured, general) =
          partition_records(
            snapshot.records
          );
        info!(
          tags = snapshot.tags.len(),
          featured = featured.len(),
          general = general.len(),
          "project catalog ready"
        );
        self.tags = snapshot.tags;
        self.featured = featured;
        self.general = general;
        self.state = LoadState::Ready;
      }
      | CatalogAction::LoadFailed(
        message
      ) => {
        if self.state == LoadState::Ready
        {
          warn!(
            error = %message,
            "ignoring load failure after \
             catalog was ready"
          );
          return;
        }
        error!(
          error = %message,
          "project catalog load failed"
        );
        self.tags.clear();
        self.featured.clear();
        self.general.clear();
        self.state =
          LoadState::Failed(message);
      }
      | CatalogAction::SetFilter {
        tag,
        enabled
      } => {
        self.filter = self
          .filter
          .with_enabled(tag, enabled);
      }
    }
  }

  /// Runs the whole load against `store`,
  /// for callers without a dispatch loop.
  ///
  /// Only a catalog still `Idle` fetches;
  /// later calls return
  /// [`LoadError::AlreadyStarted`] without
  /// touching state. On a fetch error the
  /// catalog is left `Failed` with empty
  /// lists.
  pub async fn load<S>(
    &mut self,
    store: &S
  ) -> Result<(), LoadError>
  where
    S: ProjectStore
  {
    if self.state != LoadState::Idle {
      warn!(
        "refusing repeated project \
         catalog load"
      );
      return Err(LoadError::AlreadyStarted);
    }
    self.apply(CatalogAction::LoadStarted);

    match fetch_snapshot(store).await {
      | Ok(snapshot) => {
        self.apply(CatalogAction::Loaded(
          snapshot
        ));
        Ok(())
      }
      | Err(error) => {
        self.apply(
          CatalogAction::LoadFailed(
            format!("{error:#}")
          )
        );
        Err(LoadError::Fetch(error))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    CatalogAction,
    CatalogSnapshot,
    LoadLatch,
    LoadState,
    ProjectCatalog
  };
  use crate::project::ProjectRecord;

  fn record(
    title: &str,
    tags: &[&str],
    featured: bool
  ) -> ProjectRecord {
    ProjectRecord {
      title: title.to_string(),
      repo: format!(
        "https://github.com/example/{title}"
      ),
      tags: tags
        .iter()
        .map(|t| t.to_string())
        .collect(),
      featured,
      ..ProjectRecord::default()
    }
  }

  fn loaded() -> ProjectCatalog {
    let mut catalog =
      ProjectCatalog::new();
    catalog.apply(
      CatalogAction::LoadStarted
    );
    catalog.apply(CatalogAction::Loaded(
      CatalogSnapshot {
        tags:    vec![
          "Web".to_string(),
          "Game".to_string(),
        ],
        records: vec![
          record("site", &["Web3"], true),
          record("shooter", &["Game"], true),
          record("notes", &[], false),
        ]
      }
    ));
    catalog
  }

  #[test]
  fn latch_starts_once() {
    let mut latch = LoadLatch::default();
    assert!(latch.try_start());
    assert!(!latch.try_start());
  }

  #[test]
  fn set_filter_narrows_visible_lists() {
    let mut catalog = loaded();
    assert_eq!(
      catalog.visible_featured().len(),
      2
    );

    catalog.set_filter_enabled("Web", true);
    let titles: Vec<_> = catalog
      .visible_featured()
      .iter()
      .map(|p| p.title.as_str())
      .collect();
    assert_eq!(titles, vec!["site"]);
    assert!(
      catalog.visible_general().is_empty()
    );

    catalog.set_filter_enabled("Web", false);
    assert_eq!(
      catalog.visible_featured().len(),
      2
    );
    assert_eq!(
      catalog.visible_general().len(),
      1
    );
  }

  #[test]
  fn failed_load_clears_lists() {
    let mut catalog =
      ProjectCatalog::new();
    catalog.apply(
      CatalogAction::LoadStarted
    );
    catalog.apply(
      CatalogAction::LoadFailed(
        "offline".to_string()
      )
    );

    assert_eq!(
      catalog.state(),
      &LoadState::Failed(
        "offline".to_string()
      )
    );
    assert!(catalog.featured().is_empty());
    assert!(catalog.general().is_empty());
    assert!(catalog.tags().is_empty());
  }

  #[test]
  fn second_snapshot_is_ignored() {
    let mut catalog = loaded();
    catalog.apply(CatalogAction::Loaded(
      CatalogSnapshot::default()
    ));
    assert_eq!(catalog.featured().len(), 2);
    assert_eq!(catalog.tags().len(), 2);
  }

  #[test]
  fn late_failure_keeps_loaded_projects() {
    let mut catalog = loaded();
    catalog.apply(
      CatalogAction::LoadFailed(
        "late".to_string()
      )
    );
    assert_eq!(
      catalog.state(),
      &LoadState::Ready
    );
    assert_eq!(catalog.featured().len(), 2);
    assert_eq!(catalog.general().len(), 1);
    assert_eq!(catalog.tags().len(), 2);
  }
}

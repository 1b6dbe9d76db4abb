use serde::{
  Deserialize,
  Serialize
};

/// A project exactly as the document store
/// returns it, before it is sorted into
/// the featured or general list.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ProjectRecord {
  pub title:    String,
  #[serde(default)]
  pub desc:     String,
  #[serde(default)]
  pub repo:     String,
  #[serde(default)]
  pub image:    Option<String>,
  #[serde(default)]
  pub sim:      Option<String>,
  #[serde(default)]
  pub tags:     Vec<String>,
  #[serde(default)]
  pub featured: bool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
  pub title: String,
  pub desc:  String,
  pub image: Option<String>,
  pub repo:  String,
  pub sim:   Option<String>,
  pub tags:  Vec<String>
}

impl Project {
  /// Tags as shown on a card,
  /// `"Web, Rust"`.
  pub fn joined_tags(&self) -> String {
    self.tags.join(", ")
  }
}

impl From<ProjectRecord> for Project {
  fn from(record: ProjectRecord) -> Self {
    Self {
      title: record.title,
      desc:  record.desc,
      image: record.image,
      repo:  record.repo,
      sim:   record.sim,
      tags:  record.tags
    }
  }
}

/// Splits records into `(featured,
/// general)`, keeping source order within
/// each list.
pub fn partition_records(
  records: Vec<ProjectRecord>
) -> (Vec<Project>, Vec<Project>) {
  let mut featured = Vec::new();
  let mut general = Vec::new();

  for record in records {
    if record.featured {
      featured.push(Project::from(record));
    } else {
      general.push(Project::from(record));
    }
  }

  (featured, general)
}

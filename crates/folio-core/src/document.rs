//! Decoding of Firestore REST
//! `documents.list` responses into tags
//! and project records.
//!
//! Documents are decoded leniently: a
//! missing or mistyped field becomes its
//! empty value and is logged, never
//! rejected.

use std::collections::BTreeMap;

use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  warn
};

use crate::config::FirestoreConfig;
use crate::project::ProjectRecord;

pub const TAGS_COLLECTION: &str = "tags";
pub const PROJECTS_COLLECTION: &str =
  "projects";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
  #[serde(default)]
  pub documents:       Vec<Document>,
  #[serde(default)]
  pub next_page_token: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
  pub name:   String,
  #[serde(default)]
  pub fields: BTreeMap<String, FieldValue>
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
  NullValue(()),
  BooleanValue(bool),
  IntegerValue(String),
  DoubleValue(f64),
  TimestampValue(String),
  StringValue(String),
  BytesValue(String),
  ReferenceValue(String),
  GeoPointValue(serde_json::Value),
  ArrayValue(ArrayValue),
  MapValue(MapValue)
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct ArrayValue {
  #[serde(default)]
  pub values: Vec<FieldValue>
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct MapValue {
  #[serde(default)]
  pub fields: BTreeMap<String, FieldValue>
}

impl FieldValue {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      | Self::StringValue(value) => {
        Some(value)
      }
      | _ => None
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      | Self::BooleanValue(value) => {
        Some(*value)
      }
      | _ => None
    }
  }
}

impl Document {
  /// The document id: last segment of the
  /// resource name.
  pub fn id(&self) -> &str {
    self
      .name
      .rsplit('/')
      .next()
      .unwrap_or(&self.name)
  }

  fn string_field(
    &self,
    key: &str
  ) -> Option<String> {
    self
      .fields
      .get(key)
      .and_then(FieldValue::as_str)
      .filter(|value| !value.is_empty())
      .map(str::to_string)
  }

  fn string_list_field(
    &self,
    key: &str
  ) -> Vec<String> {
    match self.fields.get(key) {
      | Some(FieldValue::ArrayValue(
        array
      )) => {
        array
          .values
          .iter()
          .filter_map(FieldValue::as_str)
          .map(str::to_string)
          .collect()
      }
      | Some(other) => {
        warn!(
          document = %self.id(),
          field = key,
          value = ?other,
          "expected an array field"
        );
        Vec::new()
      }
      | None => Vec::new()
    }
  }

  pub fn to_project_record(
    &self
  ) -> ProjectRecord {
    let title = self.id().to_string();

    let desc = self
      .string_field("desc")
      .unwrap_or_default();
    let repo = match self
      .string_field("repo")
    {
      | Some(repo) => repo,
      | None => {
        warn!(
          document = %title,
          "project has no repo link"
        );
        String::new()
      }
    };

    ProjectRecord {
      desc,
      repo,
      image: self.string_field("image"),
      sim: self.string_field("sim"),
      tags: self.string_list_field("tags"),
      featured: self
        .fields
        .get("featured")
        .and_then(FieldValue::as_bool)
        .unwrap_or(false),
      title
    }
  }
}

pub fn parse_list(
  body: &str
) -> anyhow::Result<ListDocumentsResponse>
{
  let response: ListDocumentsResponse =
    serde_json::from_str(body).context(
      "failed decoding firestore \
       document list"
    )?;

  if let Some(token) =
    response.next_page_token.as_deref()
  {
    warn!(
      next_page_token = token,
      returned = response.documents.len(),
      "document list truncated; raise \
       firestore.page_size"
    );
  }

  Ok(response)
}

pub fn tags_from_response(
  response: &ListDocumentsResponse
) -> Vec<String> {
  response
    .documents
    .iter()
    .map(|doc| doc.id().to_string())
    .collect()
}

pub fn projects_from_response(
  response: &ListDocumentsResponse
) -> Vec<ProjectRecord> {
  let records: Vec<_> = response
    .documents
    .iter()
    .map(Document::to_project_record)
    .collect();
  debug!(
    count = records.len(),
    "decoded project records"
  );
  records
}

/// REST URL listing every document of
/// `collection`.
pub fn collection_url(
  config: &FirestoreConfig,
  collection: &str
) -> String {
  let mut url = format!(
    "{}/projects/{}/databases/{}/documents/{}?pageSize={}",
    config.endpoint.trim_end_matches('/'),
    config.project_id,
    config.database,
    collection,
    config.page_size
  );
  if !config.api_key.is_empty() {
    url.push_str("&key=");
    url.push_str(&config.api_key);
  }
  url
}

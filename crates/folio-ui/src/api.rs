use anyhow::{
  Context,
  anyhow
};
use folio_core::config::FirestoreConfig;
use folio_core::document::{
  self,
  PROJECTS_COLLECTION,
  TAGS_COLLECTION
};
use folio_core::{
  ProjectRecord,
  ProjectStore
};
use gloo::net::http::Request;

/// Firestore over its REST API. Read only.
#[derive(Debug, Clone, PartialEq)]
pub struct FirestoreStore {
  config: FirestoreConfig
}

impl FirestoreStore {
  pub fn new(
    config: FirestoreConfig
  ) -> Self {
    Self {
      config
    }
  }

  async fn list(
    &self,
    collection: &str
  ) -> anyhow::Result<
    document::ListDocumentsResponse
  > {
    let url = document::collection_url(
      &self.config,
      collection
    );
    tracing::debug!(
      collection,
      "listing firestore collection"
    );

    let response = Request::get(&url)
      .send()
      .await
      .map_err(|e| {
        anyhow!("request error: {e}")
      })
      .with_context(|| {
        format!(
          "failed listing {collection}"
        )
      })?;

    if !response.ok() {
      return Err(anyhow!(
        "listing {collection} returned \
         HTTP {} {}",
        response.status(),
        response.status_text()
      ));
    }

    let body =
      response.text().await.map_err(
        |e| anyhow!("read error: {e}")
      )?;
    document::parse_list(&body)
  }
}

impl ProjectStore for FirestoreStore {
  async fn fetch_tags(
    &self
  ) -> anyhow::Result<Vec<String>> {
    let response =
      self.list(TAGS_COLLECTION).await?;
    Ok(document::tags_from_response(
      &response
    ))
  }

  async fn fetch_projects(
    &self
  ) -> anyhow::Result<Vec<ProjectRecord>>
  {
    let response = self
      .list(PROJECTS_COLLECTION)
      .await?;
    Ok(document::projects_from_response(
      &response
    ))
  }
}

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::ApiClient;
use super::Tracker;
use crate::error::MigrationError;
use crate::model::work_package::{
    ActivityResponse, CommentPayload, CreatedWorkPackage, Status, StatusCollection,
    WorkPackagePayload, WorkPackageResponse,
};

/// Writes into one OpenProject project. Creation requests pass `notify=false`
/// so the import does not flood watchers with mail.
pub struct OpenProjectTracker {
    api: ApiClient,
    project_id: String,
}

impl OpenProjectTracker {
    pub fn new(api: ApiClient, project_id: String) -> Self {
        Self { api, project_id }
    }

    fn work_packages_path(&self) -> String {
        format!(
            "/projects/{}/work_packages?notify=false",
            urlencoding::encode(&self.project_id)
        )
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        MigrationError::InvalidResponse {
            url: path.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl Tracker for OpenProjectTracker {
    fn name(&self) -> &str {
        "OpenProject"
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        let path = "/statuses";
        let collection: StatusCollection = decode(path, self.api.get(path).await?)?;
        Ok(collection
            .embedded
            .elements
            .into_iter()
            .map(|s| Status {
                name: s.name,
                href: s.links.self_link.href,
            })
            .collect())
    }

    async fn create_work_package(&self, payload: &WorkPackagePayload) -> Result<CreatedWorkPackage> {
        let path = self.work_packages_path();
        let resp: WorkPackageResponse = decode(&path, self.api.post(&path, payload).await?)?;
        Ok(CreatedWorkPackage {
            id: resp.id,
            href: resp.links.self_link.href,
        })
    }

    async fn add_comment(
        &self,
        work_package: &CreatedWorkPackage,
        payload: &CommentPayload,
    ) -> Result<String> {
        let path = format!("/work_packages/{}/activities?notify=false", work_package.id);
        let resp: ActivityResponse = decode(&path, self.api.post(&path, payload).await?)?;
        Ok(resp.links.self_link.href)
    }
}

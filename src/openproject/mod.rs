pub mod api;
pub mod client;
pub mod dry_run;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::model::work_package::{CommentPayload, CreatedWorkPackage, Status, WorkPackagePayload};

#[async_trait]
pub trait Tracker: Send + Sync {
    fn name(&self) -> &str;
    /// True when writes are printed rather than sent.
    fn echoes_payloads(&self) -> bool {
        false
    }
    async fn list_statuses(&self) -> Result<Vec<Status>>;
    async fn create_work_package(&self, payload: &WorkPackagePayload) -> Result<CreatedWorkPackage>;
    /// Adds a comment to a work package's activity stream. Returns the activity's self link.
    async fn add_comment(
        &self,
        work_package: &CreatedWorkPackage,
        payload: &CommentPayload,
    ) -> Result<String>;
}


pub fn create_tracker(settings: &Settings, dry_run: bool) -> Box<dyn Tracker> {
    let api = client::ApiClient::new(settings.api_endpoint.clone(), &settings.api_token);
    let live = Box::new(api::OpenProjectTracker::new(api, settings.project_id.clone()));
    if dry_run {
        return Box::new(dry_run::DryRunTracker::new(live));
    }
    live
}

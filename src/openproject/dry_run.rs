use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::Tracker;
use crate::model::work_package::{CommentPayload, CreatedWorkPackage, Status, WorkPackagePayload};

/// Reads from the wrapped tracker but prints every write instead of sending it.
pub struct DryRunTracker {
    inner: Box<dyn Tracker>,
    next_id: AtomicU64,
    out: Mutex<Box<dyn Write + Send>>,
}

impl DryRunTracker {
    pub fn new(inner: Box<dyn Tracker>) -> Self {
        Self::with_output(inner, Box::new(std::io::stdout()))
    }

    pub fn with_output(inner: Box<dyn Tracker>, out: Box<dyn Write + Send>) -> Self {
        Self {
            inner,
            next_id: AtomicU64::new(1),
            out: Mutex::new(out),
        }
    }

    fn print(&self, line: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow!("dry-run output lock poisoned"))?;
        writeln!(out, "{line}")?;
        Ok(())
    }
}

#[async_trait]
impl Tracker for DryRunTracker {
    fn name(&self) -> &str {
        "OpenProject (dry run)"
    }

    fn echoes_payloads(&self) -> bool {
        true
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        self.inner.list_statuses().await
    }

    async fn create_work_package(&self, payload: &WorkPackagePayload) -> Result<CreatedWorkPackage> {
        let json = serde_json::to_string(payload)?;
        if payload.links.parent.is_some() {
            self.print(&format!("\t{json}"))?;
        } else {
            self.print(&json)?;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(CreatedWorkPackage {
            id,
            href: format!("/api/v3/work_packages/{id}"),
        })
    }

    async fn add_comment(
        &self,
        work_package: &CreatedWorkPackage,
        payload: &CommentPayload,
    ) -> Result<String> {
        self.print(&format!("\t{}", serde_json::to_string(payload)?))?;
        Ok(format!("{}/activities", work_package.href))
    }
}

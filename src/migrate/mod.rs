//! Translation of a Wekan board into OpenProject work packages.
//!
//! Every card becomes one work package, each of its comments becomes an
//! activity on that work package, and the items of its first checklist become
//! child work packages. Requests are issued one at a time in export order and
//! the first failure ends the run; nothing already created is rolled back.

pub mod status;

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use anyhow::Result;

use crate::config::Mappings;
use crate::error::MigrationError;
use crate::model::wekan::{BoardExport, Card, ChecklistItem, Comment};
use crate::model::work_package::{
    CommentPayload, CreatedWorkPackage, Formattable, Link, WorkPackagePayload,
};
use crate::openproject::Tracker;
use crate::util::text::{date_part, mention, quoted_comment};
use status::StatusTable;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub work_packages: usize,
    pub comments: usize,
    pub subtasks: usize,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} work packages, {} comments, {} subtasks",
            self.work_packages, self.comments, self.subtasks
        )
    }
}

pub fn card_payload(
    card: &Card,
    statuses: &StatusTable,
    mappings: &Mappings,
) -> Result<WorkPackagePayload, MigrationError> {
    let status = statuses
        .for_list(&card.list_id)
        .ok_or_else(|| MigrationError::UnknownList {
            card_id: card.id.clone(),
            list_id: card.list_id.clone(),
        })?;

    let mut payload = WorkPackagePayload::new(card.title.clone(), Link::new(status));
    payload.start_date = Some(date_part(&card.created_at));
    payload.links.version = Some(Link::new(mappings.version.clone()));

    if let Some(description) = card.description() {
        payload.description = Some(Formattable {
            format: None,
            raw: description.to_string(),
        });
    }

    if let Some(due) = card.due_at() {
        payload.due_date = Some(date_part(due));
    }

    // Only the first member can become the assignee; unknown members are skipped.
    if let Some(member) = card.members.first() {
        match mappings.users.get(member) {
            Some(user) => payload.links.assignee = Some(Link::new(user.clone())),
            None => tracing::warn!(card = %card.id, %member, "no OpenProject user for card member"),
        }
    }

    Ok(payload)
}

pub fn comment_payload(
    comment: &Comment,
    users: &BTreeMap<String, String>,
) -> Result<CommentPayload, MigrationError> {
    let user = users
        .get(&comment.user_id)
        .ok_or_else(|| MigrationError::UnknownUser {
            user_id: comment.user_id.clone(),
        })?;
    Ok(CommentPayload::markdown(quoted_comment(
        &mention(user),
        &comment.created_at,
        &comment.text,
    )))
}

pub fn subtask_payload(
    item: &ChecklistItem,
    parent: &CreatedWorkPackage,
    statuses: &StatusTable,
    mappings: &Mappings,
) -> Result<WorkPackagePayload, MigrationError> {
    let status_name = if item.is_finished {
        &mappings.finished_status
    } else {
        &mappings.open_status
    };
    let mut payload =
        WorkPackagePayload::new(item.title.clone(), Link::new(statuses.named(status_name)?));
    payload.links.parent = Some(Link::new(parent.href.clone()));
    Ok(payload)
}

pub async fn run(
    board: &BoardExport,
    tracker: &dyn Tracker,
    mappings: &Mappings,
) -> Result<MigrationReport> {
    let mut stdout = io::stdout();
    run_with_output(board, tracker, mappings, &mut stdout).await
}

/// Same as [`run`], writing created links (or the dry-run card separators) to `out`.
pub async fn run_with_output(
    board: &BoardExport,
    tracker: &dyn Tracker,
    mappings: &Mappings,
    out: &mut dyn Write,
) -> Result<MigrationReport> {
    let remote = tracker.list_statuses().await?;
    let statuses = StatusTable::resolve(remote, &board.lists, &mappings.statuses)?;
    if !board.checklist_items.is_empty() {
        statuses.named(&mappings.finished_status)?;
        statuses.named(&mappings.open_status)?;
    }
    let echo_links = !tracker.echoes_payloads();

    tracing::info!(
        tracker = tracker.name(),
        cards = board.cards.len(),
        "starting migration"
    );

    let mut report = MigrationReport::default();

    for card in &board.cards {
        let payload = card_payload(card, &statuses, mappings)?;
        let created = tracker.create_work_package(&payload).await?;
        report.work_packages += 1;
        tracing::info!(card = %card.id, work_package = created.id, title = %card.title, "migrated card");
        if echo_links {
            writeln!(out, "{}", created.href)?;
        }

        for comment in board.comments_for(card) {
            let payload = comment_payload(comment, &mappings.users)?;
            let href = tracker.add_comment(&created, &payload).await?;
            report.comments += 1;
            if echo_links {
                writeln!(out, "\t{href}")?;
            }
        }

        if let Some(checklist) = board.first_checklist_for(card) {
            for item in board.items_for(checklist) {
                let payload = subtask_payload(item, &created, &statuses, mappings)?;
                let subtask = tracker.create_work_package(&payload).await?;
                report.subtasks += 1;
                if echo_links {
                    writeln!(out, "\t{}", subtask.href)?;
                }
            }
        }

        if !echo_links {
            writeln!(out)?;
        }
    }

    tracing::info!(%report, "migration finished");
    Ok(report)
}

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::error::MigrationError;

pub const SUPPORTED_FORMAT: &str = "wekan-board-1.0.0";

/// The subset of a Wekan board export that the migration reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardExport {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
}

#[derive(Debug, Deserialize)]
pub struct List {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub list_id: String,
    pub description: Option<String>,
    pub due_at: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub card_id: String,
    pub user_id: String,
    pub created_at: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(rename = "_id")]
    pub id: String,
    pub card_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub checklist_id: String,
    pub title: String,
    #[serde(default)]
    pub is_finished: bool,
}

impl BoardExport {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read board export {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Failed to load board export {}", path.display()))
    }

    /// The format marker is checked before the rest of the document is interpreted.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Board export is not valid JSON")?;
        let format = value.get("_format").and_then(Value::as_str);
        if format != Some(SUPPORTED_FORMAT) {
            return Err(MigrationError::UnsupportedFormat {
                found: format.map(String::from),
            }
            .into());
        }
        serde_json::from_value(value).context("Board export does not match the Wekan schema")
    }

    pub fn comments_for<'a>(&'a self, card: &'a Card) -> impl Iterator<Item = &'a Comment> + 'a {
        self.comments.iter().filter(move |c| c.card_id == card.id)
    }

    /// Only the first checklist attached to a card is migrated.
    pub fn first_checklist_for(&self, card: &Card) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.card_id == card.id)
    }

    pub fn items_for<'a>(
        &'a self,
        checklist: &'a Checklist,
    ) -> impl Iterator<Item = &'a ChecklistItem> + 'a {
        self.checklist_items
            .iter()
            .filter(move |i| i.checklist_id == checklist.id)
    }
}

impl Card {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn due_at(&self) -> Option<&str> {
        self.due_at.as_deref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"{
        "_format": "wekan-board-1.0.0",
        "lists": [{"_id": "l1", "title": "Doing"}],
        "cards": [
            {"_id": "c1", "title": "Fix bug", "createdAt": "2024-01-05T10:00:00.000Z",
             "listId": "l1", "members": [], "dueAt": null},
            {"_id": "c2", "title": "Write docs", "createdAt": "2024-01-06T09:00:00.000Z",
             "listId": "l1", "description": "", "members": ["u1"]}
        ],
        "comments": [
            {"cardId": "c2", "userId": "u1", "createdAt": "2024-01-06T09:30:00.000Z", "text": "a"},
            {"cardId": "c1", "userId": "u1", "createdAt": "2024-01-06T09:31:00.000Z", "text": "b"},
            {"cardId": "c2", "userId": "u1", "createdAt": "2024-01-06T09:32:00.000Z", "text": "c"}
        ],
        "checklists": [
            {"_id": "k1", "cardId": "c2"},
            {"_id": "k2", "cardId": "c2"}
        ],
        "checklistItems": [
            {"checklistId": "k2", "title": "second list item", "isFinished": false},
            {"checklistId": "k1", "title": "one", "isFinished": true},
            {"checklistId": "k1", "title": "two", "isFinished": false}
        ]
    }"#;

    #[test]
    fn parses_board() {
        let board = BoardExport::from_json_str(BOARD).unwrap();
        assert_eq!(board.lists.len(), 1);
        assert_eq!(board.cards[0].title, "Fix bug");
        assert_eq!(board.cards[0].list_id, "l1");
        assert_eq!(board.checklist_items.len(), 3);
        assert!(board.checklist_items[1].is_finished);
    }

    #[test]
    fn rejects_other_format_versions() {
        let json = BOARD.replace("wekan-board-1.0.0", "wekan-board-0.9.0");
        let err = BoardExport::from_json_str(&json).unwrap_err();
        match err.downcast_ref::<MigrationError>() {
            Some(MigrationError::UnsupportedFormat { found }) => {
                assert_eq!(found.as_deref(), Some("wekan-board-0.9.0"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_format_marker_before_schema() {
        // Schema mismatch would fail too; the format check must win.
        let err = BoardExport::from_json_str(r#"{"cards": 7}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MigrationError>(),
            Some(MigrationError::UnsupportedFormat { found: None })
        ));
    }

    #[test]
    fn empty_description_and_null_due_are_absent() {
        let board = BoardExport::from_json_str(BOARD).unwrap();
        assert_eq!(board.cards[0].description(), None);
        assert_eq!(board.cards[0].due_at(), None);
        assert_eq!(board.cards[1].description(), None);
    }

    #[test]
    fn comments_keep_export_order() {
        let board = BoardExport::from_json_str(BOARD).unwrap();
        let texts: Vec<_> = board
            .comments_for(&board.cards[1])
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn only_first_checklist_is_used() {
        let board = BoardExport::from_json_str(BOARD).unwrap();
        let checklist = board.first_checklist_for(&board.cards[1]).unwrap();
        assert_eq!(checklist.id, "k1");
        let titles: Vec<_> = board.items_for(checklist).map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["one", "two"]);
        assert!(board.first_checklist_for(&board.cards[0]).is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoardExport::load(&dir.path().join("board.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read board export"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, BOARD).unwrap();
        let board = BoardExport::load(&path).unwrap();
        assert_eq!(board.cards.len(), 2);
    }
}

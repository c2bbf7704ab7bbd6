//! Failures that abort a migration run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("Invalid Wekan board data: unsupported format {found:?}")]
    UnsupportedFormat { found: Option<String> },

    #[error("Wekan list {title:?} has no entry in the status mapping")]
    UnmappedList { title: String },

    #[error("OpenProject has no status named {name:?}")]
    UnknownStatus { name: String },

    #[error("Card {card_id} references unknown list {list_id}")]
    UnknownList { card_id: String, list_id: String },

    #[error("Comment author {user_id} has no entry in the user mapping")]
    UnknownUser { user_id: String },

    #[error("OpenProject request to {url} failed with {status}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unexpected OpenProject response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}

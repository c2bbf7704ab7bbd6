/// First `n` characters of `s`. Timestamps in the export are ISO-8601 strings,
/// so the date is taken positionally rather than parsed.
pub fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// `2024-01-05T10:00:00.000Z` -> `2024-01-05`
pub fn date_part(timestamp: &str) -> String {
    prefix(timestamp, 10)
}

/// `2024-01-05T10:00:00.000Z` -> `2024-01-05 at 10:00`
pub fn comment_timestamp(timestamp: &str) -> String {
    prefix(timestamp, 16).replace('T', " at ")
}

/// Turns a user link into OpenProject's mention form: `/api/v3/users/9` -> `user#9`.
pub fn mention(user_href: &str) -> String {
    user_href.chars().skip(8).collect::<String>().replace("s/", "#")
}

/// Markdown body for a migrated comment, attributing it to its original author.
pub fn quoted_comment(author: &str, timestamp: &str, text: &str) -> String {
    format!(
        "{author} posted on {}:\n> {}",
        comment_timestamp(timestamp),
        text.replace('\n', "\n> ")
    )
}

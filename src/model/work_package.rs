use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// OpenProject's formattable text: `{ "format": ..., "raw": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formattable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackagePayload {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Formattable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(rename = "_links")]
    pub links: WorkPackageLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkPackageLinks {
    pub status: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Link>,
}

impl WorkPackagePayload {
    pub fn new(subject: impl Into<String>, status: Link) -> Self {
        Self {
            subject: subject.into(),
            description: None,
            start_date: None,
            due_date: None,
            links: WorkPackageLinks {
                status,
                version: None,
                assignee: None,
                parent: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentPayload {
    pub comment: Formattable,
}

impl CommentPayload {
    pub fn markdown(raw: impl Into<String>) -> Self {
        Self {
            comment: Formattable {
                format: Some("markdown".into()),
                raw: raw.into(),
            },
        }
    }
}

/// A status as listed by `GET /statuses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub name: String,
    pub href: String,
}

/// A newly created work package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedWorkPackage {
    pub id: u64,
    pub href: String,
}

// HAL response shapes

#[derive(Debug, Deserialize)]
pub(crate) struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusCollection {
    #[serde(rename = "_embedded")]
    pub embedded: StatusElements,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusElements {
    pub elements: Vec<StatusElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusElement {
    pub name: String,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkPackageResponse {
    pub id: u64,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityResponse {
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_omits_optional_fields() {
        let payload = WorkPackagePayload::new("Fix bug", Link::new("/api/v3/statuses/7"));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "subject": "Fix bug",
                "_links": { "status": { "href": "/api/v3/statuses/7" } }
            })
        );
    }

    #[test]
    fn full_payload_uses_openproject_field_names() {
        let mut payload = WorkPackagePayload::new("Fix bug", Link::new("/s/1"));
        payload.description = Some(Formattable {
            format: None,
            raw: "details".into(),
        });
        payload.start_date = Some("2024-01-05".into());
        payload.due_date = Some("2024-02-01".into());
        payload.links.version = Some(Link::new("/v/8"));
        payload.links.assignee = Some(Link::new("/u/9"));

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["description"], json!({ "raw": "details" }));
        assert_eq!(value["startDate"], "2024-01-05");
        assert_eq!(value["dueDate"], "2024-02-01");
        assert_eq!(value["_links"]["version"]["href"], "/v/8");
        assert_eq!(value["_links"]["assignee"]["href"], "/u/9");
        assert!(value["_links"].get("parent").is_none());
    }

    #[test]
    fn comment_payload_is_markdown() {
        let value = serde_json::to_value(CommentPayload::markdown("hi")).unwrap();
        assert_eq!(value, json!({ "comment": { "format": "markdown", "raw": "hi" } }));
    }

    #[test]
    fn parses_status_collection() {
        let body = json!({
            "_type": "Collection",
            "_embedded": { "elements": [
                { "id": 1, "name": "New", "_links": { "self": { "href": "/api/v3/statuses/1", "title": "New" } } }
            ]}
        });
        let parsed: StatusCollection = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.embedded.elements[0].name, "New");
        assert_eq!(
            parsed.embedded.elements[0].links.self_link.href,
            "/api/v3/statuses/1"
        );
    }
}

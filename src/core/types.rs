use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        DocId(id.to_string())
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Message,
    Conversation,
    Document,
    SourcesSought,
    Proposal,
    Contract,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Message => "message",
            DocumentType::Conversation => "conversation",
            DocumentType::Document => "document",
            DocumentType::SourcesSought => "sources_sought",
            DocumentType::Proposal => "proposal",
            DocumentType::Contract => "contract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Public,
    Sensitive,
    Confidential,
    Secret,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Public => "public",
            Classification::Sensitive => "sensitive",
            Classification::Confidential => "confidential",
            Classification::Secret => "secret",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub summary: Option<String>,
    pub owner: Option<String>,
    pub conversation_id: Option<String>,
    pub language: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub word_count: Option<u32>,
    pub view_count: Option<u32>,
}

/// Principal lists controlling document visibility. Entries may be user ids
/// or role names; the permission filter checks both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPermissions {
    pub read: Vec<String>,
    pub write: Vec<String>,
    pub admin: Vec<String>,
}

impl DocumentPermissions {
    pub fn readable_by(&self, user_id: &str, roles: &[String]) -> bool {
        self.read.iter().any(|p| p == user_id)
            || roles.iter().any(|role| self.read.iter().any(|p| p == role))
    }
}

/// Document handed to the engine for indexing. The engine stores a copy and
/// never mutates it in place; updates are remove-then-add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub doc_type: DocumentType,
    pub classification: Classification,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub permissions: DocumentPermissions,
}

impl SearchDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        SearchDocument {
            id: DocId::new(id),
            title: title.into(),
            content: content.into(),
            doc_type: DocumentType::Document,
            classification: Classification::Public,
            metadata: DocumentMetadata::default(),
            permissions: DocumentPermissions::default(),
        }
    }

    /// Copy with content removed, for responses that exclude bodies.
    pub fn without_content(&self) -> Self {
        let mut doc = self.clone();
        doc.content = String::new();
        doc
    }
}

/// Structural fields that carry their own boost weight during scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    Content,
    Tags,
    Category,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_by_matches_user_id_or_role() {
        let perms = DocumentPermissions {
            read: vec!["user-1".to_string(), "analysts".to_string()],
            ..Default::default()
        };

        assert!(perms.readable_by("user-1", &[]));
        assert!(perms.readable_by("user-2", &["analysts".to_string()]));
        assert!(!perms.readable_by("user-2", &["engineers".to_string()]));
    }

    #[test]
    fn document_round_trips_through_json() {
        let mut doc = SearchDocument::new("d1", "Sources Sought Notice", "Body text");
        doc.doc_type = DocumentType::SourcesSought;
        doc.classification = Classification::Confidential;
        doc.metadata.tags = vec!["set-aside".to_string()];

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"sources_sought\""));
        assert!(json.contains("\"confidential\""));

        let back: SearchDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, doc.id);
        assert_eq!(back.metadata.tags, doc.metadata.tags);
    }

    #[test]
    fn without_content_strips_body_only() {
        let doc = SearchDocument::new("d1", "Title", "Body text");
        let stripped = doc.without_content();
        assert_eq!(stripped.title, "Title");
        assert!(stripped.content.is_empty());
    }
}

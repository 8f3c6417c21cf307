//! Storage abstraction for saved cards and user feedback.

mod memory;

pub use memory::MemoryStorage;

use crate::card::CardDocument;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use web_time::{SystemTime, UNIX_EPOCH};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Card not found: {0}")]
    CardNotFound(String),
    #[error("Feedback not found: {0}")]
    FeedbackNotFound(u64),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// User assumed when a card is created without one.
pub const DEFAULT_USER_ID: u64 = 1;

/// Maximum number of cards returned by [`CardStore::showcase_cards`].
pub const SHOWCASE_LIMIT: usize = 6;

/// Feedback status assigned on creation.
pub const FEEDBACK_STATUS_OPEN: &str = "open";

/// A saved card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub content: CardDocument,
    pub template_id: String,
    pub user_id: u64,
    /// Public identifier used in share links.
    pub share_id: String,
    pub is_public: bool,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
}

/// Data for a new card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub title: String,
    pub content: CardDocument,
    pub template_id: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// Partial card update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<CardDocument>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl CardUpdate {
    /// Apply this update to `card` in place.
    pub fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(content) = self.content {
            card.content = content;
        }
        if let Some(template_id) = self.template_id {
            card.template_id = template_id;
        }
        if let Some(is_public) = self.is_public {
            card.is_public = is_public;
        }
    }
}

/// Kind of user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Bug,
    Feature,
    Improvement,
    General,
}

/// Stored user feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub subject: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: String,
    pub created_at: u64,
}

/// Data for new feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Trait for card storage backends.
pub trait CardStore: Send + Sync {
    /// Cards owned by a user, oldest first.
    fn user_cards(&self, user_id: u64) -> BoxFuture<'_, StorageResult<Vec<Card>>>;

    /// Load a card by id.
    fn get_card(&self, id: u64) -> BoxFuture<'_, StorageResult<Card>>;

    /// Save a new card, assigning its id, share id and timestamp.
    fn create_card(&self, card: NewCard) -> BoxFuture<'_, StorageResult<Card>>;

    /// Apply a partial update to a card.
    fn update_card(&self, id: u64, update: CardUpdate) -> BoxFuture<'_, StorageResult<Card>>;

    /// Delete a card. Returns false if it did not exist.
    fn delete_card(&self, id: u64) -> BoxFuture<'_, StorageResult<bool>>;

    /// Load a card by its share id.
    fn card_by_share_id(&self, share_id: &str) -> BoxFuture<'_, StorageResult<Card>>;

    /// The first [`SHOWCASE_LIMIT`] public cards.
    fn showcase_cards(&self) -> BoxFuture<'_, StorageResult<Vec<Card>>>;

    /// Record feedback with status `open`.
    fn create_feedback(&self, feedback: NewFeedback) -> BoxFuture<'_, StorageResult<Feedback>>;

    /// All feedback, oldest first.
    fn all_feedback(&self) -> BoxFuture<'_, StorageResult<Vec<Feedback>>>;

    /// Load feedback by id.
    fn feedback_by_id(&self, id: u64) -> BoxFuture<'_, StorageResult<Feedback>>;
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// A new random share id.
pub(crate) fn new_share_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}

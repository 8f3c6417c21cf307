//! In-memory storage implementation.

use super::{
    BoxFuture, Card, CardStore, CardUpdate, DEFAULT_USER_ID, FEEDBACK_STATUS_OPEN, Feedback,
    NewCard, NewFeedback, SHOWCASE_LIMIT, StorageError, StorageResult, new_share_id, now_millis,
};
use crate::card::{Background, CardDocument, CardElement, Dimensions, ElementKind, ElementStyle};
use kurbo::{Point, Size};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    cards: Vec<Card>,
    feedback: Vec<Feedback>,
    next_card_id: u64,
    next_feedback_id: u64,
}

/// In-memory card storage for development and tests.
///
/// Ids are assigned sequentially from 1. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_card_id: 1,
                next_feedback_id: 1,
                ..Tables::default()
            }),
        }
    }
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage seeded with two public sample cards.
    pub fn with_sample_data() -> Self {
        let storage = Self::new();
        if let Ok(mut tables) = storage.tables.write() {
            for card in sample_cards() {
                insert_card(&mut tables, card);
            }
        }
        storage
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }
}

fn insert_card(tables: &mut Tables, new: NewCard) -> Card {
    let card = Card {
        id: tables.next_card_id,
        title: new.title,
        content: new.content,
        template_id: new.template_id,
        user_id: new.user_id.unwrap_or(DEFAULT_USER_ID),
        share_id: new_share_id(),
        is_public: new.is_public.unwrap_or(false),
        created_at: now_millis(),
    };
    tables.next_card_id += 1;
    tables.cards.push(card.clone());
    card
}

impl CardStore for MemoryStorage {
    fn user_cards(&self, user_id: u64) -> BoxFuture<'_, StorageResult<Vec<Card>>> {
        Box::pin(async move {
            let tables = self.read()?;
            Ok(tables
                .cards
                .iter()
                .filter(|card| card.user_id == user_id)
                .cloned()
                .collect())
        })
    }

    fn get_card(&self, id: u64) -> BoxFuture<'_, StorageResult<Card>> {
        Box::pin(async move {
            let tables = self.read()?;
            tables
                .cards
                .iter()
                .find(|card| card.id == id)
                .cloned()
                .ok_or_else(|| StorageError::CardNotFound(id.to_string()))
        })
    }

    fn create_card(&self, card: NewCard) -> BoxFuture<'_, StorageResult<Card>> {
        Box::pin(async move {
            let mut tables = self.write()?;
            let card = insert_card(&mut tables, card);
            log::debug!("created card {} ({})", card.id, card.share_id);
            Ok(card)
        })
    }

    fn update_card(&self, id: u64, update: CardUpdate) -> BoxFuture<'_, StorageResult<Card>> {
        Box::pin(async move {
            let mut tables = self.write()?;
            let card = tables
                .cards
                .iter_mut()
                .find(|card| card.id == id)
                .ok_or_else(|| StorageError::CardNotFound(id.to_string()))?;
            update.apply(card);
            Ok(card.clone())
        })
    }

    fn delete_card(&self, id: u64) -> BoxFuture<'_, StorageResult<bool>> {
        Box::pin(async move {
            let mut tables = self.write()?;
            let before = tables.cards.len();
            tables.cards.retain(|card| card.id != id);
            Ok(tables.cards.len() != before)
        })
    }

    fn card_by_share_id(&self, share_id: &str) -> BoxFuture<'_, StorageResult<Card>> {
        let share_id = share_id.to_string();
        Box::pin(async move {
            let tables = self.read()?;
            tables
                .cards
                .iter()
                .find(|card| card.share_id == share_id)
                .cloned()
                .ok_or(StorageError::CardNotFound(share_id))
        })
    }

    fn showcase_cards(&self) -> BoxFuture<'_, StorageResult<Vec<Card>>> {
        Box::pin(async move {
            let tables = self.read()?;
            Ok(tables
                .cards
                .iter()
                .filter(|card| card.is_public)
                .take(SHOWCASE_LIMIT)
                .cloned()
                .collect())
        })
    }

    fn create_feedback(&self, feedback: NewFeedback) -> BoxFuture<'_, StorageResult<Feedback>> {
        Box::pin(async move {
            let mut tables = self.write()?;
            let feedback = Feedback {
                id: tables.next_feedback_id,
                kind: feedback.kind,
                subject: feedback.subject,
                description: feedback.description,
                email: feedback.email.filter(|email| !email.is_empty()),
                user_agent: feedback.user_agent,
                url: feedback.url,
                status: FEEDBACK_STATUS_OPEN.to_string(),
                created_at: now_millis(),
            };
            tables.next_feedback_id += 1;
            tables.feedback.push(feedback.clone());
            Ok(feedback)
        })
    }

    fn all_feedback(&self) -> BoxFuture<'_, StorageResult<Vec<Feedback>>> {
        Box::pin(async move { Ok(self.read()?.feedback.clone()) })
    }

    fn feedback_by_id(&self, id: u64) -> BoxFuture<'_, StorageResult<Feedback>> {
        Box::pin(async move {
            let tables = self.read()?;
            tables
                .feedback
                .iter()
                .find(|feedback| feedback.id == id)
                .cloned()
                .ok_or(StorageError::FeedbackNotFound(id))
        })
    }
}

fn sample_text(content: &str, font_size: f64, bold: bool, color: &str, rect: (f64, f64, f64, f64)) -> CardElement {
    let (x, y, w, h) = rect;
    let style = ElementStyle {
        font_size: Some(font_size),
        font_weight: bold.then(|| "bold".to_string()),
        color: Some(color.to_string()),
        ..ElementStyle::placed(Point::new(x, y), Size::new(w, h))
    };
    CardElement::new(ElementKind::Text, content, style)
}

fn sample_cards() -> Vec<NewCard> {
    vec![
        NewCard {
            title: "Welcome card".to_string(),
            content: CardDocument::new(Dimensions::new(400, 300))
                .with_background(Background::solid("#ffffff"))
                .with_elements(vec![
                    sample_text("Welcome to the card generator!", 24.0, true, "#333333", (50.0, 50.0, 300.0, 50.0))
                        .with_id("text1"),
                ]),
            template_id: "default".to_string(),
            user_id: Some(DEFAULT_USER_ID),
            is_public: Some(true),
        },
        NewCard {
            title: "Sample business card".to_string(),
            content: CardDocument::new(Dimensions::new(350, 200))
                .with_background(Background::solid("#f8f9fa"))
                .with_elements(vec![
                    sample_text("John Doe", 20.0, true, "#2c3e50", (30.0, 30.0, 200.0, 30.0)).with_id("name"),
                    sample_text("CEO & Founder", 14.0, false, "#7f8c8d", (30.0, 70.0, 200.0, 20.0))
                        .with_id("title"),
                ]),
            template_id: "business".to_string(),
            user_id: Some(DEFAULT_USER_ID),
            is_public: Some(true),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FeedbackKind;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    fn new_card(title: &str) -> NewCard {
        NewCard {
            title: title.to_string(),
            content: CardDocument::default(),
            template_id: "clean-quote".to_string(),
            user_id: None,
            is_public: None,
        }
    }

    #[test]
    fn test_create_assigns_defaults() {
        let storage = MemoryStorage::new();
        let card = block_on(storage.create_card(new_card("a"))).unwrap();
        assert_eq!(card.id, 1);
        assert_eq!(card.user_id, DEFAULT_USER_ID);
        assert!(!card.is_public);
        assert_eq!(card.share_id.len(), 12);

        let second = block_on(storage.create_card(new_card("b"))).unwrap();
        assert_eq!(second.id, 2);
        assert_ne!(second.share_id, card.share_id);
    }

    #[test]
    fn test_get_and_share_lookup() {
        let storage = MemoryStorage::new();
        let card = block_on(storage.create_card(new_card("a"))).unwrap();

        assert_eq!(block_on(storage.get_card(card.id)).unwrap(), card);
        assert_eq!(block_on(storage.card_by_share_id(&card.share_id)).unwrap(), card);
        assert!(matches!(block_on(storage.get_card(99)), Err(StorageError::CardNotFound(_))));
        assert!(matches!(
            block_on(storage.card_by_share_id("nope")),
            Err(StorageError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_update() {
        let storage = MemoryStorage::new();
        let card = block_on(storage.create_card(new_card("a"))).unwrap();
        let update = CardUpdate {
            title: Some("renamed".to_string()),
            is_public: Some(true),
            ..CardUpdate::default()
        };
        let updated = block_on(storage.update_card(card.id, update)).unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.is_public);
        assert_eq!(updated.template_id, card.template_id);
        assert!(block_on(storage.update_card(42, CardUpdate::default())).is_err());
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();
        let card = block_on(storage.create_card(new_card("a"))).unwrap();
        assert!(block_on(storage.delete_card(card.id)).unwrap());
        assert!(!block_on(storage.delete_card(card.id)).unwrap());
        assert!(block_on(storage.get_card(card.id)).is_err());
    }

    #[test]
    fn test_user_cards_and_showcase() {
        let storage = MemoryStorage::new();
        for i in 0..8 {
            let mut card = new_card(&format!("card {i}"));
            card.is_public = Some(true);
            card.user_id = Some(if i % 2 == 0 { 1 } else { 2 });
            block_on(storage.create_card(card)).unwrap();
        }
        block_on(storage.create_card(new_card("private"))).unwrap();

        assert_eq!(block_on(storage.user_cards(2)).unwrap().len(), 4);
        let showcase = block_on(storage.showcase_cards()).unwrap();
        assert_eq!(showcase.len(), SHOWCASE_LIMIT);
        assert_eq!(showcase[0].title, "card 0");
    }

    #[test]
    fn test_sample_data() {
        let storage = MemoryStorage::with_sample_data();
        let cards = block_on(storage.user_cards(DEFAULT_USER_ID)).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Welcome card");
        assert_eq!(cards[1].content.len(), 2);
        assert_eq!(cards[1].content.dimensions, Dimensions::new(350, 200));

        let next = block_on(storage.create_card(new_card("next"))).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_feedback() {
        let storage = MemoryStorage::new();
        let feedback = block_on(storage.create_feedback(NewFeedback {
            kind: FeedbackKind::Bug,
            subject: "Crash".to_string(),
            description: "Undo crashes".to_string(),
            email: Some(String::new()),
            user_agent: None,
            url: None,
        }))
        .unwrap();
        assert_eq!(feedback.id, 1);
        assert_eq!(feedback.status, FEEDBACK_STATUS_OPEN);
        assert_eq!(feedback.email, None);

        assert_eq!(block_on(storage.all_feedback()).unwrap().len(), 1);
        assert_eq!(block_on(storage.feedback_by_id(1)).unwrap(), feedback);
        assert!(matches!(
            block_on(storage.feedback_by_id(2)),
            Err(StorageError::FeedbackNotFound(2))
        ));
    }
}

//! Versioned card document with linear undo/redo history.

use crate::card::CardDocument;
use std::sync::Arc;

/// Linear history of committed card documents.
///
/// Every committed version is kept as an immutable snapshot. The entry at
/// `index` is always the current document, so undo and redo are pointer moves.
/// Committing after an undo discards the redo tail.
#[derive(Debug, Clone)]
pub struct CardHistory {
    entries: Vec<Arc<CardDocument>>,
    index: usize,
    /// Maximum number of entries to keep, oldest dropped first.
    limit: Option<usize>,
}

impl Default for CardHistory {
    fn default() -> Self {
        Self::new(CardDocument::default())
    }
}

impl CardHistory {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: CardDocument) -> Self {
        Self {
            entries: vec![Arc::new(initial)],
            index: 0,
            limit: None,
        }
    }

    /// Start a history that keeps at most `limit` entries.
    pub fn with_limit(initial: CardDocument, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// The current document.
    pub fn current(&self) -> &Arc<CardDocument> {
        &self.entries[self.index]
    }

    /// Apply `mutator` to the current document and make the result current.
    ///
    /// The previous snapshot is never touched; the redo tail is discarded.
    pub fn commit<F>(&mut self, mutator: F) -> Arc<CardDocument>
    where
        F: FnOnce(&CardDocument) -> CardDocument,
    {
        let next = Arc::new(mutator(self.current()));
        self.entries.truncate(self.index + 1);
        self.entries.push(Arc::clone(&next));

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
            }
        }
        self.index = self.entries.len() - 1;

        log::debug!("history commit -> {}/{}", self.index + 1, self.entries.len());
        next
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if already at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if already at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All snapshots, oldest first.
    pub fn entries(&self) -> &[Arc<CardDocument>] {
        &self.entries
    }

    /// Throw away all history and start over from `document`.
    pub fn reset(&mut self, document: CardDocument) {
        self.entries = vec![Arc::new(document)];
        self.index = 0;
    }
}

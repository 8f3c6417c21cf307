//! CardCraft Core Library
//!
//! Card document model, undo/redo history, the layout assistant used while
//! dragging and aligning elements, and the editing session that ties them
//! together. Also hosts the template catalog, share links, locale context and
//! the card storage abstraction used by the server.

pub mod card;
pub mod context;
pub mod events;
pub mod history;
pub mod layout;
pub mod locale;
pub mod selection;
pub mod session;
pub mod share;
pub mod storage;
pub mod templates;

pub use card::{
    Background, BackgroundKind, CardDocument, CardElement, DEFAULT_DIMENSIONS, DEFAULT_ELEMENT_SIZE, Dimensions,
    ElementId, ElementKind, ElementStyle, ElementUpdate, MIN_ELEMENT_DIMENSION,
};
pub use context::{AnalyticsSink, AppContext, LogAnalytics, NoopAnalytics};
pub use events::{Observers, SubscriptionId};
pub use history::CardHistory;
pub use layout::{
    AlignmentKind, AlignmentSuggestion, Axis, Direction, GuideStyle, LayoutAssistant, LayoutConfig,
    LayoutGuide, SnapKind, SnapOutcome, SnapPoint,
};
pub use locale::{Language, LocaleContext};
pub use selection::{Corner, Edge, Handle, HandleKind, resize_rect};
pub use session::{EditorSession, EditorState, SessionConfig, SessionEvent};
pub use share::{
    SharePlatform, ShareOptions, UnknownPlatform, card_share_url, clipboard_text, share_url,
};
pub use storage::{CardStore, MemoryStorage, StorageError, StorageResult};
pub use templates::{Template, TemplateCatalog, TemplateCategory};

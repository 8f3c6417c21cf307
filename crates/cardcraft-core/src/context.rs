//! Application context passed explicitly to hosts: locale and analytics.

use crate::locale::{Language, LocaleContext};
use std::fmt;
use std::sync::Arc;

/// Destination for usage analytics.
pub trait AnalyticsSink: Send + Sync {
    /// Record a page view.
    fn track_page_view(&self, path: &str);

    /// Record a named event with an optional label.
    fn track_event(&self, category: &str, action: &str, label: Option<&str>);
}

/// Analytics sink that writes to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn track_page_view(&self, path: &str) {
        log::info!(target: "analytics", "page view {path}");
    }

    fn track_event(&self, category: &str, action: &str, label: Option<&str>) {
        log::info!(target: "analytics", "{category}/{action} {}", label.unwrap_or("-"));
    }
}

/// Analytics sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track_page_view(&self, _path: &str) {}

    fn track_event(&self, _category: &str, _action: &str, _label: Option<&str>) {}
}

/// Locale and analytics for one host.
pub struct AppContext {
    pub locale: LocaleContext,
    analytics: Arc<dyn AnalyticsSink>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Language::default(), Arc::new(LogAnalytics))
    }
}

impl AppContext {
    pub fn new(language: Language, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            locale: LocaleContext::new(language),
            analytics,
        }
    }

    pub fn analytics(&self) -> &dyn AnalyticsSink {
        self.analytics.as_ref()
    }

    /// Translate a key in the current language.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.locale.t(key)
    }
}

//! Interface language and translations.

use crate::events::{Observers, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        // Accept region-qualified tags such as `zh-CN` or `en_US`.
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == primary)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// key, English, Chinese
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("templateLibrary", "Template Library", "模板库"),
    ("allTemplates", "All Templates", "全部模板"),
    ("quoteCards", "Quote Cards", "名言引用"),
    ("knowledgeCards", "Knowledge Cards", "知识卡片"),
    ("tutorialCards", "Tutorial Cards", "教程步骤"),
    ("statsCards", "Stats Cards", "数据统计"),
    ("listCards", "List Cards", "列表清单"),
    ("profileCards", "Profile Cards", "个人简介"),
    ("comparisonCards", "Comparison Cards", "对比分析"),
    ("questionCards", "Question Cards", "问答互动"),
    ("blankCanvas", "Blank Canvas", "空白画布"),
    ("zoom", "Zoom", "缩放"),
    ("download", "Download", "下载"),
    ("share", "Share", "分享"),
    ("undo", "Undo", "撤销"),
    ("redo", "Redo", "重做"),
    ("properties", "Properties", "属性"),
    ("background", "Background", "背景"),
    ("fontSize", "Font Size", "字体大小"),
    ("fontWeight", "Font Weight", "字体粗细"),
    ("fontFamily", "Font Family", "字体系列"),
    ("color", "Color", "颜色"),
    ("textAlign", "Text Align", "文本对齐"),
    ("position", "Position", "位置"),
    ("size", "Size", "尺寸"),
    ("save", "Save", "保存"),
    ("cancel", "Cancel", "取消"),
    ("delete", "Delete", "删除"),
    ("edit", "Edit", "编辑"),
    ("title", "Title", "标题"),
    ("content", "Content", "内容"),
];

/// Look up `key` in `language`. Returns `None` for unknown keys.
pub fn translate(language: Language, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(_, en, zh)| match language {
            Language::En => en,
            Language::Zh => zh,
        })
}

/// Current interface language with change notification.
#[derive(Debug, Default)]
pub struct LocaleContext {
    language: Language,
    observers: Observers<Language>,
}

impl LocaleContext {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            observers: Observers::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and notify subscribers.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        log::debug!("language set to {language}");
        self.observers.publish(&language);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Language) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Translate `key`; unknown keys come back unchanged.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parse_language() {
        assert_eq!("zh".parse::<Language>(), Ok(Language::Zh));
        assert_eq!("zh-CN".parse::<Language>(), Ok(Language::Zh));
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_translate() {
        let mut locale = LocaleContext::default();
        assert_eq!(locale.t("undo"), "Undo");
        locale.set_language(Language::Zh);
        assert_eq!(locale.t("undo"), "撤销");
        assert_eq!(locale.t("no-such-key"), "no-such-key");
    }

    #[test]
    fn test_every_key_translated() {
        for (key, en, zh) in TRANSLATIONS {
            assert!(!en.is_empty() && !zh.is_empty(), "missing translation for {key}");
        }
    }

    #[test]
    fn test_language_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut locale = LocaleContext::new(Language::En);
        let sink = Arc::clone(&seen);
        let id = locale.subscribe(move |lang| sink.lock().unwrap().push(*lang));

        locale.set_language(Language::Zh);
        locale.unsubscribe(id);
        locale.set_language(Language::En);

        assert_eq!(*seen.lock().unwrap(), vec![Language::Zh]);
    }
}

//! Public card links and social share intents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SHARE_TITLE: &str = "使用 CardCraft 制作的精美卡片";
pub const DEFAULT_SHARE_DESCRIPTION: &str = "快速制作专业的视觉卡片，用于社交媒体和内容创作";

/// Public URL of a shared card.
pub fn card_share_url(base: &str, share_id: &str) -> String {
    format!("{}/card/{share_id}", base.trim_end_matches('/'))
}

/// Platforms a card can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Linkedin,
    Weibo,
    /// No intent URL; share text goes to the clipboard.
    Wechat,
}

impl SharePlatform {
    pub fn name(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "twitter",
            SharePlatform::Facebook => "facebook",
            SharePlatform::Linkedin => "linkedin",
            SharePlatform::Weibo => "weibo",
            SharePlatform::Wechat => "wechat",
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown share platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for SharePlatform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(SharePlatform::Twitter),
            "facebook" => Ok(SharePlatform::Facebook),
            "linkedin" => Ok(SharePlatform::Linkedin),
            "weibo" => Ok(SharePlatform::Weibo),
            "wechat" => Ok(SharePlatform::Wechat),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Text attached to a share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl ShareOptions {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_SHARE_TITLE)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_SHARE_DESCRIPTION)
    }
}

/// Intent URL for sharing `page_url` on `platform`.
///
/// Returns `Ok(None)` for platforms without an intent URL.
pub fn share_url(
    platform: SharePlatform,
    page_url: &str,
    options: &ShareOptions,
) -> Result<Option<Url>, url::ParseError> {
    let title = options.title();
    let url = match platform {
        SharePlatform::Twitter => {
            let hashtags = options.hashtags.join(",");
            let mut params = vec![("text", title), ("url", page_url)];
            if !hashtags.is_empty() {
                params.push(("hashtags", hashtags.as_str()));
            }
            Url::parse_with_params("https://twitter.com/intent/tweet", &params)?
        }
        SharePlatform::Facebook => Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", page_url), ("quote", title)],
        )?,
        SharePlatform::Linkedin => Url::parse_with_params(
            "https://www.linkedin.com/sharing/share-offsite/",
            &[
                ("url", page_url),
                ("title", title),
                ("summary", options.description()),
            ],
        )?,
        SharePlatform::Weibo => {
            let text = format!("{title} {page_url}");
            Url::parse_with_params(
                "https://service.weibo.com/share/share.php",
                &[("url", page_url), ("title", text.as_str())],
            )?
        }
        SharePlatform::Wechat => return Ok(None),
    };
    Ok(Some(url))
}

/// Text copied to the clipboard for platforms without an intent URL.
pub fn clipboard_text(page_url: &str, options: &ShareOptions) -> String {
    format!("{}\n{}\n{page_url}", options.title(), options.description())
}

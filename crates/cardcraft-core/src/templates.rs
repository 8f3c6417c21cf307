//! Built-in card templates and social platform presets.

use crate::card::{Background, CardDocument, CardElement, Dimensions, ElementStyle, ElementKind};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Template category, serialized by its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateCategory {
    #[serde(rename = "Quote Cards")]
    Quote,
    #[serde(rename = "Knowledge Cards")]
    Knowledge,
    #[serde(rename = "Tutorial Cards")]
    Tutorial,
    #[serde(rename = "Stats Cards")]
    Stats,
    #[serde(rename = "List Cards")]
    List,
    #[serde(rename = "Profile Cards")]
    Profile,
    #[serde(rename = "Comparison Cards")]
    Comparison,
    #[serde(rename = "Question Cards")]
    Question,
    #[serde(rename = "Social Media Cards")]
    SocialMedia,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 9] = [
        TemplateCategory::Quote,
        TemplateCategory::Knowledge,
        TemplateCategory::Tutorial,
        TemplateCategory::Stats,
        TemplateCategory::List,
        TemplateCategory::Profile,
        TemplateCategory::Comparison,
        TemplateCategory::Question,
        TemplateCategory::SocialMedia,
    ];

    /// Display name, also used as the category id.
    pub fn name(self) -> &'static str {
        match self {
            TemplateCategory::Quote => "Quote Cards",
            TemplateCategory::Knowledge => "Knowledge Cards",
            TemplateCategory::Tutorial => "Tutorial Cards",
            TemplateCategory::Stats => "Stats Cards",
            TemplateCategory::List => "List Cards",
            TemplateCategory::Profile => "Profile Cards",
            TemplateCategory::Comparison => "Comparison Cards",
            TemplateCategory::Question => "Question Cards",
            TemplateCategory::SocialMedia => "Social Media Cards",
        }
    }

    /// Parse a category from its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// A named starting document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TemplateCategory,
    #[serde(rename = "content")]
    pub document: CardDocument,
}

/// The set of templates offered to users.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Catalog with the built-in templates.
    pub fn builtin() -> Self {
        Self::new(builtin_templates())
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates in a category. `"all"` returns everything; unknown names
    /// return nothing.
    pub fn by_category(&self, category: &str) -> Vec<&Template> {
        if category == "all" {
            return self.templates.iter().collect();
        }
        match TemplateCategory::from_name(category) {
            Some(category) => self.templates.iter().filter(|t| t.category == category).collect(),
            None => Vec::new(),
        }
    }

    /// A new document from a template, with fresh element ids.
    pub fn instantiate(&self, id: &str) -> Option<CardDocument> {
        self.get(id).map(|t| t.document.with_fresh_ids())
    }
}

/// An empty document with the default background.
pub fn blank(dimensions: Dimensions) -> CardDocument {
    CardDocument::new(dimensions)
}

/// Card sizes for social platforms: platform, format, dimensions.
pub const SOCIAL_PRESETS: &[(&str, &str, Dimensions)] = &[
    ("instagram", "post", Dimensions::new(400, 400)),
    ("instagram", "story", Dimensions::new(360, 640)),
    ("instagram", "reel", Dimensions::new(360, 640)),
    ("twitter", "post", Dimensions::new(400, 300)),
    ("twitter", "header", Dimensions::new(600, 200)),
    ("linkedin", "post", Dimensions::new(400, 300)),
    ("linkedin", "article", Dimensions::new(500, 300)),
    ("facebook", "post", Dimensions::new(400, 300)),
    ("facebook", "cover", Dimensions::new(600, 300)),
];

/// Look up the preset size for a platform format.
pub fn social_dimensions(platform: &str, format: &str) -> Option<Dimensions> {
    SOCIAL_PRESETS
        .iter()
        .find(|(p, f, _)| p.eq_ignore_ascii_case(platform) && f.eq_ignore_ascii_case(format))
        .map(|&(_, _, dims)| dims)
}

struct Text {
    id: &'static str,
    content: &'static str,
    font_size: f64,
    weight: &'static str,
    color: &'static str,
    align: &'static str,
    rect: (f64, f64, f64, f64),
}

impl Text {
    fn build(self) -> CardElement {
        let (x, y, w, h) = self.rect;
        let style = ElementStyle {
            font_size: Some(self.font_size),
            font_weight: Some(self.weight.to_string()),
            font_family: Some("Inter".to_string()),
            color: Some(self.color.to_string()),
            text_align: Some(self.align.to_string()),
            ..ElementStyle::placed(Point::new(x, y), Size::new(w, h))
        };
        CardElement::new(ElementKind::Text, self.content, style).with_id(self.id)
    }
}

fn template(
    id: &'static str,
    name: &'static str,
    category: TemplateCategory,
    (start, end): (&str, &str),
    dimensions: Dimensions,
    texts: Vec<Text>,
) -> Template {
    let document = CardDocument::new(dimensions)
        .with_background(Background::gradient(start, end))
        .with_elements(texts.into_iter().map(Text::build).collect());
    Template {
        id,
        name,
        category,
        document,
    }
}

fn builtin_templates() -> Vec<Template> {
    let card = Dimensions::new(400, 500);
    vec![
        template(
            "clean-quote",
            "Clean Quote",
            TemplateCategory::Quote,
            ("#3B82F6", "#2563EB"),
            card,
            vec![
                Text {
                    id: "quote-text",
                    content: "The best way to predict the future is to create it yourself.",
                    font_size: 20.0,
                    weight: "500",
                    color: "#FFFFFF",
                    align: "left",
                    rect: (32.0, 100.0, 336.0, 120.0),
                },
                Text {
                    id: "author-text",
                    content: "— Peter Drucker",
                    font_size: 14.0,
                    weight: "500",
                    color: "#DBEAFE",
                    align: "left",
                    rect: (32.0, 240.0, 200.0, 24.0),
                },
            ],
        ),
        template(
            "modern-quote",
            "Modern Quote",
            TemplateCategory::Quote,
            ("#6366F1", "#4F46E5"),
            card,
            vec![
                Text {
                    id: "quote-text",
                    content: "Innovation distinguishes between a leader and a follower.",
                    font_size: 22.0,
                    weight: "600",
                    color: "#FFFFFF",
                    align: "center",
                    rect: (32.0, 180.0, 336.0, 100.0),
                },
                Text {
                    id: "author-text",
                    content: "Steve Jobs",
                    font_size: 14.0,
                    weight: "400",
                    color: "#E0E7FF",
                    align: "center",
                    rect: (32.0, 300.0, 336.0, 24.0),
                },
            ],
        ),
        template(
            "bullet-list",
            "Bullet List",
            TemplateCategory::List,
            ("#10B981", "#059669"),
            card,
            vec![
                Text {
                    id: "title-text",
                    content: "Key Benefits",
                    font_size: 24.0,
                    weight: "700",
                    color: "#FFFFFF",
                    align: "left",
                    rect: (32.0, 40.0, 336.0, 32.0),
                },
                Text {
                    id: "list-text",
                    content: "• Increase productivity\n• Better collaboration\n• Faster decision making\n• Improved outcomes",
                    font_size: 16.0,
                    weight: "400",
                    color: "#D1FAE5",
                    align: "left",
                    rect: (32.0, 100.0, 336.0, 160.0),
                },
            ],
        ),
        template(
            "profile-card",
            "Profile Card",
            TemplateCategory::Profile,
            ("#8B5CF6", "#7C3AED"),
            card,
            vec![
                Text {
                    id: "name-text",
                    content: "Sarah Johnson",
                    font_size: 28.0,
                    weight: "700",
                    color: "#FFFFFF",
                    align: "center",
                    rect: (32.0, 220.0, 336.0, 36.0),
                },
                Text {
                    id: "title-text",
                    content: "UX Designer",
                    font_size: 16.0,
                    weight: "400",
                    color: "#DDD6FE",
                    align: "center",
                    rect: (32.0, 270.0, 336.0, 24.0),
                },
                Text {
                    id: "description-text",
                    content: "Passionate about creating user-centered design solutions",
                    font_size: 14.0,
                    weight: "400",
                    color: "#C4B5FD",
                    align: "center",
                    rect: (32.0, 310.0, 336.0, 60.0),
                },
            ],
        ),
        template(
            "tech-tutorial",
            "Tech Tutorial",
            TemplateCategory::Tutorial,
            ("#F97316", "#EA580C"),
            card,
            vec![
                Text {
                    id: "title-text",
                    content: "React Best Practices",
                    font_size: 24.0,
                    weight: "700",
                    color: "#FFFFFF",
                    align: "left",
                    rect: (32.0, 40.0, 336.0, 32.0),
                },
                Text {
                    id: "step-text",
                    content: "1. Use functional components\n2. Implement proper hooks\n3. Optimize performance\n4. Write clean code",
                    font_size: 16.0,
                    weight: "400",
                    color: "#FED7AA",
                    align: "left",
                    rect: (32.0, 100.0, 336.0, 160.0),
                },
            ],
        ),
        template(
            "follower-stats",
            "Follower Stats",
            TemplateCategory::Stats,
            ("#10B981", "#059669"),
            Dimensions::new(400, 400),
            vec![
                Text {
                    id: "stat-number",
                    content: "+2.5K",
                    font_size: 48.0,
                    weight: "700",
                    color: "#FFFFFF",
                    align: "center",
                    rect: (40.0, 100.0, 320.0, 60.0),
                },
                Text {
                    id: "stat-label",
                    content: "New Followers",
                    font_size: 20.0,
                    weight: "500",
                    color: "#D1FAE5",
                    align: "center",
                    rect: (40.0, 170.0, 320.0, 28.0),
                },
                Text {
                    id: "stat-detail",
                    content: "This month • +18% growth",
                    font_size: 14.0,
                    weight: "400",
                    color: "#A7F3D0",
                    align: "center",
                    rect: (40.0, 220.0, 320.0, 24.0),
                },
            ],
        ),
    ]
}

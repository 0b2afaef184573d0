use std::fmt;

use serde::{Deserialize, Serialize};

/// Routing discriminant for a keyword category.
///
/// Declaration order is the display order of the market panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Color,
    Material,
    Stone,
    Craftsmanship,
    Style,
    Element,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Color,
        CategoryKey::Material,
        CategoryKey::Stone,
        CategoryKey::Craftsmanship,
        CategoryKey::Style,
        CategoryKey::Element,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Color => "color",
            CategoryKey::Material => "material",
            CategoryKey::Stone => "stone",
            CategoryKey::Craftsmanship => "craftsmanship",
            CategoryKey::Style => "style",
            CategoryKey::Element => "element",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.trim().to_lowercase();
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == lowered)
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryKey::Color => "颜色 (Color)",
            CategoryKey::Material => "材质 (Material)",
            CategoryKey::Stone => "石头 (Stone)",
            CategoryKey::Craftsmanship => "工艺 (Craftsmanship)",
            CategoryKey::Style => "风格 (Style)",
            CategoryKey::Element => "元素 (Element)",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTerm {
    pub name: String,
    pub count: usize,
}

impl KeywordTerm {
    pub fn new(name: impl Into<String>) -> Self {
        KeywordTerm {
            name: name.into(),
            count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub key: CategoryKey,
    pub label: String,
    pub items: Vec<KeywordTerm>,
}

impl KeywordCategory {
    pub fn contains_name(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.items
            .iter()
            .any(|item| item.name.to_lowercase() == lowered)
    }
}

fn seed_terms(key: CategoryKey) -> &'static [&'static str] {
    match key {
        CategoryKey::Color => &[
            "Rose Gold (玫瑰金)",
            "Silver White (银白)",
            "Emerald Green (祖母绿)",
            "Royal Blue (皇家蓝)",
            "Ruby Red (宝石红)",
            "Black (黑色)",
        ],
        CategoryKey::Material => &[
            "18K Gold (18K金)",
            "925 Silver (925银)",
            "Platinum (铂金)",
            "Brass (黄铜)",
            "Titanium (钛金)",
        ],
        CategoryKey::Stone => &[
            "Diamond (钻石)",
            "Moissanite (莫桑石)",
            "Pearl (珍珠)",
            "Onyx (玛瑙)",
            "Sapphire (蓝宝石)",
            "Zircon (锆石)",
        ],
        CategoryKey::Craftsmanship => &[
            "Micro-pave (微镶)",
            "Filigree (花丝)",
            "Enamel (珐琅)",
            "Matte Finish (哑光)",
            "Hammered (锤纹)",
            "Polished (抛光)",
        ],
        CategoryKey::Style => &[
            "Vintage (复古)",
            "Minimalist (极简)",
            "Luxury (奢华)",
            "Bohemian (波西米亚)",
            "Art Deco (艺术装饰)",
            "Gothic (哥特)",
        ],
        CategoryKey::Element => &[
            "Heart (心形)",
            "Infinity (无限符号)",
            "Butterfly (蝴蝶)",
            "Cross (十字架)",
            "Snake (蛇形)",
            "Star (星星)",
            "Flower (花朵)",
        ],
    }
}

/// Builds one category of the seed taxonomy with every count at zero.
pub fn seed_category(key: CategoryKey) -> KeywordCategory {
    KeywordCategory {
        key,
        label: key.label().to_string(),
        items: seed_terms(key)
            .iter()
            .map(|name| KeywordTerm::new(*name))
            .collect(),
    }
}

//! Product category detection
//!
//! A query is classified by substring membership against fixed vocabularies.
//! Categories are tried in declaration order and the first hit wins, so a word
//! listed under two categories ("mirror") always resolves to the earlier one.

/// Product categories that have brand-site lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Electronics,
    Fashion,
    Home,
    Automotive,
    Beauty,
    Sports,
}

const ELECTRONICS: &[&str] = &[
    "phone", "iphone", "samsung", "android", "smartphone", "mobile", "laptop", "computer",
    "pc", "tablet", "ipad", "macbook", "camera", "tv", "television", "headphone", "speaker",
    "earbud", "gaming", "console", "playstation", "xbox", "nintendo", "switch",
];

const FASHION: &[&str] = &[
    "shirt", "dress", "pant", "jean", "shoe", "sneaker", "boot", "jacket", "coat", "suit",
    "tie", "watch", "jewelry", "bag", "purse", "wallet", "belt", "hat", "cap", "scarf",
    "glove", "sock", "underwear", "lingerie",
];

const HOME: &[&str] = &[
    "furniture", "chair", "table", "bed", "sofa", "couch", "lamp", "light", "mirror",
    "curtain", "carpet", "rug", "pillow", "blanket", "sheet", "towel", "kitchen", "appliance",
    "refrigerator", "stove", "oven", "microwave", "dishwasher", "washer", "dryer", "vacuum",
    "cleaner",
];

const AUTOMOTIVE: &[&str] = &[
    "car", "truck", "suv", "motorcycle", "bike", "bicycle", "tire", "wheel", "engine",
    "battery", "oil", "filter", "brake", "clutch", "transmission", "exhaust", "muffler",
    "radiator", "alternator", "starter", "ignition",
];

const BEAUTY: &[&str] = &[
    "makeup", "cosmetic", "perfume", "cologne", "skincare", "cream", "lotion", "soap",
    "shampoo", "conditioner", "hair", "nail", "polish", "brush", "mirror", "razor", "shave",
    "deodorant", "toothpaste", "toothbrush", "floss",
];

const SPORTS: &[&str] = &[
    "sport", "fitness", "exercise", "gym", "workout", "running", "jogging", "walking",
    "hiking", "camping", "fishing", "hunting", "golf", "tennis", "basketball", "football",
    "soccer", "baseball", "volleyball", "swimming", "cycling", "yoga", "pilates", "dance",
];

impl ProductCategory {
    /// All categories in classification priority order
    pub const ALL: [ProductCategory; 6] = [
        Self::Electronics,
        Self::Fashion,
        Self::Home,
        Self::Automotive,
        Self::Beauty,
        Self::Sports,
    ];

    /// Name used as the key in the brands table
    pub fn name(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Home => "home",
            Self::Automotive => "automotive",
            Self::Beauty => "beauty",
            Self::Sports => "sports",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            Self::Electronics => ELECTRONICS,
            Self::Fashion => FASHION,
            Self::Home => HOME,
            Self::Automotive => AUTOMOTIVE,
            Self::Beauty => BEAUTY,
            Self::Sports => SPORTS,
        }
    }
}

/// Classifies a free-text query into a product category
///
/// # Examples
///
/// ```
/// use price_scout::category::{detect_product_category, ProductCategory};
///
/// assert_eq!(detect_product_category("Sony WH-1000XM5 headphones"), Some(ProductCategory::Electronics));
/// assert_eq!(detect_product_category("quokka"), None);
/// ```
pub fn detect_product_category(query: &str) -> Option<ProductCategory> {
    let lower = query.to_lowercase();
    ProductCategory::ALL
        .into_iter()
        .find(|category| category.vocabulary().iter().any(|word| lower.contains(word)))
}

//! Schema buckets for Open Graph object types.
//!
//! A fine-grained `og:type` value (`restaurant`, `sports_team`, ...) belongs
//! to one coarse schema bucket (`business`, `group`, ...).

/// Bucket name to member types, in lookup order.
pub static TYPES: &[(&str, &[&str])] = &[
    ("activity", &["activity", "sport"]),
    ("business", &["bar", "company", "cafe", "hotel", "restaurant"]),
    ("group", &["cause", "sports_league", "sports_team"]),
    (
        "organization",
        &["band", "government", "non_profit", "school", "university"],
    ),
    (
        "person",
        &[
            "actor",
            "athlete",
            "author",
            "director",
            "musician",
            "politician",
            "public_figure",
        ],
    ),
    ("place", &["city", "country", "landmark", "state_province"]),
    (
        "product",
        &[
            "album", "book", "drink", "food", "game", "movie", "product", "song", "tv_show",
        ],
    ),
    ("website", &["blog", "website"]),
];

/// Classify a type value into its schema bucket.
///
/// Returns the first bucket in [`TYPES`] order that lists `type_value`, or
/// `None` when no bucket does.
///
/// ```rust
/// assert_eq!(og_card::schema::classify("restaurant"), Some("business"));
/// assert_eq!(og_card::schema::classify("spaceship"), None);
/// ```
#[must_use]
pub fn classify(type_value: &str) -> Option<&'static str> {
    TYPES
        .iter()
        .find(|(_, members)| members.contains(&type_value))
        .map(|(bucket, _)| *bucket)
}

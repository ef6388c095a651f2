//! Database entities.

#![allow(missing_docs)]

pub mod account;
pub mod comment;
pub mod feed_post;
pub mod like;
pub mod phase;
pub mod product;
pub mod project;

pub use account::Entity as Account;
pub use comment::Entity as Comment;
pub use feed_post::Entity as FeedPost;
pub use like::Entity as Like;
pub use phase::Entity as Phase;
pub use product::Entity as Product;
pub use project::Entity as Project;

/// Decode a JSON array column into a list of URL strings.
///
/// Non-array values and non-string elements are ignored rather than erroring:
/// the column is always written as an array of strings by the service layer.
#[must_use]
pub fn image_urls_from_json(value: &sea_orm::JsonValue) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(ToOwned::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_urls_from_json() {
        let urls = image_urls_from_json(&json!(["a.png", "b.png"]));
        assert_eq!(urls, vec!["a.png".to_string(), "b.png".to_string()]);

        assert!(image_urls_from_json(&json!(null)).is_empty());
        assert!(image_urls_from_json(&json!({})).is_empty());
        assert_eq!(image_urls_from_json(&json!(["a", 1, "b"])).len(), 2);
    }
}

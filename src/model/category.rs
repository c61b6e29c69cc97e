use crate::framework::{
    ConsoleError, Creatable, DocumentStore, Fields, Patchable, Removable, StoreEntity, ID_FIELD,
};
use crate::model::{lenient, require, require_some, text, to_fields, Lenient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product category. Its application id is the slug of its title, written at creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    /// Entered as free text by older screens, so not always a number.
    #[serde(deserialize_with = "lenient")]
    pub position: Option<Lenient<i64>>,
}

/// Add-category form.
#[derive(Debug, Clone, Default)]
pub struct CategoryCreate {
    pub title: String,
    pub description: String,
    pub position: Option<i64>,
}

/// Edit-category form. `None` leaves the attribute untouched. The id is never rewritten.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Serialize)]
struct NewCategory {
    id: String,
    title: String,
    description: String,
    position: i64,
}

/// Lowercases the title and collapses each whitespace run into a single hyphen.
///
/// Leading and trailing whitespace is trimmed rather than turned into hyphens, so `" Hats "`
/// becomes `hats`, not `-hats-`.
///
/// ```rust
/// use shop_admin::model::slug;
///
/// assert_eq!(slug("Home  Decor"), "home-decor");
/// assert_eq!(slug(" Hats "), "hats");
/// ```
pub fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl StoreEntity for Category {
    const COLLECTION: &'static str = "Category";
    const LABEL: &'static str = "Category";
    const PLURAL: &'static str = "categories";
}

#[async_trait]
impl Creatable for Category {
    type Create = CategoryCreate;

    fn into_fields(params: CategoryCreate) -> Result<Fields, ConsoleError> {
        let title = require("title", params.title)?;
        let description = require("description", params.description)?;
        let position = require_some("position", params.position)?;
        to_fields(&NewCategory {
            id: slug(&title),
            title,
            description,
            position,
        })
    }

    /// Slugs are unique: a title whose slug is already taken is rejected.
    async fn on_create(fields: &Fields, store: &dyn DocumentStore) -> Result<(), ConsoleError> {
        let Some(id) = fields.get(ID_FIELD).and_then(Value::as_str) else {
            return Ok(());
        };
        let taken = store
            .find_where(Self::COLLECTION, ID_FIELD, Value::String(id.to_string()))
            .await?;
        if taken.is_empty() {
            Ok(())
        } else {
            Err(ConsoleError::Conflict {
                label: Self::LABEL,
                id: id.to_string(),
            })
        }
    }
}

impl Patchable for Category {
    type Update = CategoryUpdate;

    fn patch_fields(mut update: CategoryUpdate) -> Result<Fields, ConsoleError> {
        if let Some(title) = update.title.take() {
            update.title = Some(require("title", title)?);
        }
        if let Some(description) = update.description.take() {
            update.description = Some(require("description", description)?);
        }
        to_fields(&update)
    }
}

impl Removable for Category {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Document, DocumentId};
    use serde_json::json;

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(slug("Home  Decor"), "home-decor");
        assert_eq!(slug("  Garden\tTools \n"), "garden-tools");
        assert_eq!(slug("SHOES"), "shoes");
    }

    #[test]
    fn test_create_requires_every_field() {
        let missing_position = CategoryCreate {
            title: "Shoes".into(),
            description: "Footwear".into(),
            position: None,
        };
        assert!(matches!(
            Category::into_fields(missing_position),
            Err(ConsoleError::Validation(_))
        ));

        let blank_title = CategoryCreate {
            title: "  ".into(),
            description: "Footwear".into(),
            position: Some(1),
        };
        assert!(matches!(
            Category::into_fields(blank_title),
            Err(ConsoleError::Validation(_))
        ));
    }

    #[test]
    fn test_create_derives_id() {
        let fields = Category::into_fields(CategoryCreate {
            title: "Home  Decor".into(),
            description: "Lamps".into(),
            position: Some(3),
        })
        .unwrap();
        assert_eq!(fields["id"], json!("home-decor"));
        assert_eq!(fields["title"], json!("Home  Decor"));
        assert_eq!(fields["position"], json!(3));
    }

    #[test]
    fn test_update_only_sends_given_fields() {
        let fields = Category::patch_fields(CategoryUpdate {
            description: Some("New".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["description"], json!("New"));
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn test_decode_string_position() {
        let doc = Document::new(
            DocumentId::from("doc_000001"),
            json!({ "id": "shoes", "title": "Shoes", "description": "", "position": "2" })
                .as_object()
                .cloned()
                .unwrap(),
        );
        let category = Category::from_document(&doc).unwrap();
        assert_eq!(category.position, Some(Lenient::Value(2)));
        assert_eq!(Category::key_of(&doc).app.as_str(), "shoes");
    }

    #[test]
    fn test_decode_free_text_position() {
        let doc = Document::new(
            DocumentId::from("doc_000002"),
            json!({ "id": "hats", "title": "Hats", "description": "", "position": "first" })
                .as_object()
                .cloned()
                .unwrap(),
        );
        let category = Category::from_document(&doc).unwrap();
        assert_eq!(category.position, Some(Lenient::Raw("first".into())));
        assert_eq!(category.title, "Hats");
    }
}

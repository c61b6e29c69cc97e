use crate::framework::{
    AppId, ConsoleError, Creatable, Document, Fields, Patchable, RecordKey, Removable,
    Resolution, StoreEntity,
};
use crate::model::{lenient, require, require_some, text, to_fields, Lenient};
use serde::{Deserialize, Serialize};

/// A catalogue item. Products have no id of their own: the store-assigned identifier is
/// exposed as the application id, and update/delete resolve against the loaded list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// References `Category.id`. Not checked.
    #[serde(deserialize_with = "text")]
    pub category_id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "text")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient")]
    pub price: Option<Lenient<f64>>,
    #[serde(deserialize_with = "lenient")]
    pub stock: Option<Lenient<u32>>,
    #[serde(deserialize_with = "lenient")]
    pub weight: Option<Lenient<f64>>,
    #[serde(deserialize_with = "lenient")]
    pub cost: Option<Lenient<f64>>,
}

/// Add-product form. Weight and cost are optional.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub weight: Option<f64>,
    pub cost: Option<f64>,
}

/// Edit-product form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub weight: Option<f64>,
    pub cost: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewProduct {
    category_id: String,
    name: String,
    description: String,
    image_url: String,
    price: f64,
    stock: u32,
    weight: Option<f64>,
    cost: Option<f64>,
}

fn non_negative(field: &str, value: Option<f64>) -> Result<Option<f64>, ConsoleError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConsoleError::validation(format!(
            "{} must be a non-negative number",
            field
        ))),
        other => Ok(other),
    }
}

impl StoreEntity for Product {
    const COLLECTION: &'static str = "Product";
    const LABEL: &'static str = "Product";
    const PLURAL: &'static str = "products";
    const RESOLUTION: Resolution = Resolution::Snapshot;

    fn key_of(doc: &Document) -> RecordKey {
        RecordKey::new(doc.id.clone(), AppId::from(doc.id.as_str()))
    }
}

impl Creatable for Product {
    type Create = ProductCreate;

    fn into_fields(params: ProductCreate) -> Result<Fields, ConsoleError> {
        let product = NewProduct {
            category_id: require("categoryId", params.category_id)?,
            name: require("name", params.name)?,
            description: require("description", params.description)?,
            image_url: require("imageUrl", params.image_url)?,
            price: require_some("price", non_negative("price", params.price)?)?,
            stock: require_some("stock", params.stock)?,
            weight: non_negative("weight", params.weight)?,
            cost: non_negative("cost", params.cost)?,
        };
        to_fields(&product)
    }
}

impl Patchable for Product {
    type Update = ProductUpdate;

    fn patch_fields(mut update: ProductUpdate) -> Result<Fields, ConsoleError> {
        for (field, slot) in [
            ("categoryId", &mut update.category_id),
            ("name", &mut update.name),
            ("description", &mut update.description),
            ("imageUrl", &mut update.image_url),
        ] {
            if let Some(value) = slot.take() {
                *slot = Some(require(field, value)?);
            }
        }
        non_negative("price", update.price)?;
        non_negative("weight", update.weight)?;
        non_negative("cost", update.cost)?;
        to_fields(&update)
    }
}

impl Removable for Product {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::DocumentId;
    use serde_json::json;

    fn form() -> ProductCreate {
        ProductCreate {
            category_id: "mugs".into(),
            name: "Blue Mug".into(),
            description: "Ceramic".into(),
            image_url: "https://img/mug.png".into(),
            price: Some(9.5),
            stock: Some(12),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_omits_absent_optionals() {
        let fields = Product::into_fields(form()).unwrap();
        assert_eq!(fields["categoryId"], json!("mugs"));
        assert_eq!(fields["stock"], json!(12));
        assert!(!fields.contains_key("weight"));
        assert!(!fields.contains_key("id"));
    }

    #[test]
    fn test_create_rejects_missing_required() {
        let no_stock = ProductCreate {
            stock: None,
            ..form()
        };
        assert!(matches!(
            Product::into_fields(no_stock),
            Err(ConsoleError::Validation(_))
        ));

        let no_image = ProductCreate {
            image_url: String::new(),
            ..form()
        };
        assert!(Product::into_fields(no_image).is_err());

        let negative = ProductCreate {
            price: Some(-1.0),
            ..form()
        };
        assert!(Product::into_fields(negative).is_err());
    }

    #[test]
    fn test_key_is_internal_id() {
        let doc = Document::new(
            DocumentId::from("doc_000042"),
            json!({ "id": "ignored", "name": "Mug", "price": "3.5" })
                .as_object()
                .cloned()
                .unwrap(),
        );
        let key = Product::key_of(&doc);
        assert_eq!(key.app.as_str(), "doc_000042");
        assert_eq!(
            Product::from_document(&doc).unwrap().price,
            Some(Lenient::Value(3.5))
        );
    }

    #[test]
    fn test_decode_fractional_stock() {
        let doc = Document::new(
            DocumentId::from("doc_000043"),
            json!({ "categoryId": "mugs", "name": "Mug", "price": 4, "stock": "2.5" })
                .as_object()
                .cloned()
                .unwrap(),
        );
        let product = Product::from_document(&doc).unwrap();
        assert_eq!(product.stock, Some(Lenient::Raw("2.5".into())));
        assert_eq!(product.price, Some(Lenient::Value(4.0)));
        assert_eq!(product.name, "Mug");
    }
}

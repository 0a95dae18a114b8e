use serde::{Deserialize, Deserializer, Serialize};

use super::validation::{Field, ValidationErrors};
use crate::utils::{contains_ignore_case, format_price};

/// Minimum product name length accepted by the product form.
const MIN_NAME_LENGTH: usize = 2;

/// Minimum description length accepted by the product form.
const MIN_DESCRIPTION_LENGTH: usize = 10;

/// A product as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_string")]
    pub description: String,
    pub price: f64,
}

/// Nullable text columns come back as `null`; treat them as empty.
fn deserialize_null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Whether the product matches a free-text search on name or description.
    /// An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || contains_ignore_case(&self.name, query)
            || contains_ignore_case(&self.description, query)
    }

    pub fn price_display(&self) -> String {
        format_price(self.price)
    }
}

/// The fields a user edits when creating or updating a product.
/// This is also the request body for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add(Field::Name, "Product name is required");
        } else if self.name.chars().count() < MIN_NAME_LENGTH {
            errors.add(
                Field::Name,
                format!("Product name must be at least {} characters", MIN_NAME_LENGTH),
            );
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.add(Field::Description, "Description is required");
        } else if self.description.chars().count() < MIN_DESCRIPTION_LENGTH {
            errors.add(
                Field::Description,
                format!(
                    "Description must be at least {} characters",
                    MIN_DESCRIPTION_LENGTH
                ),
            );
        }

        if self.price.is_nan() || self.price <= 0.0 {
            errors.add(Field::Price, "Price must be greater than 0");
        }

        errors.into_result()
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}

/// Filter products by a search query, keeping backend order.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches_search(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, description: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price: 10.0,
        }
    }

    fn draft(name: &str, description: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }

    #[test]
    fn test_parse_product_list() {
        let json = r#"[{"id": 1, "name": "Desk Lamp", "description": "LED desk lamp", "price": 24.5},
                       {"id": 2, "name": "Cable", "price": 3}]"#;
        let products: Vec<Product> = serde_json::from_str(json).expect("valid product JSON");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Desk Lamp");
        assert_eq!(products[1].description, "");
        assert_eq!(products[1].price, 3.0);
    }

    #[test]
    fn test_parse_product_list_with_null_text() {
        let json = r#"[{"id": 1, "name": "Lamp", "description": null, "price": 5},
                       {"id": 2, "name": "Cable", "description": "USB-C cable", "price": 3}]"#;
        let products: Vec<Product> = serde_json::from_str(json).expect("null description accepted");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].description, "");
        assert!(products[0].matches_search("lamp"));
        assert!(!products[0].matches_search("cable"));
        assert_eq!(products[1].description, "USB-C cable");
    }

    #[test]
    fn test_draft_serializes_only_editable_fields() {
        let body = serde_json::to_value(draft("Mug", "Ceramic coffee mug", 8.0)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Mug", "description": "Ceramic coffee mug", "price": 8.0})
        );
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let lamp = product(1, "Desk Lamp", "Warm LED light");
        assert!(lamp.matches_search("lamp"));
        assert!(lamp.matches_search("LED"));
        assert!(lamp.matches_search("  "));
        assert!(!lamp.matches_search("chair"));
    }

    #[test]
    fn test_filter_products_keeps_order() {
        let products = vec![
            product(1, "Red Mug", "Ceramic"),
            product(2, "Chair", "Oak"),
            product(3, "Blue Mug", "Enamel"),
        ];
        let ids: Vec<i64> = filter_products(&products, "mug").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_products(&products, "").len(), 3);
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft("Mug", "Ceramic coffee mug", 8.0).validate().is_ok());
    }

    #[test]
    fn test_draft_required_fields() {
        let errors = draft("  ", "", 0.0).validate().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Product name is required"));
        assert_eq!(errors.get(Field::Description), Some("Description is required"));
        assert_eq!(errors.get(Field::Price), Some("Price must be greater than 0"));
    }

    #[test]
    fn test_draft_minimum_lengths() {
        let errors = draft("M", "Too short", 1.0).validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Name),
            Some("Product name must be at least 2 characters")
        );
        assert_eq!(
            errors.get(Field::Description),
            Some("Description must be at least 10 characters")
        );
        assert_eq!(errors.get(Field::Price), None);
    }

    #[test]
    fn test_draft_rejects_negative_and_nan_price() {
        assert!(draft("Mug", "Ceramic coffee mug", -1.0).validate().is_err());
        assert!(draft("Mug", "Ceramic coffee mug", f64::NAN).validate().is_err());
    }

    #[test]
    fn test_draft_from_product() {
        let p = product(7, "Lamp", "Warm LED light");
        let d = ProductDraft::from(&p);
        assert_eq!(d.name, "Lamp");
        assert_eq!(d.description, "Warm LED light");
        assert_eq!(d.price, 10.0);
    }
}

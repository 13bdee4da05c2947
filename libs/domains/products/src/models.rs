use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Product entity - a catalog document stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Product name
    #[validate(length(min = 1, max = 10))]
    pub name: String,
    /// Unit price
    #[validate(range(min = 1, max = 2000))]
    pub price: i64,
    /// ISO 4217 currency code
    #[validate(length(equal = 3))]
    pub currency: String,
    /// Optional discount on the unit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    /// Vendor name
    #[validate(length(min = 1))]
    pub vendor: String,
    /// Bundled accessories, at least one
    #[validate(length(min = 1))]
    pub accessories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_essential: Option<bool>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub price: i64,
    pub currency: String,
    pub discount: Option<i64>,
    pub vendor: String,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub is_essential: Option<bool>,
}

/// DTO for updating an existing product; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub discount: Option<i64>,
    pub vendor: Option<String>,
    pub accessories: Option<Vec<String>>,
    pub is_essential: Option<bool>,
}

/// Query filters for listing products.
///
/// The accepted field set is enumerated here; unknown query keys are
/// ignored rather than forwarded to the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Filter by document id (hex string)
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Filter by exact name
    pub name: Option<String>,
    /// Filter by exact price
    pub price: Option<i64>,
    /// Filter by currency code
    pub currency: Option<String>,
    /// Filter by vendor
    pub vendor: Option<String>,
    /// Filter by essential flag
    pub is_essential: Option<bool>,
}

/// Store-level query with the id already coerced to an [`ObjectId`]
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub id: Option<ObjectId>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub vendor: Option<String>,
    pub is_essential: Option<bool>,
}

/// API representation of a product, with the id as a hex string
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    pub currency: String,
    pub vendor: String,
    pub accessories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_essential: Option<bool>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            price: product.price,
            discount: product.discount,
            currency: product.currency,
            vendor: product.vendor,
            accessories: product.accessories,
            is_essential: product.is_essential,
        }
    }
}

impl Product {
    /// Create a new product from a CreateProduct DTO, assigning a fresh id
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            currency: input.currency,
            discount: input.discount,
            vendor: input.vendor,
            accessories: input.accessories,
            is_essential: input.is_essential,
        }
    }

    /// Overlay the fields present in the update onto this product
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(discount) = update.discount {
            self.discount = Some(discount);
        }
        if let Some(vendor) = update.vendor {
            self.vendor = vendor;
        }
        if let Some(accessories) = update.accessories {
            self.accessories = accessories;
        }
        if let Some(is_essential) = update.is_essential {
            self.is_essential = Some(is_essential);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> CreateProduct {
        CreateProduct {
            name: "kindle".to_string(),
            price: 220,
            currency: "USD".to_string(),
            discount: Some(10),
            vendor: "amazon".to_string(),
            accessories: vec!["charger".to_string()],
            is_essential: Some(false),
        }
    }

    #[test]
    fn test_valid_product_passes_validation() {
        let product = Product::new(laptop());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_name_longer_than_ten_chars_is_rejected() {
        let mut input = laptop();
        input.name = "ultrawide monitor".to_string();
        assert!(Product::new(input).validate().is_err());
    }

    #[test]
    fn test_price_above_bound_is_rejected() {
        let mut input = laptop();
        input.price = 2001;
        assert!(Product::new(input).validate().is_err());
    }

    #[test]
    fn test_price_at_bound_is_accepted() {
        let mut input = laptop();
        input.price = 2000;
        assert!(Product::new(input).validate().is_ok());
    }

    #[test]
    fn test_currency_must_be_three_chars() {
        let mut input = laptop();
        input.currency = "EURO".to_string();
        assert!(Product::new(input).validate().is_err());
    }

    #[test]
    fn test_empty_accessories_are_rejected() {
        let mut input = laptop();
        input.accessories = vec![];
        assert!(Product::new(input).validate().is_err());
    }

    #[test]
    fn test_empty_vendor_is_rejected() {
        let mut input = laptop();
        input.vendor = String::new();
        assert!(Product::new(input).validate().is_err());
    }

    #[test]
    fn test_apply_update_overlays_only_present_fields() {
        let mut product = Product::new(laptop());
        let original_vendor = product.vendor.clone();

        product.apply_update(UpdateProduct {
            price: Some(199),
            ..Default::default()
        });

        assert_eq!(product.price, 199);
        assert_eq!(product.vendor, original_vendor);
        assert_eq!(product.name, "kindle");
    }

    #[test]
    fn test_response_exposes_hex_id() {
        let product = Product::new(laptop());
        let hex = product.id.to_hex();

        let response = ProductResponse::from(product);
        assert_eq!(response.id, hex);
        assert_eq!(hex.len(), 24);
    }
}

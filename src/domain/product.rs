use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry.
///
/// Every field defaults to its zero value when absent from a JSON body, so a
/// body like `{"title": ""}` decodes and is then rejected by validation rather
/// than by the decoder. An explicit `null` is treated the same as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Always assigned by the store, so any integer is accepted on input.
    #[serde(deserialize_with = "client_id")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub discount_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Negative ids decode to 0; the store replaces the value either way.
fn client_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<i64> = Option::deserialize(deserializer)?;
    Ok(id.and_then(|id| u64::try_from(id).ok()).unwrap_or_default())
}

impl Product {
    /// Creates a product with only a title and price set.
    ///
    /// # Notes
    /// The `id` is left at zero and will be assigned by the store.
    #[cfg(test)]
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            price,
            ..Self::default()
        }
    }

    /// The record the service starts with unless seeding is disabled.
    pub fn seed_catalog() -> Vec<Product> {
        vec![Product {
            id: 0,
            title: "iPhone 9".to_string(),
            description: "An apple mobile which is nothing like apple".to_string(),
            price: 549.0,
            discount_percentage: 12.96,
            rating: 4.69,
            stock: 94,
            brand: "PEARRRRRRRRRRRRRR".to_string(),
            category: "smartphones".to_string(),
            thumbnail: "https://i.dummyjson.com/data/products/1/thumbnail.jpg".to_string(),
            images: vec![
                "https://i.dummyjson.com/data/products/1/1.jpg".to_string(),
                "https://i.dummyjson.com/data/products/1/2.jpg".to_string(),
                "https://i.dummyjson.com/data/products/1/3.jpg".to_string(),
                "https://i.dummyjson.com/data/products/1/4.jpg".to_string(),
                "https://i.dummyjson.com/data/products/1/thumbnail.jpg".to_string(),
            ],
        }]
    }
}

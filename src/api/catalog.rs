//! Product catalog: listing with filters and product detail.

// self
use crate::{
	_prelude::*,
	api::Listing,
	client::StorefrontClient,
	http::{ApiRequest, Transport},
};

/// Product list body returned by `GET /products/`.
pub type ProductListing = Listing<Product>;

/// Full product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Backend identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// `"{id}-{name-in-kebab-case}"` slug.
	#[serde(default)]
	pub slug: String,
	/// Unit price.
	pub price: Decimal,
	/// Long-form description.
	#[serde(default)]
	pub description: Option<String>,
	/// Image paths or URLs; resolve with [`StorefrontClient::media_url`].
	#[serde(default)]
	pub images: Vec<String>,
	/// Available sizes.
	#[serde(default)]
	pub sizes: Vec<String>,
	/// Available colors.
	#[serde(default)]
	pub colors: Vec<String>,
	/// Collection key such as `tshirts` or `hoodies`.
	#[serde(default)]
	pub collection: String,
	/// Print or artwork theme.
	#[serde(default)]
	pub design_theme: Option<String>,
	/// Fabric description.
	#[serde(default)]
	pub fabric: Option<String>,
	/// Fabric weight in grams per square meter.
	#[serde(default)]
	pub gsm: Option<u32>,
	/// Printing technique.
	#[serde(default)]
	pub printing_type: Option<String>,
	/// Merchandising status label.
	#[serde(default)]
	pub status: String,
	/// Units on hand.
	#[serde(default)]
	pub stock_quantity: i64,
	/// Whether the product is listed.
	#[serde(default = "listed")]
	pub is_active: bool,
	/// Creation timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}
impl Product {
	/// Returns the first image, if any.
	pub fn primary_image(&self) -> Option<&str> {
		self.images.first().map(String::as_str)
	}

	/// Returns `true` when at least one unit is on hand.
	pub fn in_stock(&self) -> bool {
		self.stock_quantity > 0
	}
}

fn listed() -> bool {
	true
}

/// Compact product record nested in cart lines and order items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
	/// Backend identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Unit price.
	pub price: Decimal,
	/// Image paths or URLs.
	#[serde(default)]
	pub images: Vec<String>,
	/// Collection key.
	#[serde(default)]
	pub collection: String,
}

/// Optional filters for [`StorefrontClient::products`].
///
/// Unset, empty, and zero values are omitted from the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
	/// Collection key (`tshirts`, `hoodies`).
	pub collection: Option<String>,
	/// Inclusive lower price bound.
	pub min_price: Option<Decimal>,
	/// Inclusive upper price bound.
	pub max_price: Option<Decimal>,
	/// Color name.
	pub color: Option<String>,
}
impl ProductFilter {
	/// Restricts results to one collection.
	pub fn collection(mut self, collection: impl Into<String>) -> Self {
		self.collection = Some(collection.into());

		self
	}

	/// Sets the inclusive lower price bound.
	pub fn min_price(mut self, price: Decimal) -> Self {
		self.min_price = Some(price);

		self
	}

	/// Sets the inclusive upper price bound.
	pub fn max_price(mut self, price: Decimal) -> Self {
		self.max_price = Some(price);

		self
	}

	/// Restricts results to one color.
	pub fn color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());

		self
	}

	/// Renders the set filters as query pairs in `collection`, `minPrice`, `maxPrice`,
	/// `color` order.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let text = |key: &str, value: &Option<String>| {
			value
				.as_deref()
				.map(str::trim)
				.filter(|value| !value.is_empty())
				.map(|value| (key.to_owned(), value.to_owned()))
		};
		let price = |key: &str, value: Option<Decimal>| {
			value.filter(|value| !value.is_zero()).map(|value| (key.to_owned(), value.to_string()))
		};

		[
			text("collection", &self.collection),
			price("minPrice", self.min_price),
			price("maxPrice", self.max_price),
			text("color", &self.color),
		]
		.into_iter()
		.flatten()
		.collect()
	}
}

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Lists active products, newest first.
	pub async fn products(&self, filter: &ProductFilter) -> Result<ProductListing> {
		self.call_json(ApiRequest::get("/products/").with_query(filter.query_pairs())).await
	}

	/// Fetches one product; unknown or inactive ids surface as [`Error::NotFound`].
	pub async fn product(&self, id: u64) -> Result<Product> {
		self.call_json(ApiRequest::get(format!("/products/{id}/"))).await
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::str::FromStr;
	// self
	use super::*;

	fn dec(value: &str) -> Decimal {
		Decimal::from_str(value).expect("Decimal fixture should parse.")
	}

	#[test]
	fn product_decodes_backend_shape() {
		let product: Product = serde_json::from_value(serde_json::json!({
			"id": 7,
			"name": "Warli Tee",
			"slug": "7-warli-tee",
			"price": "499.00",
			"description": null,
			"images": ["/media/products/warli.jpg"],
			"sizes": ["S", "M", "L"],
			"colors": ["Black"],
			"collection": "tshirts",
			"design_theme": "Warli",
			"fabric": "Cotton",
			"gsm": 180,
			"printing_type": "DTF",
			"status": "Active",
			"stock_quantity": 12,
			"is_active": true,
			"created_at": "2025-01-05T10:00:00.123456Z"
		}))
		.expect("Product fixture should decode.");

		assert_eq!(product.price, dec("499.00"));
		assert_eq!(product.primary_image(), Some("/media/products/warli.jpg"));
		assert!(product.in_stock());
		assert!(product.created_at.is_some());
	}

	#[test]
	fn sparse_product_uses_defaults() {
		let product: Product = serde_json::from_value(serde_json::json!({
			"id": 8,
			"name": "Plain Hoodie",
			"price": 1299
		}))
		.expect("Sparse product should decode.");

		assert_eq!(product.price, Decimal::from(1299));
		assert!(product.is_active);
		assert!(!product.in_stock());
		assert!(product.primary_image().is_none());
	}

	#[test]
	fn filter_skips_unset_empty_and_zero_values() {
		assert!(ProductFilter::default().query_pairs().is_empty());

		let filter = ProductFilter::default()
			.color("Black")
			.max_price(dec("999.50"))
			.min_price(Decimal::ZERO)
			.collection("hoodies");

		assert_eq!(
			filter.query_pairs(),
			vec![
				("collection".to_owned(), "hoodies".to_owned()),
				("maxPrice".to_owned(), "999.50".to_owned()),
				("color".to_owned(), "Black".to_owned()),
			]
		);

		let blank = ProductFilter::default().collection("  ").min_price(dec("100"));

		assert_eq!(blank.query_pairs(), vec![("minPrice".to_owned(), "100".to_owned())]);
	}
}

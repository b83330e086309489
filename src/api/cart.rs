//! Shopping cart lines and the cart arithmetic shown to shoppers.

// self
use crate::{
	_prelude::*,
	api::{Listing, ProductSummary},
	client::StorefrontClient,
	http::{ApiRequest, Transport},
};

/// One line in the signed-in customer's cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
	/// Line identifier used by update and remove.
	pub id: u64,
	/// Product on this line.
	pub product: ProductSummary,
	/// Units on this line.
	pub quantity: u32,
	/// Selected size.
	#[serde(default)]
	pub size: Option<String>,
	/// Selected color.
	#[serde(default)]
	pub color: Option<String>,
	/// Backend-computed line total (a JSON number, not a decimal string).
	#[serde(default)]
	pub total_price: f64,
}
impl CartItem {
	/// Exact line total: unit price times quantity.
	pub fn line_total(&self) -> Decimal {
		self.product.price * Decimal::from(self.quantity)
	}
}

/// Body of `POST /cart/`.
///
/// Adding a product/size/color combination that is already in the cart increases that line's
/// quantity instead of creating a new line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewCartItem {
	/// Product to add.
	#[serde(rename = "productId")]
	pub product_id: u64,
	/// Units to add.
	pub quantity: u32,
	/// Selected size; sent as `null` when unset.
	pub size: Option<String>,
	/// Selected color; sent as `null` when unset.
	pub color: Option<String>,
}
impl NewCartItem {
	/// One unit of `product_id` with no size or color.
	pub fn new(product_id: u64) -> Self {
		Self { product_id, quantity: 1, size: None, color: None }
	}

	/// Sets the number of units.
	pub fn quantity(mut self, quantity: u32) -> Self {
		self.quantity = quantity;

		self
	}

	/// Selects a size.
	pub fn size(mut self, size: impl Into<String>) -> Self {
		self.size = Some(size.into());

		self
	}

	/// Selects a color.
	pub fn color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());

		self
	}
}

#[derive(Serialize)]
struct QuantityUpdate {
	quantity: i64,
}

/// Sum of unit price times quantity over every line.
pub fn cart_total(items: &[CartItem]) -> Decimal {
	items.iter().map(CartItem::line_total).sum()
}

/// Total number of units across every line.
pub fn cart_count(items: &[CartItem]) -> u64 {
	items.iter().map(|item| u64::from(item.quantity)).sum()
}

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Lists the cart lines.
	pub async fn cart(&self) -> Result<Vec<CartItem>> {
		let listing = self.call_json::<Listing<CartItem>>(ApiRequest::get("/cart/")).await?;

		Ok(listing.into_items())
	}

	/// Adds a line (or tops up a matching one) and returns it.
	pub async fn add_to_cart(&self, item: &NewCartItem) -> Result<CartItem> {
		self.call_json(ApiRequest::post("/cart/").with_json(item)?).await
	}

	/// Sets a line's quantity.
	///
	/// A quantity of zero or less removes the line; the backend answers 204 and this returns
	/// `None`.
	pub async fn update_cart_item(&self, id: u64, quantity: i64) -> Result<Option<CartItem>> {
		let request =
			ApiRequest::patch(format!("/cart/{id}/")).with_json(&QuantityUpdate { quantity })?;

		self.call_optional(request).await
	}

	/// Removes one line.
	pub async fn remove_cart_item(&self, id: u64) -> Result<()> {
		self.call_empty(ApiRequest::delete(format!("/cart/{id}/"))).await
	}

	/// Removes every line.
	pub async fn clear_cart(&self) -> Result<()> {
		self.call_empty(ApiRequest::delete("/cart/clear/")).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn line(id: u64, price: i64, quantity: u32) -> CartItem {
		CartItem {
			id,
			product: ProductSummary {
				id: id * 10,
				name: format!("Tee {id}"),
				price: Decimal::new(price, 2),
				images: Vec::new(),
				collection: "tshirts".into(),
			},
			quantity,
			size: Some("M".into()),
			color: None,
			total_price: 0.,
		}
	}

	#[test]
	fn totals_sum_price_times_quantity() {
		let items = [line(1, 49900, 2), line(2, 129950, 1)];

		assert_eq!(cart_total(&items), Decimal::new(229750, 2));
		assert_eq!(cart_count(&items), 3);
		assert_eq!(cart_total(&[]), Decimal::ZERO);
		assert_eq!(cart_count(&[]), 0);
	}

	#[test]
	fn new_item_serializes_backend_field_names() {
		let body = serde_json::to_value(NewCartItem::new(7).quantity(2).size("L"))
			.expect("Cart body should serialize.");

		assert_eq!(
			body,
			serde_json::json!({ "productId": 7, "quantity": 2, "size": "L", "color": null })
		);
	}

	#[test]
	fn cart_line_decodes_backend_shape() {
		let item: CartItem = serde_json::from_value(serde_json::json!({
			"id": 3,
			"product": {
				"id": 7,
				"name": "Warli Tee",
				"price": "499.00",
				"images": [],
				"collection": "tshirts"
			},
			"quantity": 2,
			"size": "M",
			"color": null,
			"total_price": 998.0
		}))
		.expect("Cart line should decode.");

		assert_eq!(item.line_total(), Decimal::new(99800, 2));
		assert_eq!(item.total_price, 998.0);
		assert!(item.color.is_none());
	}
}

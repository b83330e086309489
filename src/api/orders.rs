//! Orders: history and checkout.

// self
use crate::{
	_prelude::*,
	api::{Listing, ProductSummary},
	client::StorefrontClient,
	http::{ApiRequest, Transport},
};

/// Fulfillment status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Placed, not yet confirmed.
	Pending,
	/// Confirmed by the store.
	Confirmed,
	/// Handed to the carrier.
	Shipped,
	/// Received by the customer.
	Delivered,
	/// Cancelled.
	Cancelled,
	/// Any status this client does not know about.
	#[serde(other)]
	Unknown,
}

/// Payment status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	/// Awaiting payment.
	Pending,
	/// Paid.
	Completed,
	/// Payment failed.
	Failed,
	/// Any status this client does not know about.
	#[serde(other)]
	Unknown,
}

/// One product line captured at checkout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
	/// Line identifier.
	pub id: u64,
	/// Product ordered.
	pub product: ProductSummary,
	/// Units ordered.
	pub quantity: u32,
	/// Unit price at checkout time.
	pub price: Decimal,
	/// Selected size.
	#[serde(default)]
	pub size: Option<String>,
	/// Selected color.
	#[serde(default)]
	pub color: Option<String>,
}

/// A placed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Order identifier.
	pub id: u64,
	/// Owning user identifier.
	#[serde(default)]
	pub user: Option<u64>,
	/// Sum of the item prices times quantities.
	pub total_amount: Decimal,
	/// Fulfillment status.
	pub status: OrderStatus,
	/// Free-form delivery address.
	#[serde(default)]
	pub shipping_address: String,
	/// Payment method label, e.g. `COD`.
	#[serde(default)]
	pub payment_method: String,
	/// Payment status.
	pub payment_status: PaymentStatus,
	/// Placement timestamp.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	/// Ordered lines.
	#[serde(default)]
	pub items: Vec<OrderItem>,
}
impl Order {
	/// Total number of units across every line.
	pub fn item_count(&self) -> u64 {
		self.items.iter().map(|item| u64::from(item.quantity)).sum()
	}
}

#[derive(Serialize)]
struct Checkout<'a> {
	shipping_address: &'a str,
}

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Lists the customer's orders, newest first.
	pub async fn orders(&self) -> Result<Vec<Order>> {
		let listing = self.call_json::<Listing<Order>>(ApiRequest::get("/orders/")).await?;

		Ok(listing.into_items())
	}

	/// Places an order for everything in the cart, which the backend then empties.
	///
	/// An empty cart is rejected with [`Error::Api`] (status 400).
	pub async fn create_order(&self, shipping_address: &str) -> Result<Order> {
		self.call_json(ApiRequest::post("/orders/").with_json(&Checkout { shipping_address })?)
			.await
	}
}

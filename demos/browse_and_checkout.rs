//! Demonstrates a shopper session against a mocked storefront backend: sign in, browse a
//! collection, fill the cart, survive an access-credential expiry, and check out.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use storefront_client::{
	api::{NewCartItem, ProductFilter, cart_count, cart_total},
	client::StorefrontClient,
	config::ClientConfig,
	http::ReqwestTransport,
	reqwest::Client,
	store::{MemoryStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let hoodie = serde_json::json!({
		"id": 7,
		"name": "Warli Hoodie",
		"slug": "7-warli-hoodie",
		"price": "1299.00",
		"images": ["/media/products/warli-hoodie.jpg"],
		"sizes": ["M", "L"],
		"colors": ["Black"],
		"collection": "hoodies",
		"stock_quantity": 9
	});
	let line = serde_json::json!({
		"id": 11,
		"product": { "id": 7, "name": "Warli Hoodie", "price": "1299.00" },
		"quantity": 2,
		"size": "L",
		"color": "Black",
		"total_price": 2598.0
	});

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login/");
			then.status(200).json_body(serde_json::json!({
				"access": "demo-access",
				"refresh": "demo-refresh",
				"user": { "id": 1, "email": "demo@example.com", "first_name": "Demo", "phone": "9000000000" }
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products/").query_param("collection", "hoodies");
			then.status(200).json_body(serde_json::json!({
				"count": 1, "next": null, "previous": null, "results": [hoodie.clone()]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/cart/");
			then.status(201).json_body(line.clone());
		})
		.await;
	// The first cart read finds the access credential expired.
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cart/").header("authorization", "Bearer demo-access");
			then.status(401).json_body(serde_json::json!({ "detail": "Token is expired" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/token/refresh/");
			then.status(200).json_body(serde_json::json!({ "access": "demo-access-2" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cart/").header("authorization", "Bearer demo-access-2");
			then.status(200).json_body(serde_json::json!([line.clone()]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/orders/");
			then.status(201).json_body(serde_json::json!({
				"id": 41,
				"total_amount": "2598.00",
				"status": "confirmed",
				"shipping_address": "12 MG Road, Pune",
				"payment_method": "COD",
				"payment_status": "completed",
				"items": []
			}));
		})
		.await;

	let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
	let config = ClientConfig::builder().base_url(server.url("/api")).build()?;
	let transport = ReqwestTransport::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = StorefrontClient::with_transport(config, store, Arc::new(transport));
	let session = client.login("demo@example.com", "demo-password").await?;

	println!("Signed in as {}.", session.user.display_name());

	let listing = client.products(&ProductFilter::default().collection("hoodies")).await?;

	for product in listing.items() {
		println!(
			"{} at {} ({}).",
			product.name,
			product.price,
			client.media_url(product.primary_image().unwrap_or_default())
		);
	}

	client.add_to_cart(&NewCartItem::new(7).quantity(2).size("L").color("Black")).await?;

	let items = client.cart().await?;

	println!("Cart holds {} item(s) totalling {}.", cart_count(&items), cart_total(&items));
	println!("Credential renewals performed: {}.", client.refresh_metrics().successes());

	let order = client.create_order("12 MG Road, Pune").await?;

	println!("Order #{} is {:?}.", order.id, order.status);

	Ok(())
}

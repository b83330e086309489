//! Typed endpoint operations layered over the authenticated pipeline.
//!
//! Each submodule adds `async` methods to [`StorefrontClient`](crate::client::StorefrontClient)
//! and defines the records the backend returns for that area.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;

pub use cart::*;
pub use catalog::*;
pub use orders::*;

// self
use crate::_prelude::*;

/// A list endpoint body: either a paginated page or a bare array.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
	/// `{count, next, previous, results}` page.
	Paginated(Page<T>),
	/// Bare JSON array.
	Plain(Vec<T>),
}
impl<T> Listing<T> {
	/// Returns the records on this page.
	pub fn items(&self) -> &[T] {
		match self {
			Listing::Paginated(page) => &page.results,
			Listing::Plain(items) => items,
		}
	}

	/// Consumes the listing and returns its records.
	pub fn into_items(self) -> Vec<T> {
		match self {
			Listing::Paginated(page) => page.results,
			Listing::Plain(items) => items,
		}
	}

	/// Total number of records across all pages, when the backend reports it.
	pub fn total(&self) -> usize {
		match self {
			Listing::Paginated(page) => page.count as usize,
			Listing::Plain(items) => items.len(),
		}
	}

	/// URL of the next page, if any.
	pub fn next(&self) -> Option<&str> {
		match self {
			Listing::Paginated(page) => page.next.as_deref(),
			Listing::Plain(_) => None,
		}
	}
}

/// Page-number pagination envelope.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
	/// Total number of records.
	pub count: u64,
	/// Absolute URL of the next page.
	#[serde(default)]
	pub next: Option<String>,
	/// Absolute URL of the previous page.
	#[serde(default)]
	pub previous: Option<String>,
	/// Records on this page.
	pub results: Vec<T>,
}

/// `{"detail": "..."}` acknowledgement body.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct DetailBody {
	#[serde(default)]
	pub(crate) detail: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn listing_accepts_both_shapes() {
		let paginated: Listing<u32> = serde_json::from_value(serde_json::json!({
			"count": 12,
			"next": "http://localhost:8000/api/products/?page=2",
			"previous": null,
			"results": [1, 2]
		}))
		.expect("Paginated listing should decode.");

		assert_eq!(paginated.items(), &[1, 2]);
		assert_eq!(paginated.total(), 12);
		assert_eq!(paginated.next(), Some("http://localhost:8000/api/products/?page=2"));

		let plain: Listing<u32> =
			serde_json::from_value(serde_json::json!([3, 4, 5])).expect("Plain listing should decode.");

		assert_eq!(plain.total(), 3);
		assert!(plain.next().is_none());
		assert_eq!(plain.into_items(), vec![3, 4, 5]);
	}
}

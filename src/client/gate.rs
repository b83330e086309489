//! Single-flight renewal gate: the refresh-in-flight flag plus the pending-request queue.

// std
use std::mem;
// crates.io
use tokio::sync::oneshot;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Completion handed to a queued request: `Some(access)` on renewal success, `None` on failure.
pub(crate) type Settlement = Option<TokenSecret>;

#[derive(Debug, Default)]
struct GateState {
	in_flight: bool,
	waiters: Vec<oneshot::Sender<Settlement>>,
}

/// Guards the renewal call so at most one is outstanding per client.
///
/// The mutex is only held for flag and queue bookkeeping, never across an `.await`.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
	state: Mutex<GateState>,
}
impl RefreshGate {
	/// Claims the renewal or joins the queue behind the current owner.
	pub(crate) fn enter(&self) -> Ticket<'_> {
		let mut state = self.state.lock();

		if state.in_flight {
			let (tx, rx) = oneshot::channel();

			state.waiters.push(tx);

			Ticket::Waiter(rx)
		} else {
			state.in_flight = true;

			Ticket::Owner(RefreshLease { gate: self, settled: false })
		}
	}

	pub(crate) fn is_refreshing(&self) -> bool {
		self.state.lock().in_flight
	}

	#[cfg(test)]
	fn queued(&self) -> usize {
		self.state.lock().waiters.len()
	}

	fn settle(&self, settlement: Settlement) {
		let waiters = {
			let mut state = self.state.lock();

			state.in_flight = false;

			mem::take(&mut state.waiters)
		};

		// A waiter whose caller went away has dropped its receiver; nothing to notify.
		for waiter in waiters {
			let _ = waiter.send(settlement.clone());
		}
	}
}

/// Outcome of [`RefreshGate::enter`].
pub(crate) enum Ticket<'a> {
	/// The caller owns the renewal and must settle the lease.
	Owner(RefreshLease<'a>),
	/// The caller waits for the owner's settlement.
	Waiter(oneshot::Receiver<Settlement>),
}

/// Ownership of the in-flight flag.
///
/// Dropping an unsettled lease (for example when the owner's future is cancelled) fails every
/// queued waiter and releases the flag.
#[derive(Debug)]
pub(crate) struct RefreshLease<'a> {
	gate: &'a RefreshGate,
	settled: bool,
}
impl RefreshLease<'_> {
	/// Releases the flag and hands `access` to every waiter in arrival order.
	pub(crate) fn resolve(mut self, access: &TokenSecret) {
		self.settled = true;
		self.gate.settle(Some(access.clone()));
	}

	/// Releases the flag and fails every waiter.
	pub(crate) fn reject(mut self) {
		self.settled = true;
		self.gate.settle(None);
	}
}
impl Drop for RefreshLease<'_> {
	fn drop(&mut self) {
		if !self.settled {
			self.gate.settle(None);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn owner(ticket: Ticket<'_>) -> RefreshLease<'_> {
		match ticket {
			Ticket::Owner(lease) => lease,
			Ticket::Waiter(_) => panic!("First entrant should own the renewal."),
		}
	}

	fn waiter(ticket: Ticket<'_>) -> oneshot::Receiver<Settlement> {
		match ticket {
			Ticket::Waiter(rx) => rx,
			Ticket::Owner(_) => panic!("Entrant during a renewal should be queued."),
		}
	}

	#[tokio::test]
	async fn resolve_notifies_waiters_in_order_and_releases_flag() {
		let gate = RefreshGate::default();
		let lease = owner(gate.enter());
		let first = waiter(gate.enter());
		let second = waiter(gate.enter());

		assert!(gate.is_refreshing());
		assert_eq!(gate.queued(), 2);

		lease.resolve(&TokenSecret::new("tokA2"));

		assert!(!gate.is_refreshing());
		assert_eq!(gate.queued(), 0);

		for rx in [first, second] {
			let settled = rx.await.expect("Waiter should receive a settlement.");

			assert_eq!(settled.as_ref().map(TokenSecret::expose), Some("tokA2"));
		}

		let _next = owner(gate.enter());
	}

	#[tokio::test]
	async fn reject_fails_waiters() {
		let gate = RefreshGate::default();
		let lease = owner(gate.enter());
		let rx = waiter(gate.enter());

		lease.reject();

		assert_eq!(rx.await.expect("Waiter should receive a settlement."), None);
		assert!(!gate.is_refreshing());
	}

	#[tokio::test]
	async fn dropped_lease_releases_flag() {
		let gate = RefreshGate::default();
		let rx = {
			let _lease = owner(gate.enter());

			waiter(gate.enter())
		};

		assert_eq!(rx.await.expect("Waiter should receive a settlement."), None);
		assert!(!gate.is_refreshing());
	}

	#[test]
	fn departed_waiters_do_not_block_settlement() {
		let gate = RefreshGate::default();
		let lease = owner(gate.enter());

		drop(waiter(gate.enter()));
		lease.resolve(&TokenSecret::new("tokA2"));

		assert!(!gate.is_refreshing());
	}
}

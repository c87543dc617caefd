//! Cart change notifications
//!
//! Every mutation publishes a payload-free [`CartChanged`]; subscribers re-read
//! the whole cart instead of applying deltas.
use tokio::sync::broadcast;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartChanged;

#[derive(Clone, Debug)]
pub struct CartEvents {
    tx: broadcast::Sender<CartChanged>,
}

impl CartEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> { self.tx.subscribe() }

    /// Having no live subscriber is not an error.
    pub fn publish(&self) {
        let receivers = self.tx.send(CartChanged).unwrap_or(0);
        tracing::trace!(receivers, "cart changed");
    }
}

impl Default for CartEvents {
    fn default() -> Self { Self::new(16) }
}

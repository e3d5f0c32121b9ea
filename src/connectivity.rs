//! Host connectivity signal
//!
//! Advisory only: a request may still succeed while the signal says offline,
//! or fail while it says online.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something that can report whether the host believes it is online
pub trait Connectivity: Send + Sync + std::fmt::Debug {
    fn is_online(&self) -> bool;
}

/// A connectivity flag the host flips when its network state changes
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    online: Arc<AtomicBool>,
}

impl ConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Records a change of network state
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

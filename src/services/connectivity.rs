//! Estado de conectividade
//!
//! Um cliente offline classifica qualquer falha como erro de conexão.

use std::sync::atomic::{AtomicBool, Ordering};

pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Sonda com estado alternável (a UI atualiza nos eventos online/offline)
#[derive(Debug)]
pub struct ConnectivityFlag {
    online: AtomicBool,
}

impl ConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityProbe for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Navigation-blocking overlay flag.
///
/// Cloning hands out another view of the same flag, so the owner of the UI
/// passes clones to whatever needs to raise or lower the mask.
#[derive(Debug, Clone, Default)]
pub struct NavigationMask {
    active: Arc<AtomicBool>,
}

impl NavigationMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        tracing::trace!("navigation mask activated");
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        tracing::trace!("navigation mask deactivated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_starts_inactive() {
        assert!(!NavigationMask::new().is_active());
    }

    #[test]
    fn test_activate_then_deactivate() {
        let mask = NavigationMask::new();
        mask.activate();
        assert!(mask.is_active());
        mask.deactivate();
        assert!(!mask.is_active());
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mask = NavigationMask::new();
        for _ in 0..3 {
            mask.activate();
        }
        mask.deactivate();
        assert!(!mask.is_active());
        mask.deactivate();
        assert!(!mask.is_active());
    }

    #[test]
    fn test_clones_share_state() {
        let mask = NavigationMask::new();
        let view = mask.clone();
        mask.activate();
        assert!(view.is_active());
        view.deactivate();
        assert!(!mask.is_active());
    }
}

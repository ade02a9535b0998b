use crate::core::{AccessCheck, AccessValidator};
use crate::domain::mask::NavigationMask;
use crate::utils::error::Result;
use std::sync::Arc;

/// Raises the navigation mask while a page's access check is pending.
pub struct PageGate<V: AccessValidator> {
    validator: Arc<V>,
    mask: NavigationMask,
}

impl<V: AccessValidator> PageGate<V> {
    pub fn new(validator: Arc<V>, mask: NavigationMask) -> Self {
        Self { validator, mask }
    }

    pub fn mask(&self) -> &NavigationMask {
        &self.mask
    }

    /// The mask is lowered again on both outcomes, and also when the returned
    /// future is dropped before it completes.
    pub async fn enter(&self, check: &AccessCheck) -> Result<()> {
        let raised = RaisedMask::raise(&self.mask);
        let result = self.validator.validate(check).await;
        drop(raised);

        match &result {
            Ok(()) => tracing::debug!("entering {}", check),
            Err(e) => tracing::info!("navigation to {} blocked: {}", check, e),
        }
        result
    }
}

/// Lowers the mask when dropped.
struct RaisedMask<'a> {
    mask: &'a NavigationMask,
}

impl<'a> RaisedMask<'a> {
    fn raise(mask: &'a NavigationMask) -> Self {
        mask.activate();
        Self { mask }
    }
}

impl Drop for RaisedMask<'_> {
    fn drop(&mut self) {
        self.mask.deactivate();
    }
}

pub mod batch;
pub mod client;
pub mod gate;

pub use crate::domain::mask::NavigationMask;
pub use crate::domain::model::{AccessCheck, AccessRequest};
pub use crate::domain::ports::{AccessValidator, ConfigProvider};
pub use crate::utils::error::Result;

use crate::domain::model::AccessCheck;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[async_trait]
pub trait AccessValidator: Send + Sync {
    /// Resolves when the server answers 2xx, fails otherwise.
    async fn validate(&self, check: &AccessCheck) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
    fn headers(&self) -> &HashMap<String, String>;
    fn concurrent_requests(&self) -> usize;
}

//! Company profile and application (integration) state.

use crate::client::HousecallClient;
use crate::error::Result;
use serde_json::Value;

impl HousecallClient {
    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_company(&self) -> Result<Value> {
        self.get(&["company"], None).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn get_application(&self) -> Result<Value> {
        self.get(&["application"], None).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn enable_application(&self) -> Result<Value> {
        self.post(&["application", "enable"], None).await
    }

    /// # Errors
    ///
    /// Returns the normalized API error for transport or status failures.
    pub async fn disable_application(&self) -> Result<Value> {
        self.post(&["application", "disable"], None).await
    }
}

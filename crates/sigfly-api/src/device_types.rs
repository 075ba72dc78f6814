// Device-type endpoints
//
// Listing and creation, plus the login probe: `device-types` is the
// cheapest authenticated read, so it doubles as a credentials check.

use serde_json::Value;
use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{DeviceType, DeviceTypeRequest};

impl SigfoxClient {
    /// Verify the configured credentials against the backend.
    ///
    /// Probes `GET device-types` and fails with [`Error::Authentication`]
    /// on any non-success status. Transport failures stay transport
    /// errors -- an unreachable backend says nothing about credentials.
    pub async fn verify_login(&self) -> Result<(), Error> {
        let url = self.url("device-types")?;
        let resp = self.send_get(url.clone()).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("unable to log in to the Sigfox API ({url}): HTTP {status}"),
            });
        }
        debug!("login verified");
        Ok(())
    }

    /// List every device type visible to this account.
    ///
    /// `GET device-types`
    pub async fn list_device_types(&self) -> Result<Vec<DeviceType>, Error> {
        let url = self.url("device-types")?;
        debug!("listing device types");
        self.get_list(url).await
    }

    /// Create a device type.
    ///
    /// `POST devicetypes/create` with `{"name": ..., "contractId": ...}`.
    /// Returns the backend's response JSON as-is.
    pub async fn create_device_type(&self, request: &DeviceTypeRequest) -> Result<Value, Error> {
        let url = self.url("devicetypes/create")?;
        debug!(name = %request.name, "creating device type");
        self.post_json(url, request).await
    }
}

// Device endpoints
//
// Reads and renames address `devices/{id}`; registration goes through
// the device type's asynchronous bulk-create job.

use serde_json::Value;
use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{Device, DeviceType, NewDevice};

/// Marks devices registered through this client, so they can be told
/// apart from devices onboarded elsewhere.
pub const DEVICE_ID_PREFIX: &str = "api_added-";

impl SigfoxClient {
    /// Fetch a single device.
    ///
    /// `GET devices/{id}` -- returns the bare device object.
    pub async fn get_device(&self, device_id: &str) -> Result<Device, Error> {
        let url = self.url(&format!("devices/{device_id}"))?;
        debug!(device_id, "fetching device");
        self.get_json(url).await
    }

    /// Rename a device.
    ///
    /// `PUT devices/{id}` with `{"name": "<new name>"}`.
    pub async fn rename_device(&self, device_id: &str, new_name: &str) -> Result<(), Error> {
        #[derive(serde::Serialize)]
        struct Body<'a> {
            name: &'a str,
        }

        let url = self.url(&format!("devices/{device_id}"))?;
        debug!(device_id, new_name, "renaming device");
        self.put_empty(url, &Body { name: new_name }).await
    }

    /// List the devices of one device type.
    ///
    /// `GET devices?deviceTypeId={id}`
    pub async fn list_devices(&self, device_type_id: &str) -> Result<Vec<Device>, Error> {
        let mut url = self.url("devices")?;
        url.query_pairs_mut()
            .append_pair("deviceTypeId", device_type_id);
        debug!(device_type_id, "listing devices");
        self.get_list(url).await
    }

    /// Register a device under a device type.
    ///
    /// `POST devicetypes/{id}/devices/bulk/create/async` -- the backend
    /// runs registration as a bulk job and acknowledges immediately.
    /// The ack JSON is returned as-is; job completion is not polled.
    /// Ids submitted this way carry the [`DEVICE_ID_PREFIX`] marker.
    pub async fn create_device(
        &self,
        device: &NewDevice,
        certificate: &str,
        device_type: &DeviceType,
    ) -> Result<Value, Error> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            prefix: &'a str,
            ids: [&'a NewDevice; 1],
            product_certificate: &'a str,
        }

        let url = self.url(&format!(
            "devicetypes/{}/devices/bulk/create/async",
            device_type.id
        ))?;
        debug!(
            device_id = %device.id,
            device_type = device_type.name.as_deref().unwrap_or(&device_type.id),
            "registering device"
        );
        self.post_json(
            url,
            &Body {
                prefix: DEVICE_ID_PREFIX,
                ids: [device],
                product_certificate: certificate,
            },
        )
        .await
    }
}

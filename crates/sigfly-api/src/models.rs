// Sigfox v2 API response and request types
//
// List endpoints wrap their payload in the `{ data, paging }` envelope.
// Resource types model the commonly used fields explicitly; everything
// else lands in a flattened `extra` map because the backend grows fields
// between releases.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Response envelope ────────────────────────────────────────────────

/// Standard list-response envelope:
///
/// ```json
/// { "data": [...], "paging": { "next": "<url>" } }
/// ```
///
/// `paging` and `next` are both optional; a missing `next` marks the
/// final page.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl<T> Envelope<T> {
    /// The `paging.next` cursor, if the envelope carries one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_deref())
    }
}

/// Cursor metadata from a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    /// Absolute URL of the next page, when one exists.
    #[serde(default)]
    pub next: Option<String>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `devices/{id}` and `devices?deviceTypeId=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pac: Option<String>,
    #[serde(default, rename = "deviceType")]
    pub device_type: Option<DeviceTypeRef>,
    /// Epoch milliseconds of the last communication.
    #[serde(default, rename = "lastCom")]
    pub last_com: Option<i64>,
    #[serde(default)]
    pub state: Option<i32>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Minimal `{ id, name }` reference embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTypeRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Device type ──────────────────────────────────────────────────────

/// Device type from `device-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(default, rename = "groupId")]
    pub group_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Group ────────────────────────────────────────────────────────────

/// Group from `groups`. Read-only from this client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub group_type: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Message ──────────────────────────────────────────────────────────

/// One uplink message from `devices/{id}/messages`.
///
/// The message shape is treated as opaque: the well-known fields are
/// surfaced, the rest passes through `extra` verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub device: Option<Value>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
    /// Hex-encoded payload.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default, rename = "seqNumber")]
    pub seq_number: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Request descriptors ──────────────────────────────────────────────

/// Descriptor for a device to register: the id printed on the module
/// plus its porting authorization code.
#[derive(Debug, Clone, Serialize)]
pub struct NewDevice {
    pub id: String,
    pub pac: String,
}

/// Body for `devicetypes/create`.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceTypeRequest {
    pub name: String,
    #[serde(rename = "contractId")]
    pub contract_id: String,
}

/// Query parameters for the first page of a message walk.
#[derive(Debug, Clone)]
pub struct MessageQuery {
    /// Records per page. The backend caps this at 100.
    pub limit: u32,
    /// Only messages at or after this epoch-millisecond timestamp.
    pub since: Option<i64>,
    /// Only messages before this epoch-millisecond timestamp.
    pub before: Option<i64>,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            since: None,
            before: None,
        }
    }
}

impl MessageQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(since) = self.since {
            params.push(("since", since.to_string()));
        }
        if let Some(before) = self.before {
            params.push(("before", before.to_string()));
        }
        params
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_paging_has_no_cursor() {
        let envelope: Envelope<Message> = serde_json::from_value(json!({
            "data": []
        }))
        .unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.next_cursor().is_none());
    }

    #[test]
    fn envelope_cursor_is_surfaced() {
        let envelope: Envelope<Message> = serde_json::from_value(json!({
            "data": [{ "seqNumber": 3 }],
            "paging": { "next": "https://api.sigfox.com/v2/devices/ABC/messages?offset=10" }
        }))
        .unwrap();
        assert_eq!(
            envelope.next_cursor(),
            Some("https://api.sigfox.com/v2/devices/ABC/messages?offset=10")
        );
    }

    #[test]
    fn unknown_message_fields_land_in_extra() {
        let message: Message = serde_json::from_value(json!({
            "device": { "id": "00FF17" },
            "time": 1_700_000_000_000_i64,
            "data": "deadbeef",
            "seqNumber": 42,
            "lqi": 2,
            "rinfos": [{ "baseStation": { "id": "0BAD" } }]
        }))
        .unwrap();
        assert_eq!(message.seq_number, Some(42));
        assert_eq!(message.data.as_deref(), Some("deadbeef"));
        assert_eq!(message.extra["lqi"], json!(2));
        assert!(message.extra.contains_key("rinfos"));
    }

    #[test]
    fn default_query_limits_to_ten() {
        let params = MessageQuery::default().params();
        assert_eq!(params, vec![("limit", "10".to_owned())]);
    }
}

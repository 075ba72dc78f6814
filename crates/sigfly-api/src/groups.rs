// Group endpoints
//
// Groups form the backend's organizational tree; this client only
// reads it.

use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::Group;

impl SigfoxClient {
    /// List every group visible to this account.
    ///
    /// `GET groups`
    pub async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        let url = self.url("groups")?;
        debug!("listing groups");
        self.get_list(url).await
    }
}

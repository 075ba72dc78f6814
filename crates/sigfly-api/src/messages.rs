// Message retrieval
//
// The only stateful path in the client: every page request first takes
// a slot from the shared limiter, and the walk follows `paging.next`
// cursors until the backend stops returning one.

use tracing::debug;
use url::Url;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{Envelope, Message, MessageQuery};

impl SigfoxClient {
    /// Retrieve all messages of a device, walking every page.
    ///
    /// `GET devices/{id}/messages` with the query's parameters (default
    /// `limit=10`), then each `paging.next` cursor in turn. Pages are
    /// concatenated in backend order.
    pub async fn device_messages(
        &self,
        device_id: &str,
        query: Option<MessageQuery>,
    ) -> Result<Vec<Message>, Error> {
        let query = query.unwrap_or_default();
        let mut url = self.url(&format!("devices/{device_id}/messages"))?;
        for (key, value) in query.params() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        debug!(device_id, "fetching messages");
        self.collect_message_pages(url).await
    }

    /// Continue a message walk from a `paging.next` cursor.
    pub async fn device_messages_page(&self, cursor: &str) -> Result<Vec<Message>, Error> {
        let url = Url::parse(cursor)?;
        debug!(%url, "fetching messages from cursor");
        self.collect_message_pages(url).await
    }

    /// The shared walk: acquire the limiter, fetch, append, follow.
    ///
    /// Each page request acquires the limiter, so a long walk is paced
    /// the same as repeated calls. The page bound defends against a
    /// cyclic cursor chain from a misbehaving backend.
    async fn collect_message_pages(&self, first: Url) -> Result<Vec<Message>, Error> {
        let mut messages = Vec::new();
        let mut url = first;
        let mut pages: u32 = 0;

        loop {
            self.limiter.acquire().await;

            let envelope: Envelope<Message> = self.get_envelope(url).await?;
            let next = envelope.next_cursor().map(str::to_owned);
            messages.extend(envelope.data);

            let Some(next) = next else {
                break;
            };

            pages += 1;
            if let Some(max) = self.max_pages {
                if pages >= max {
                    return Err(Error::PaginationLimit { pages });
                }
            }
            url = Url::parse(&next)?;
        }

        debug!(count = messages.len(), pages = pages + 1, "message walk complete");
        Ok(messages)
    }
}

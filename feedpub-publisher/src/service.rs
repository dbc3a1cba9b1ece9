use anyhow::Result;
use async_trait::async_trait;
use atrium_api::app::bsky::feed::generator;
use atrium_api::types::BlobRef;
use atrium_api::types::string::{Did, Handle, Nsid};

/// The logged-in account.
#[derive(Debug, Clone)]
pub struct Session {
    pub did: Did,
    pub handle: Handle,
}

/// A single record write. `rkey: None` asks the service to mint a new key.
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub repo: Did,
    pub collection: Nsid,
    pub rkey: Option<String>,
    pub record: generator::RecordData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRecord {
    /// `at://` URI of the written record.
    pub uri: String,
    /// CID of the new record version.
    pub cid: String,
}

/// The remote operations publishing needs from a PDS.
#[async_trait]
pub trait FeedService: Send + Sync {
    async fn login(&self, handle: &str, password: &str) -> Result<Session>;

    async fn upload_blob(&self, data: Vec<u8>) -> Result<BlobRef>;

    async fn put_record(&self, request: PutRecord) -> Result<PublishedRecord>;
}

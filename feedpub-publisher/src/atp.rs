use anyhow::{Result, anyhow};
use async_trait::async_trait;
use atrium_api::agent::atp_agent::AtpAgent;
use atrium_api::agent::atp_agent::store::MemorySessionStore;
use atrium_api::com::atproto::repo::{create_record, put_record};
use atrium_api::record::KnownRecord;
use atrium_api::types::string::AtIdentifier;
use atrium_api::types::{BlobRef, TryIntoUnknown};
use atrium_xrpc_client::reqwest::ReqwestClient;
use log::debug;

use crate::service::{FeedService, PublishedRecord, PutRecord, Session};

pub const DEFAULT_PDS: &str = "https://bsky.social";

/// [`FeedService`] backed by an atrium [`AtpAgent`].
pub struct AtpService {
    agent: AtpAgent<MemorySessionStore, ReqwestClient>,
}

impl AtpService {
    pub fn new(pds: impl AsRef<str>) -> Self {
        Self {
            agent: AtpAgent::new(ReqwestClient::new(pds), MemorySessionStore::default()),
        }
    }
}

/// The XRPC call a [`PutRecord`] turns into.
#[derive(Debug)]
enum RecordWrite {
    Put(put_record::Input),
    Create(create_record::Input),
}

// putRecord needs a key, so fresh records go through createRecord.
fn record_write(request: PutRecord) -> Result<RecordWrite> {
    let record: KnownRecord = request.record.into();
    let record = record.try_into_unknown()?;
    let repo = AtIdentifier::Did(request.repo);

    Ok(match request.rkey {
        Some(rkey) => RecordWrite::Put(
            put_record::InputData {
                collection: request.collection,
                record,
                repo,
                rkey: rkey
                    .parse()
                    .map_err(|err| anyhow!("invalid record key {rkey:?}: {err:?}"))?,
                swap_commit: None,
                swap_record: None,
                validate: None,
            }
            .into(),
        ),
        None => RecordWrite::Create(
            create_record::InputData {
                collection: request.collection,
                record,
                repo,
                rkey: None,
                swap_commit: None,
                validate: None,
            }
            .into(),
        ),
    })
}

#[async_trait]
impl FeedService for AtpService {
    async fn login(&self, handle: &str, password: &str) -> Result<Session> {
        let session = self.agent.login(handle, password).await?;
        Ok(Session {
            did: session.did.clone(),
            handle: session.handle.clone(),
        })
    }

    async fn upload_blob(&self, data: Vec<u8>) -> Result<BlobRef> {
        let output = self.agent.api.com.atproto.repo.upload_blob(data).await?;
        Ok(output.data.blob)
    }

    async fn put_record(&self, request: PutRecord) -> Result<PublishedRecord> {
        let repo = &self.agent.api.com.atproto.repo;
        match record_write(request)? {
            RecordWrite::Put(input) => {
                debug!("putting record {}", input.data.collection.as_str());
                let output = repo.put_record(input).await?;
                Ok(PublishedRecord {
                    uri: output.data.uri.to_string(),
                    cid: output.data.cid.as_ref().to_string(),
                })
            }
            RecordWrite::Create(input) => {
                debug!("creating record in {}", input.data.collection.as_str());
                let output = repo.create_record(input).await?;
                Ok(PublishedRecord {
                    uri: output.data.uri.to_string(),
                    cid: output.data.cid.as_ref().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{feed_generator_record, service_did};
    use atrium_api::app::bsky::feed::Generator;
    use atrium_api::types::Collection;
    use atrium_api::types::string::Did;
    use serde_json::json;

    fn request(rkey: Option<&str>) -> PutRecord {
        PutRecord {
            repo: Did::new("did:plc:ewvi7nxzyoun6zhxrhs64oiz".to_string()).unwrap(),
            collection: Generator::nsid(),
            rkey: rkey.map(str::to_string),
            record: feed_generator_record(
                service_did("feeds.example.com").unwrap(),
                "What's Hot".to_string(),
                "Top trending content".to_string(),
                None,
                "2024-10-19T12:00:00.000Z".parse().unwrap(),
            ),
        }
    }

    #[test]
    fn rkey_routes_to_put_record() {
        let RecordWrite::Put(input) = record_write(request(Some("whats-hot"))).unwrap() else {
            panic!("expected a putRecord call");
        };
        assert_eq!(serde_json::to_value(&input.data.rkey).unwrap(), json!("whats-hot"));
        assert_eq!(
            serde_json::to_value(&input.data.repo).unwrap(),
            json!("did:plc:ewvi7nxzyoun6zhxrhs64oiz")
        );
        assert_eq!(input.data.collection.as_str(), "app.bsky.feed.generator");
    }

    #[test]
    fn missing_rkey_routes_to_create_record() {
        let RecordWrite::Create(input) = record_write(request(None)).unwrap() else {
            panic!("expected a createRecord call");
        };
        assert!(input.data.rkey.is_none());
        assert_eq!(input.data.collection.as_str(), "app.bsky.feed.generator");
    }

    #[test]
    fn written_record_carries_type() {
        let RecordWrite::Create(input) = record_write(request(None)).unwrap() else {
            panic!("expected a createRecord call");
        };
        let record = serde_json::to_value(&input.data.record).unwrap();
        assert_eq!(record["$type"], "app.bsky.feed.generator");
        assert_eq!(record["did"], "did:web:feeds.example.com");
    }

    #[test]
    fn invalid_rkey_is_rejected() {
        let err = record_write(request(Some("whats/hot"))).unwrap_err();
        assert!(err.to_string().contains("invalid record key"));
    }
}

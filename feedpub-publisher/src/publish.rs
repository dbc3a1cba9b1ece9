use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use atrium_api::app::bsky::feed::Generator;
use atrium_api::types::Collection;
use atrium_api::types::string::Datetime;
use log::{debug, info};

use crate::record::{feed_generator_record, service_did};
use crate::service::{FeedService, PublishedRecord, PutRecord};

/// Everything needed to publish one feed generator record.
#[derive(Clone)]
pub struct PublishRequest {
    pub handle: String,
    pub password: String,
    pub display_name: String,
    pub description: String,
    /// Hostname serving the feed, becomes `did:web:<server>`.
    pub server: String,
    /// Key of an existing record to overwrite.
    pub rkey: Option<String>,
    /// Avatar image to upload.
    pub image: Option<PathBuf>,
}

impl fmt::Debug for PublishRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishRequest")
            .field("handle", &self.handle)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("server", &self.server)
            .field("rkey", &self.rkey)
            .field("image", &self.image)
            .finish()
    }
}

/// Logs in, uploads the avatar if one was given, and writes the generator
/// record. Each step runs only if the previous one succeeded.
pub async fn publish<S: FeedService>(
    service: &S,
    request: &PublishRequest,
) -> Result<PublishedRecord> {
    let did = service_did(&request.server)?;

    info!("logging in as {}", request.handle);
    let session = service
        .login(&request.handle, &request.password)
        .await
        .with_context(|| format!("logging in as {}", request.handle))?;
    info!(
        "logged in as {} ({})",
        session.handle.as_str(),
        session.did.as_str()
    );

    let avatar = match &request.image {
        Some(path) => {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading avatar image {}", path.display()))?;
            info!("uploading avatar image ({} bytes)", data.len());
            let blob = service
                .upload_blob(data)
                .await
                .context("uploading avatar image")?;
            Some(blob)
        }
        None => None,
    };

    let record = feed_generator_record(
        did,
        request.display_name.clone(),
        request.description.clone(),
        avatar,
        Datetime::now(),
    );

    info!("writing feed generator record");
    let published = service
        .put_record(PutRecord {
            repo: session.did,
            collection: Generator::nsid(),
            rkey: request.rkey.clone(),
            record,
        })
        .await
        .context("writing feed generator record")?;
    debug!("published {} at {}", published.uri, published.cid);

    Ok(published)
}

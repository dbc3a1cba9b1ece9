use anyhow::{Result, anyhow};
use atrium_api::app::bsky::feed::generator;
use atrium_api::types::BlobRef;
use atrium_api::types::string::{Datetime, Did};

/// Builds the `app.bsky.feed.generator` record for a feed served by `did`.
pub fn feed_generator_record(
    did: Did,
    display_name: String,
    description: String,
    avatar: Option<BlobRef>,
    created_at: Datetime,
) -> generator::RecordData {
    generator::RecordData {
        accepts_interactions: None,
        avatar,
        content_mode: None,
        created_at,
        description: Some(description),
        description_facets: None,
        did,
        display_name,
        labels: None,
    }
}

/// Builds the `did:web:` identifier the feed generator is served under.
pub fn service_did(server: &str) -> Result<Did> {
    Did::new(format!("did:web:{server}"))
        .map_err(|err| anyhow!("invalid feed generator hostname {server:?}: {err}"))
}

//! Publishes `app.bsky.feed.generator` records to an AT Protocol PDS.
//!
//! The flow lives in [`publish`]: log in, optionally upload an avatar blob,
//! then write the generator record. Everything that talks to the network sits
//! behind [`FeedService`], with [`AtpService`] as the atrium-backed client.

mod atp;
mod did_document;
mod publish;
mod record;
mod service;

pub use atp::{AtpService, DEFAULT_PDS};
pub use did_document::did_document;
pub use publish::{PublishRequest, publish};
pub use record::{feed_generator_record, service_did};
pub use service::{FeedService, PublishedRecord, PutRecord, Session};

use serde_json::{Value, json};

/// The `/.well-known/did.json` a feed generator host serves so that
/// `did:web:<server>` resolves to its feed endpoint.
pub fn did_document(server: &str) -> Value {
    json!({
        "@context": ["https://www.w3.org/ns/did/v1"],
        "id": format!("did:web:{server}"),
        "service": [
            {
                "id": "#bsky_fg",
                "type": "BskyFeedGenerator",
                "serviceEndpoint": format!("https://{server}"),
            }
        ]
    })
}

//! Payloads around the gallery simulation
//!
//! Gift lists arrive as JSON from the gift service; frames leave as postcard
//! bytes for renderers that prefer one buffer per frame.

use bubble_core::{BodySnapshot, Ingestible};
use postcard::{from_bytes, to_allocvec};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Port the object store serves generated gift images on
pub const OBJECT_STORE_PORT: u16 = 9000;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("malformed gift list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed frame: {0}")]
    Frame(#[from] postcard::Error),
}

// ============================================================================
// Gift list (GET /api/gifts)
// ============================================================================

/// The part of a gift record the gallery cares about
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftSummary {
    /// Numeric ids from the service are carried as their decimal text
    #[serde(deserialize_with = "id_from_number_or_text")]
    pub id: String,
    pub player_name: Option<String>,
    pub image_url: Option<String>,
    pub happiness_reason: Option<String>,
    pub is_exchanged: bool,
}

impl Ingestible for GiftSummary {
    fn gift_id(&self) -> &str {
        &self.id
    }

    fn is_exchanged(&self) -> bool {
        self.is_exchanged
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftList {
    #[serde(default)]
    pub gifts: Vec<GiftSummary>,
}

impl GiftList {
    pub fn from_json(json: &str) -> Result<Self, ProtoError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

fn id_from_number_or_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(n)) => n.to_string(),
        Some(RawId::Text(s)) => s,
        // Unusable ids become empty and are rejected per gift at ingest
        Some(RawId::Other(_)) | None => String::new(),
    })
}

/// Turn a stored image path into something an `<img>` can load.
/// Absolute URLs pass through; object-store paths resolve against the page host.
pub fn resolve_image_url(image_url: Option<&str>, hostname: &str) -> Option<String> {
    match image_url {
        None | Some("") => None,
        Some(url) if url.starts_with("http") => Some(url.to_string()),
        Some(path) => Some(format!("http://{hostname}:{OBJECT_STORE_PORT}{path}")),
    }
}

// ============================================================================
// Frames
// ============================================================================

pub const FLAG_COLLIDABLE: u8 = 1 << 0;
pub const FLAG_NEW: u8 = 1 << 1;
pub const FLAG_EXCHANGED: u8 = 1 << 2;

/// One bubble in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleP {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub flags: u8,
}

/// Pack a snapshot's visual state into FLAG_* bits
pub fn flags_of(body: &BodySnapshot) -> u8 {
    let mut flags = 0;
    if body.collidable {
        flags |= FLAG_COLLIDABLE;
    }
    if body.is_new {
        flags |= FLAG_NEW;
    }
    if body.exchanged {
        flags |= FLAG_EXCHANGED;
    }
    flags
}

impl From<&BodySnapshot> for BubbleP {
    fn from(body: &BodySnapshot) -> Self {
        Self {
            id: body.id.clone(),
            x: body.pos.x,
            y: body.pos.y,
            size: body.size,
            flags: flags_of(body),
        }
    }
}

/// Snapshot of every bubble after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub bubbles: Vec<BubbleP>,
}

impl Frame {
    pub fn from_snapshots(tick: u64, bodies: &[BodySnapshot]) -> Self {
        Self {
            tick,
            bubbles: bodies.iter().map(BubbleP::from).collect(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        Ok(to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        Ok(from_bytes(bytes)?)
    }
}

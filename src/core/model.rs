//! Entities held by the in-memory store and carried over the wire.
//!
//! Wire names are camelCase. Records are created by the mock flows and never
//! invalidated; ids are synthetic and only unique within one process.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::constants::{fees, upload};
use crate::error::MinterError;

pub type Id = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Id,
    /// Stable slug used by clients (e.g. `bsv-20-foxes`).
    pub collection_id: String,
    pub name: String,
    pub description: String,
    pub max_supply: u64,
    pub minted: u64,
    pub three_d_minted: u64,
    /// Satoshis.
    pub mint_fee: u64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollection {
    pub collection_id: String,
    pub name: String,
    pub description: String,
    pub max_supply: u64,
    pub minted: u64,
    pub three_d_minted: u64,
    pub mint_fee: u64,
    pub image_url: Option<String>,
}

impl NewCollection {
    pub(crate) fn into_collection(self, id: Id) -> Collection {
        Collection {
            id,
            collection_id: self.collection_id,
            name: self.name,
            description: self.description,
            max_supply: self.max_supply,
            minted: self.minted,
            three_d_minted: self.three_d_minted,
            mint_fee: self.mint_fee,
            image_url: self.image_url,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_supply: Option<u64>,
    pub minted: Option<u64>,
    pub three_d_minted: Option<u64>,
    pub mint_fee: Option<u64>,
    pub image_url: Option<String>,
}

impl CollectionUpdate {
    pub fn three_d_minted(count: u64) -> Self { Self { three_d_minted: Some(count), ..Default::default() } }

    pub fn apply(self, c: &mut Collection) {
        if let Some(v) = self.name { c.name = v; }
        if let Some(v) = self.description { c.description = v; }
        if let Some(v) = self.max_supply { c.max_supply = v; }
        if let Some(v) = self.minted { c.minted = v; }
        if let Some(v) = self.three_d_minted { c.three_d_minted = v; }
        if let Some(v) = self.mint_fee { c.mint_fee = v; }
        if let Some(v) = self.image_url { c.image_url = Some(v); }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub name: String,
    pub max_supply: u64,
    pub minted: u64,
    pub three_d_minted: u64,
    pub remaining: u64,
    pub mint_fee: u64,
}

impl From<&Collection> for CollectionStats {
    fn from(c: &Collection) -> Self {
        Self {
            name: c.name.clone(),
            max_supply: c.max_supply,
            minted: c.minted,
            three_d_minted: c.three_d_minted,
            remaining: c.max_supply.saturating_sub(c.minted),
            mint_fee: c.mint_fee,
        }
    }
}

/// An uploaded image treated as an inscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ordinal {
    pub id: Id,
    pub inscription_id: String,
    pub inscription_number: u64,
    /// Data URL of the upload, or a remote image URL for fixtures.
    pub content: String,
    pub content_type: String,
    pub owner: String,
    pub collection_id: Id,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrdinal {
    pub inscription_id: String,
    pub inscription_number: u64,
    pub content: String,
    pub content_type: String,
    pub owner: String,
    pub collection_id: Id,
}

/// A file as handed over by the uploader. Content travels base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    pub fn is_image(&self) -> bool { upload::is_accepted(&self.content_type) }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, BASE64.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Standard,
    High,
    Ultra,
}

/// Fabricated mesh metadata for a quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelProfile {
    pub polygon_count: u32,
    pub texture_resolution: &'static str,
    pub file_size: u64,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::Standard, Quality::High, Quality::Ultra];

    pub fn as_str(&self) -> &'static str {
        match self { Quality::Standard => "standard", Quality::High => "high", Quality::Ultra => "ultra" }
    }

    /// Unknown labels price and render as standard.
    pub fn from_label(value: &str) -> Self { value.parse().unwrap_or_default() }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::Standard => "Standard Quality (Recommended)",
            Quality::High => "High Quality",
            Quality::Ultra => "Ultra Quality",
        }
    }

    pub fn surcharge(&self) -> u64 {
        match self { Quality::Standard => 0, Quality::High => fees::HIGH_QUALITY, Quality::Ultra => fees::ULTRA_QUALITY }
    }

    /// Base mint fee + network estimate + surcharge.
    pub fn total_fee(&self) -> u64 { fees::BASE_MINT + fees::NETWORK_ESTIMATE + self.surcharge() }

    pub fn profile(&self) -> ModelProfile {
        match self {
            Quality::Standard => ModelProfile { polygon_count: 5_000, texture_resolution: "2048x2048", file_size: 2_000_000 },
            Quality::High => ModelProfile { polygon_count: 10_000, texture_resolution: "4096x4096", file_size: 5_000_000 },
            Quality::Ultra => ModelProfile { polygon_count: 20_000, texture_resolution: "8192x8192", file_size: 10_000_000 },
        }
    }
}

impl FromStr for Quality {
    type Err = MinterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Quality::Standard),
            "high" => Ok(Quality::High),
            "ultra" => Ok(Quality::Ultra),
            other => Err(MinterError::invalid(format!("Unknown quality: {}", other))),
        }
    }
}

/// 3D record derived from an ordinal, pointing at a canned model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDOrdinal {
    pub id: Id,
    pub inscription_id: String,
    pub inscription_number: u64,
    pub model_url: String,
    pub polygon_count: u32,
    pub texture_resolution: String,
    pub file_size: u64,
    pub format: String,
    pub quality: Quality,
    pub original_ordinal_id: Id,
    pub owner: String,
    pub collection_id: Id,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewThreeD {
    pub inscription_id: String,
    pub inscription_number: u64,
    pub model_url: String,
    pub quality: Quality,
    pub format: String,
    pub original_ordinal_id: Id,
    pub owner: String,
    pub collection_id: Id,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ThreeDUpdate {
    pub model_url: Option<String>,
    pub owner: Option<String>,
    pub name: Option<String>,
}

impl ThreeDUpdate {
    pub fn apply(self, t: &mut ThreeDOrdinal) {
        if let Some(v) = self.model_url { t.model_url = v; }
        if let Some(v) = self.owner { t.owner = v; }
        if let Some(v) = self.name { t.name = Some(v); }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintingTransaction {
    pub id: Id,
    pub transaction_id: String,
    pub status: TxStatus,
    pub inscription_number: u64,
    pub ordinal_id: Id,
    pub three_d_ordinal_id: Id,
    pub owner: String,
    pub fee: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub transaction_id: String,
    pub status: TxStatus,
    pub inscription_number: u64,
    pub ordinal_id: Id,
    pub three_d_ordinal_id: Id,
    pub owner: String,
    pub fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub ordinal: Option<Ordinal>,
    pub message: String,
}

impl ValidationResult {
    pub fn rejected(message: impl Into<String>) -> Self { Self { valid: false, ordinal: None, message: message.into() } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub tx_id: String,
    pub new_ordinal_id: String,
    pub three_d_ordinal_id: Id,
    pub status: TxStatus,
    pub fee: u64,
}

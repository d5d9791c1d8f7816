//! Constants for the minting pipeline
//!
//! Centralized registry for fees, quality tiers, sample assets and API paths.

/// Application identity
pub mod app {
    pub const NAME: &str = "3D Ordinal Minter";
    pub const SERVICE: &str = "ordinal-minter";
    pub const NETWORK: &str = "BSV";
    pub const EXPLORER_URL: &str = "https://whatsonchain.com/tx/";
}

/// Fees in satoshis
pub mod fees {
    pub const BASE_MINT: u64 = 10_000;
    pub const NETWORK_ESTIMATE: u64 = 2_100;
    pub const HIGH_QUALITY: u64 = 5_000;
    pub const ULTRA_QUALITY: u64 = 15_000;
}

/// Upload acceptance
pub mod upload {
    pub const ACCEPTED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/svg+xml"];
    pub const DEFAULT_TYPE: &str = "image/png";
    pub const MAX_BYTES: usize = 10 * 1024 * 1024;
    pub const INVALID_TYPE_TITLE: &str = "Invalid File Type";
    pub const INVALID_TYPE_MESSAGE: &str = "Please upload an image file (JPG, PNG, GIF, SVG).";

    pub fn is_accepted(content_type: &str) -> bool {
        ACCEPTED_TYPES.contains(&content_type.trim().to_ascii_lowercase().as_str())
    }
}

/// Canned glTF assets served in place of generated meshes
pub mod models {
    pub const SAMPLES: [&str; 3] = [
        "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Fox/glTF/Fox.gltf",
        "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/Duck/glTF/Duck.gltf",
        "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/BoxAnimated/glTF/BoxAnimated.gltf",
    ];
    pub const FORMAT: &str = "glTF";
}

/// Inscription number ranges
pub mod inscriptions {
    pub const ORDINAL_BASE: u64 = 1_000_000;
    pub const THREE_D_BASE: u64 = 2_000_000;
    pub const SPREAD: u64 = 100_000;
    pub const THREE_D_PREFIX: &str = "3d-";
}

/// HTTP API paths
pub mod api {
    pub const HEALTH: &str = "/health";
    pub const VALIDATE: &str = "/api/ordinals/validate";
    pub const GENERATE_3D: &str = "/api/ordinals/generate3d/:id";
    pub const MINT_3D: &str = "/api/ordinals/mint3d";
    pub const TRANSACTION: &str = "/api/ordinals/mint3d/transactions/:id";
    pub const RECENT: &str = "/api/ordinals/recent";
    pub const BY_OWNER: &str = "/api/ordinals/user/:address";
    pub const SEARCH: &str = "/api/ordinals/search";
    pub const EXAMPLES: &str = "/api/ordinals/examples";
    pub const ORDINAL: &str = "/api/ordinals/:id";
    pub const COLLECTIONS: &str = "/api/collections";
    pub const COLLECTION_STATS: &str = "/api/collections/:id/stats";

    pub const RECENT_LIMIT: usize = 10;
    pub const MIN_SEARCH_LEN: usize = 3;
}

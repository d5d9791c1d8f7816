//! Minter - wires storage, chain and 3D services into the operations the API exposes
//!
//! Routes and the in-process flow backend both go through here, so the
//! 404 / 403 ordering of the mint path lives in one place.

mod config;

pub use config::{load_dotenv, MinterConfig, DEFAULT_BIND, DEFAULT_PORT};

use std::sync::Arc;
use tracing::info;

use crate::core::model::*;
use crate::error::{MinterError, MinterResult};
use crate::services::{BsvService, ChainBackend, SimulatedChain, ThreeDService};
use crate::storage::{MemStorage, Storage};

pub struct Minter {
    storage: Arc<dyn Storage>,
    bsv: BsvService,
    three_d: ThreeDService,
    config: MinterConfig,
}

impl Minter {
    pub fn from_config(config: MinterConfig) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(if config.seed_fixtures { MemStorage::new() } else { MemStorage::empty() });
        let chain: Arc<dyn ChainBackend> = Arc::new(SimulatedChain::new(config.chain_delay));
        Self::with_parts(config, storage, chain)
    }

    pub fn with_parts(config: MinterConfig, storage: Arc<dyn Storage>, chain: Arc<dyn ChainBackend>) -> Self {
        info!(app = %config.app, network = chain.network(), "minter ready");
        Self {
            bsv: BsvService::new(storage.clone(), chain),
            three_d: ThreeDService::new(storage.clone()),
            storage,
            config,
        }
    }

    pub fn config(&self) -> &MinterConfig { &self.config }
    pub fn storage(&self) -> &Arc<dyn Storage> { &self.storage }
    pub fn network(&self) -> &str { self.bsv.network() }

    pub fn validate(&self, upload: &Upload, wallet: &str, collection_slug: Option<&str>) -> MinterResult<ValidationResult> {
        self.bsv.validate_ordinal(upload, wallet, collection_slug)
    }

    pub fn ordinal(&self, reference: &str) -> MinterResult<Ordinal> {
        self.storage.ordinal(reference)?.ok_or(MinterError::NotFound("Ordinal"))
    }

    pub fn generate(&self, reference: &str, quality: Quality) -> MinterResult<ThreeDOrdinal> {
        let ordinal = self.ordinal(reference)?;
        self.three_d.generate(&ordinal, quality)
    }

    /// Lookup, ownership, generation, broadcast. Fails NotFound before NotOwner.
    pub async fn mint(&self, reference: &str, wallet: &str, quality: Quality) -> MinterResult<MintReceipt> {
        let ordinal = self.ordinal(reference)?;
        if !self.bsv.verify_ownership(reference, wallet)? {
            return Err(MinterError::NotOwner);
        }
        let three_d = self.three_d.generate(&ordinal, quality)?;
        self.bsv.mint_three_d(&three_d, wallet, quality).await
    }

    pub fn transaction(&self, three_d_id: Id) -> MinterResult<MintingTransaction> {
        self.storage.transaction_by_three_d(three_d_id)?.ok_or(MinterError::NotFound("Transaction"))
    }

    pub fn recent(&self, limit: usize) -> MinterResult<Vec<ThreeDOrdinal>> { self.storage.recent_three_d(limit) }
    pub fn by_owner(&self, address: &str) -> MinterResult<Vec<ThreeDOrdinal>> { self.storage.three_d_by_owner(address) }
    pub fn examples(&self) -> MinterResult<Vec<ThreeDOrdinal>> { self.storage.example_three_d() }

    pub fn search(&self, query: &str, min_len: usize) -> MinterResult<Vec<ThreeDOrdinal>> {
        if query.trim().chars().count() < min_len {
            return Err(MinterError::invalid(format!("Search query must be at least {} characters", min_len)));
        }
        self.storage.search_three_d(query.trim())
    }

    pub fn collections(&self) -> MinterResult<Vec<Collection>> { self.storage.collections() }

    /// `reference` is the numeric id or the slug.
    pub fn collection_stats(&self, reference: &str) -> MinterResult<CollectionStats> {
        let found = match reference.parse::<Id>() {
            Ok(id) => self.storage.collection(id)?,
            Err(_) => self.storage.collection_by_slug(reference)?,
        };
        found.map(|c| CollectionStats::from(&c)).ok_or(MinterError::NotFound("Collection"))
    }
}

//! ChainBackend - where minted inscriptions get "broadcast"
//!
//! The only implementation fabricates a confirmed txid after a fixed delay.
//! Nothing is signed and nothing leaves the process.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::core::constants::app;
use crate::core::model::TxStatus;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct Inscription {
    pub inscription_id: String,
    pub owner: String,
    pub content_url: String,
    pub fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub txid: String,
    pub status: TxStatus,
}

#[async_trait]
pub trait ChainBackend: Send + Sync {
    fn network(&self) -> &str;
    async fn broadcast(&self, inscription: &Inscription) -> anyhow::Result<Broadcast>;
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedChain {
    delay: Duration,
}

impl SimulatedChain {
    pub fn new(delay: Duration) -> Self { Self { delay } }
    pub fn instant() -> Self { Self::default() }
}

#[async_trait]
impl ChainBackend for SimulatedChain {
    fn network(&self) -> &str { app::NETWORK }

    async fn broadcast(&self, inscription: &Inscription) -> anyhow::Result<Broadcast> {
        if inscription.owner.is_empty() {
            anyhow::bail!("missing owner address");
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let txid = fabricate_txid(inscription, rand::random());
        tracing::debug!(%txid, inscription = %inscription.inscription_id, "simulated broadcast");
        Ok(Broadcast { txid, status: TxStatus::Confirmed })
    }
}

/// 64-hex id over the inscription fields, a timestamp and a nonce.
pub fn fabricate_txid(inscription: &Inscription, nonce: u64) -> String {
    let mut h = Sha256::new();
    h.update(inscription.inscription_id.as_bytes());
    h.update(inscription.owner.as_bytes());
    h.update(inscription.content_url.as_bytes());
    h.update(inscription.fee.to_le_bytes());
    h.update(Utc::now().timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    h.update(nonce.to_le_bytes());
    hex::encode(h.finalize())
}

/// `inscription-<millis>-<9 base36 chars>`
pub fn fabricate_inscription_id() -> String {
    format!("inscription-{}-{}", Utc::now().timestamp_millis(), random_base36(9))
}

pub fn fabricate_inscription_number(base: u64, spread: u64) -> u64 {
    base + rand::thread_rng().gen_range(0..spread.max(1))
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char).collect()
}

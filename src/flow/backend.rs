//! MintBackend - what the mint flow calls to validate and mint
//!
//! `SimulatedBackend` sleeps and answers with a canned payload.
//! `ServiceBackend` drives a `Minter` in-process.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::core::model::{Id, MintReceipt, Quality, ThreeDOrdinal, TxStatus, Upload};
use crate::error::{MinterError, MinterResult};
use crate::minter::Minter;

pub const SIMULATED_VALIDATE_DELAY: Duration = Duration::from_millis(1_500);
pub const SIMULATED_MINT_DELAY: Duration = Duration::from_millis(3_000);

const CANNED_TX_ID: &str = "3a2f4e1b76c8d910a5f7e6294b8c3d1e7f6543210";
const CANNED_NEW_ORDINAL_ID: &str = "new-3d-ordinal-id-123456789";
const CANNED_ORDINAL_ID: &str = "sample-ordinal-id";
const CANNED_COLLECTION: &str = "Pixel Foxes";
const CANNED_MODEL_URL: &str = "/mock-model-url.glb";

/// The ordinal the user is converting, as the preview step shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdinalData {
    pub ordinal_id: String,
    pub image_url: String,
    pub collection_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Minting,
    Completed,
    Failed,
}

/// The minted 3D result shown on the success screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDArtifact {
    pub id: Id,
    pub original_ordinal_id: String,
    pub new_ordinal_id: String,
    pub model_url: String,
    pub owner: String,
    pub status: ArtifactStatus,
    pub tx_id: Option<String>,
    pub name: String,
}

impl ThreeDArtifact {
    fn from_minted(t: &ThreeDOrdinal, original: &str, receipt: &MintReceipt) -> Self {
        Self {
            id: t.id,
            original_ordinal_id: original.to_string(),
            new_ordinal_id: receipt.new_ordinal_id.clone(),
            model_url: t.model_url.clone(),
            owner: t.owner.clone(),
            status: match receipt.status {
                TxStatus::Confirmed => ArtifactStatus::Completed,
                TxStatus::Pending => ArtifactStatus::Minting,
                TxStatus::Failed => ArtifactStatus::Failed,
            },
            tx_id: Some(receipt.tx_id.clone()),
            name: t.name.clone().unwrap_or_else(|| format!("3D Ordinal from {}", original)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOutcome {
    pub receipt: MintReceipt,
    pub artifact: ThreeDArtifact,
}

#[async_trait]
pub trait MintBackend: Send + Sync {
    async fn validate(&self, upload: &Upload, address: &str) -> MinterResult<OrdinalData>;
    async fn mint(&self, ordinal_id: &str, address: &str, quality: Quality) -> MinterResult<MintOutcome>;
}

#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    pub validate_delay: Duration,
    pub mint_delay: Duration,
}

impl Default for SimulatedBackend {
    fn default() -> Self { Self { validate_delay: SIMULATED_VALIDATE_DELAY, mint_delay: SIMULATED_MINT_DELAY } }
}

impl SimulatedBackend {
    pub fn instant() -> Self { Self { validate_delay: Duration::ZERO, mint_delay: Duration::ZERO } }
}

#[async_trait]
impl MintBackend for SimulatedBackend {
    async fn validate(&self, upload: &Upload, _address: &str) -> MinterResult<OrdinalData> {
        tokio::time::sleep(self.validate_delay).await;
        Ok(OrdinalData {
            ordinal_id: CANNED_ORDINAL_ID.into(),
            image_url: upload.data_url(),
            collection_name: CANNED_COLLECTION.into(),
        })
    }

    async fn mint(&self, ordinal_id: &str, address: &str, quality: Quality) -> MinterResult<MintOutcome> {
        tokio::time::sleep(self.mint_delay).await;
        Ok(MintOutcome {
            receipt: MintReceipt {
                tx_id: CANNED_TX_ID.into(),
                new_ordinal_id: CANNED_NEW_ORDINAL_ID.into(),
                three_d_ordinal_id: 1,
                status: TxStatus::Confirmed,
                fee: quality.total_fee(),
            },
            artifact: ThreeDArtifact {
                id: 1,
                original_ordinal_id: ordinal_id.into(),
                new_ordinal_id: CANNED_NEW_ORDINAL_ID.into(),
                model_url: CANNED_MODEL_URL.into(),
                owner: address.into(),
                status: ArtifactStatus::Completed,
                tx_id: Some(CANNED_TX_ID.into()),
                name: "3D Pixel Fox".into(),
            },
        })
    }
}

pub struct ServiceBackend {
    minter: Arc<Minter>,
    collection: Option<String>,
}

impl ServiceBackend {
    pub fn new(minter: Arc<Minter>) -> Self { Self { minter, collection: None } }
    pub fn with_collection(mut self, slug: impl Into<String>) -> Self { self.collection = Some(slug.into()); self }
}

#[async_trait]
impl MintBackend for ServiceBackend {
    async fn validate(&self, upload: &Upload, address: &str) -> MinterResult<OrdinalData> {
        let result = self.minter.validate(upload, address, self.collection.as_deref())?;
        let ordinal = match (result.valid, result.ordinal) {
            (true, Some(o)) => o,
            _ => return Err(MinterError::Invalid(result.message)),
        };
        let collection_name = self.minter.storage()
            .collection(ordinal.collection_id)?
            .map(|c| c.name)
            .unwrap_or_default();
        Ok(OrdinalData { ordinal_id: ordinal.inscription_id, image_url: ordinal.content, collection_name })
    }

    async fn mint(&self, ordinal_id: &str, address: &str, quality: Quality) -> MinterResult<MintOutcome> {
        let receipt = self.minter.mint(ordinal_id, address, quality).await?;
        let three_d = self.minter.storage()
            .three_d(receipt.three_d_ordinal_id)?
            .ok_or(MinterError::NotFound("3D ordinal"))?;
        let artifact = ThreeDArtifact::from_minted(&three_d, ordinal_id, &receipt);
        Ok(MintOutcome { receipt, artifact })
    }
}

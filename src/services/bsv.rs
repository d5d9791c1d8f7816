//! BsvService - ordinal validation, ownership and simulated minting

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::constants::inscriptions;
use crate::core::model::*;
use crate::error::{MinterError, MinterResult};
use crate::services::chain::{fabricate_inscription_id, fabricate_inscription_number, ChainBackend, Inscription};
use crate::storage::Storage;

pub struct BsvService {
    storage: Arc<dyn Storage>,
    chain: Arc<dyn ChainBackend>,
}

impl BsvService {
    pub fn new(storage: Arc<dyn Storage>, chain: Arc<dyn ChainBackend>) -> Self { Self { storage, chain } }

    pub fn network(&self) -> &str { self.chain.network() }

    /// Registers the upload as an ordinal owned by `wallet`. No chain lookup happens;
    /// the only rejections are an unknown collection slug or an empty catalogue.
    pub fn validate_ordinal(&self, upload: &Upload, wallet: &str, collection_slug: Option<&str>) -> MinterResult<ValidationResult> {
        if upload.bytes.is_empty() {
            return Err(MinterError::invalid("No file uploaded"));
        }
        if wallet.trim().is_empty() {
            return Err(MinterError::invalid("Wallet address is required"));
        }
        info!(wallet, file = %upload.file_name, "validating ordinal");

        let collection = match collection_slug.filter(|s| !s.is_empty()) {
            Some(slug) => match self.storage.collection_by_slug(slug)? {
                Some(c) => c,
                None => return Ok(ValidationResult::rejected(format!("Collection {} not found", slug))),
            },
            None => match self.storage.collections()?.into_iter().next() {
                Some(c) => c,
                None => return Ok(ValidationResult::rejected("No collections available")),
            },
        };

        let ordinal = self.storage.create_ordinal(NewOrdinal {
            inscription_id: fabricate_inscription_id(),
            inscription_number: fabricate_inscription_number(inscriptions::ORDINAL_BASE, inscriptions::SPREAD),
            content: upload.data_url(),
            content_type: upload.content_type.clone(),
            owner: wallet.to_string(),
            collection_id: collection.id,
        })?;

        Ok(ValidationResult {
            valid: true,
            message: format!("Ordinal validated and belongs to {} collection", collection.name),
            ordinal: Some(ordinal),
        })
    }

    /// Strict check: unknown ordinals are not owned by anyone.
    pub fn verify_ownership(&self, reference: &str, wallet: &str) -> MinterResult<bool> {
        Ok(self.storage.ordinal(reference)?.map(|o| o.owner == wallet).unwrap_or(false))
    }

    pub async fn mint_three_d(&self, three_d: &ThreeDOrdinal, wallet: &str, quality: Quality) -> MinterResult<MintReceipt> {
        let fee = quality.total_fee();
        info!(wallet, three_d = three_d.id, quality = quality.as_str(), fee, "minting 3D ordinal");

        let broadcast = self.chain.broadcast(&Inscription {
            inscription_id: three_d.inscription_id.clone(),
            owner: wallet.to_string(),
            content_url: three_d.model_url.clone(),
            fee,
        }).await?;

        self.storage.create_transaction(NewTransaction {
            transaction_id: broadcast.txid.clone(),
            status: broadcast.status,
            inscription_number: three_d.inscription_number,
            ordinal_id: three_d.original_ordinal_id,
            three_d_ordinal_id: three_d.id,
            owner: wallet.to_string(),
            fee,
        })?;

        match self.storage.collection(three_d.collection_id)? {
            Some(c) => { self.storage.update_collection(c.id, CollectionUpdate::three_d_minted(c.three_d_minted + 1))?; }
            None => warn!(collection = three_d.collection_id, "minted into unknown collection"),
        }

        Ok(MintReceipt {
            tx_id: broadcast.txid,
            new_ordinal_id: three_d.inscription_id.clone(),
            three_d_ordinal_id: three_d.id,
            status: broadcast.status,
            fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chain::SimulatedChain;
    use crate::services::ThreeDService;
    use crate::storage::{MemStorage, PIXEL_FOXES_SLUG};

    fn service(storage: Arc<MemStorage>) -> BsvService {
        BsvService::new(storage, Arc::new(SimulatedChain::instant()))
    }

    fn fox() -> Upload { Upload::new("fox.png", "image/png", vec![1, 2, 3]) }

    #[test]
    fn validate_registers_owned_ordinal() {
        let storage = Arc::new(MemStorage::new());
        let svc = service(storage.clone());
        let r = svc.validate_ordinal(&fox(), "1Alice", Some(PIXEL_FOXES_SLUG)).unwrap();
        assert!(r.valid);
        assert_eq!(r.message, "Ordinal validated and belongs to Pixel Foxes collection");
        let o = r.ordinal.unwrap();
        assert_eq!(o.owner, "1Alice");
        assert!(o.content.starts_with("data:image/png;base64,"));
        assert!(svc.verify_ownership(&o.inscription_id, "1Alice").unwrap());
        assert!(!svc.verify_ownership(&o.inscription_id, "1Bob").unwrap());
        assert!(!svc.verify_ownership("missing", "1Alice").unwrap());
    }

    #[test]
    fn validate_rejects_unknown_collection_and_empty_catalogue() {
        let svc = service(Arc::new(MemStorage::new()));
        let r = svc.validate_ordinal(&fox(), "1Alice", Some("nope")).unwrap();
        assert!(!r.valid);
        assert_eq!(r.message, "Collection nope not found");

        let empty = service(Arc::new(MemStorage::empty()));
        assert_eq!(empty.validate_ordinal(&fox(), "1Alice", None).unwrap().message, "No collections available");
    }

    #[test]
    fn validate_requires_file_and_wallet() {
        let svc = service(Arc::new(MemStorage::new()));
        let none = Upload::new("x.png", "image/png", vec![]);
        assert_eq!(svc.validate_ordinal(&none, "1Alice", None).unwrap_err().to_string(), "No file uploaded");
        assert_eq!(svc.validate_ordinal(&fox(), " ", None).unwrap_err().to_string(), "Wallet address is required");
    }

    #[tokio::test]
    async fn mint_records_transaction_and_bumps_collection() {
        let storage = Arc::new(MemStorage::new());
        let svc = service(storage.clone());
        let before = storage.collection_by_slug(PIXEL_FOXES_SLUG).unwrap().unwrap().three_d_minted;

        let ordinal = svc.validate_ordinal(&fox(), "1Alice", None).unwrap().ordinal.unwrap();
        let three_d = ThreeDService::new(storage.clone()).generate(&ordinal, Quality::High).unwrap();
        let receipt = svc.mint_three_d(&three_d, "1Alice", Quality::High).await.unwrap();

        assert!(!receipt.tx_id.is_empty());
        assert!(!receipt.new_ordinal_id.is_empty());
        assert_eq!(receipt.fee, 17_100);
        assert_eq!(receipt.status, TxStatus::Confirmed);

        let tx = storage.transaction_by_three_d(three_d.id).unwrap().unwrap();
        assert_eq!(tx.transaction_id, receipt.tx_id);
        assert_eq!(tx.ordinal_id, ordinal.id);
        let after = storage.collection_by_slug(PIXEL_FOXES_SLUG).unwrap().unwrap().three_d_minted;
        assert_eq!(after, before + 1);
    }
}

//! MintFlow - the client state machine
//!
//! ```text
//! step:   connect ──► upload ──► preview ──► mint
//! status: idle | processing | success | error
//! ```
//!
//! Transitions happen only through the methods below. There is no retry and
//! no cancellation: once the status is `error`, everything but `reset` is refused.

use serde::Serialize;

use crate::core::constants::upload;
use crate::core::model::{MintReceipt, Quality, Upload};
use crate::error::{MinterError, MinterResult};
use crate::flow::backend::{MintBackend, OrdinalData, ThreeDArtifact};
use crate::flow::notice::{Notice, Notices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStep {
    Connect,
    Upload,
    Preview,
    Mint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStatus {
    Idle,
    Processing,
    Success,
    Error,
}

/// Observable part of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub step: MintStep,
    pub status: MintStatus,
    pub ordinal_data: Option<OrdinalData>,
}

impl FlowState {
    pub fn initial() -> Self { Self { step: MintStep::Connect, status: MintStatus::Idle, ordinal_data: None } }
}

pub struct MintFlow<B: MintBackend> {
    backend: B,
    step: MintStep,
    status: MintStatus,
    address: Option<String>,
    file: Option<Upload>,
    ordinal_data: Option<OrdinalData>,
    artifact: Option<ThreeDArtifact>,
    receipt: Option<MintReceipt>,
    pub notices: Notices,
}

impl<B: MintBackend> MintFlow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            step: MintStep::Connect,
            status: MintStatus::Idle,
            address: None,
            file: None,
            ordinal_data: None,
            artifact: None,
            receipt: None,
            notices: Notices::default(),
        }
    }

    pub fn step(&self) -> MintStep { self.step }
    pub fn status(&self) -> MintStatus { self.status }
    pub fn ordinal_data(&self) -> Option<&OrdinalData> { self.ordinal_data.as_ref() }
    pub fn artifact(&self) -> Option<&ThreeDArtifact> { self.artifact.as_ref() }
    pub fn receipt(&self) -> Option<&MintReceipt> { self.receipt.as_ref() }
    pub fn selected_file(&self) -> Option<&Upload> { self.file.as_ref() }

    pub fn state(&self) -> FlowState {
        FlowState { step: self.step, status: self.status, ordinal_data: self.ordinal_data.clone() }
    }

    fn ensure_live(&self) -> MinterResult<()> {
        if self.status == MintStatus::Error {
            return Err(MinterError::RestartRequired("the mint flow failed; reset to start over"));
        }
        Ok(())
    }

    pub fn wallet_connected(&mut self, address: &str) -> MinterResult<()> {
        self.ensure_live()?;
        if address.trim().is_empty() {
            return Err(MinterError::invalid("Wallet address is required"));
        }
        self.address = Some(address.to_string());
        if self.step == MintStep::Connect {
            self.step = MintStep::Upload;
        }
        Ok(())
    }

    /// Losing the wallet abandons whatever was in progress.
    pub fn wallet_disconnected(&mut self) { self.reset(); }

    pub fn select_file(&mut self, file: Upload) -> MinterResult<()> {
        self.ensure_live()?;
        if self.step != MintStep::Upload {
            return Err(MinterError::invalid("Connect your wallet before uploading"));
        }
        if !file.is_image() {
            self.notices.push(Notice::error(upload::INVALID_TYPE_TITLE, upload::INVALID_TYPE_MESSAGE));
            return Err(MinterError::invalid(upload::INVALID_TYPE_MESSAGE));
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) { self.file = None; }

    pub async fn validate(&mut self) -> MinterResult<OrdinalData> {
        self.ensure_live()?;
        let address = self.address.clone().ok_or_else(|| MinterError::invalid("Connect your wallet before uploading"))?;
        if self.step != MintStep::Upload {
            return Err(MinterError::invalid("Ordinal already validated; reset to upload another"));
        }
        let file = self.file.clone().ok_or_else(|| MinterError::invalid("Select an image to validate"))?;

        self.status = MintStatus::Processing;
        let result = self.backend.validate(&file, &address).await;
        match result {
            Ok(data) => {
                self.ordinal_data = Some(data.clone());
                self.step = MintStep::Preview;
                self.status = MintStatus::Idle;
                Ok(data)
            }
            Err(e) => Err(self.fail("Validation Failed", e)),
        }
    }

    pub async fn mint(&mut self, quality: Quality) -> MinterResult<MintReceipt> {
        self.ensure_live()?;
        let (Some(data), Some(address)) = (self.ordinal_data.clone(), self.address.clone()) else {
            return Err(MinterError::invalid("Validate an ordinal before minting"));
        };
        if self.step != MintStep::Preview {
            return Err(MinterError::invalid("Validate an ordinal before minting"));
        }

        self.step = MintStep::Mint;
        self.status = MintStatus::Processing;
        let result = self.backend.mint(&data.ordinal_id, &address, quality).await;
        let outcome = match result {
            Ok(o) if o.receipt.tx_id.is_empty() || o.receipt.new_ordinal_id.is_empty() => {
                return Err(self.fail("Minting Failed", MinterError::Chain("mint returned an empty receipt".into())));
            }
            Ok(o) => o,
            Err(e) => return Err(self.fail("Minting Failed", e)),
        };

        self.status = MintStatus::Success;
        self.notices.push(Notice::info("Minting Successful", format!("Transaction {}", outcome.receipt.tx_id)));
        self.artifact = Some(outcome.artifact);
        self.receipt = Some(outcome.receipt.clone());
        Ok(outcome.receipt)
    }

    pub fn reset(&mut self) {
        self.step = MintStep::Connect;
        self.status = MintStatus::Idle;
        self.address = None;
        self.file = None;
        self.ordinal_data = None;
        self.artifact = None;
        self.receipt = None;
    }

    fn fail(&mut self, title: &str, e: MinterError) -> MinterError {
        self.status = MintStatus::Error;
        self.notices.push(Notice::error(title, e.to_string()));
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::backend::{MintOutcome, SimulatedBackend};
    use async_trait::async_trait;
    use serde_json::json;

    struct Failing;

    #[async_trait]
    impl MintBackend for Failing {
        async fn validate(&self, _: &Upload, _: &str) -> MinterResult<OrdinalData> {
            Err(MinterError::invalid("Collection nope not found"))
        }
        async fn mint(&self, _: &str, _: &str, _: Quality) -> MinterResult<MintOutcome> {
            Err(MinterError::Chain("node unreachable".into()))
        }
    }

    fn png() -> Upload { Upload::new("fox.png", "image/png", vec![1, 2, 3, 4]) }

    #[tokio::test]
    async fn happy_path_reaches_success() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        assert_eq!(flow.state(), FlowState::initial());
        flow.wallet_connected("1Alice").unwrap();
        assert_eq!(flow.step(), MintStep::Upload);
        flow.select_file(png()).unwrap();
        let data = flow.validate().await.unwrap();
        assert_eq!(data.collection_name, "Pixel Foxes");
        assert_eq!(flow.step(), MintStep::Preview);
        assert_eq!(flow.status(), MintStatus::Idle);

        let receipt = flow.mint(Quality::Standard).await.unwrap();
        assert!(!receipt.tx_id.is_empty());
        assert!(!receipt.new_ordinal_id.is_empty());
        assert_eq!(flow.step(), MintStep::Mint);
        assert_eq!(flow.status(), MintStatus::Success);
        assert_eq!(flow.artifact().unwrap().owner, "1Alice");
    }

    #[test]
    fn non_image_is_rejected_with_fixed_message() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        flow.wallet_connected("1Alice").unwrap();
        let err = flow.select_file(Upload::new("notes.pdf", "application/pdf", vec![1])).unwrap_err();
        assert_eq!(err.to_string(), "Please upload an image file (JPG, PNG, GIF, SVG).");
        let notice = flow.notices.last().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.title, "Invalid File Type");
        assert!(flow.selected_file().is_none());
        assert_eq!(flow.status(), MintStatus::Idle);
    }

    #[tokio::test]
    async fn reset_returns_to_initial_state() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        flow.wallet_connected("1Alice").unwrap();
        flow.select_file(png()).unwrap();
        flow.validate().await.unwrap();
        flow.mint(Quality::High).await.unwrap();
        flow.reset();
        assert_eq!(flow.state(), FlowState::initial());
        assert!(flow.artifact().is_none() && flow.receipt().is_none() && flow.selected_file().is_none());
        assert_eq!(
            serde_json::to_value(flow.state()).unwrap(),
            json!({"step": "connect", "status": "idle", "ordinalData": null})
        );
    }

    #[tokio::test]
    async fn failure_requires_restart() {
        let mut flow = MintFlow::new(Failing);
        flow.wallet_connected("1Alice").unwrap();
        flow.select_file(png()).unwrap();
        assert!(flow.validate().await.is_err());
        assert_eq!(flow.status(), MintStatus::Error);
        assert_eq!(flow.notices.last().unwrap().description, "Collection nope not found");

        assert!(matches!(flow.validate().await, Err(MinterError::RestartRequired(_))));
        assert!(matches!(flow.select_file(png()), Err(MinterError::RestartRequired(_))));
        let notices_before = flow.notices.len();
        flow.reset();
        assert_eq!(flow.state(), FlowState::initial());
        assert_eq!(flow.notices.len(), notices_before);
    }

    #[tokio::test]
    async fn mint_requires_preview() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        assert!(flow.mint(Quality::Standard).await.is_err());
        flow.wallet_connected("1Alice").unwrap();
        assert!(flow.validate().await.is_err());
        assert_eq!(flow.status(), MintStatus::Idle);
    }

    #[tokio::test]
    async fn validate_is_one_way() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        flow.wallet_connected("1Alice").unwrap();
        flow.select_file(png()).unwrap();
        flow.validate().await.unwrap();
        assert!(matches!(flow.validate().await, Err(MinterError::Invalid(_))));
        assert_eq!((flow.step(), flow.status()), (MintStep::Preview, MintStatus::Idle));

        flow.mint(Quality::Standard).await.unwrap();
        assert!(matches!(flow.validate().await, Err(MinterError::Invalid(_))));
        assert!(flow.mint(Quality::Standard).await.is_err());
        assert_eq!((flow.step(), flow.status()), (MintStep::Mint, MintStatus::Success));
    }

    #[test]
    fn upload_needs_connected_wallet() {
        let mut flow = MintFlow::new(SimulatedBackend::instant());
        assert!(flow.select_file(png()).is_err());
        assert_eq!(flow.step(), MintStep::Connect);
    }
}

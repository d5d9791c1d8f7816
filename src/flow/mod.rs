//! Flow: the client side of minting
//!
//! - **WalletSession**: connection state over a `WalletProvider`
//! - **MintFlow**: connect → upload → preview → mint, with an idle / processing /
//!   success / error status
//! - **MintBackend**: what the flow calls; simulated or in-process services
//! - **Notices**: toast-style messages the flow emits on every outcome

mod backend;
mod mint;
mod notice;
mod wallet;

pub use backend::{
    ArtifactStatus, MintBackend, MintOutcome, OrdinalData, ServiceBackend, SimulatedBackend, ThreeDArtifact,
    SIMULATED_MINT_DELAY, SIMULATED_VALIDATE_DELAY,
};
pub use mint::{FlowState, MintFlow, MintStatus, MintStep};
pub use notice::{Notice, NoticeLevel, Notices};
pub use wallet::{StaticWallet, WalletProvider, WalletSession};

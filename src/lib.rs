//! Ordinal Minter: turn a 2D Ordinal into a 3D one on a simulated chain.
//!
//! # Architecture
//!
//! ```text
//! HTTP (axum) ──┐
//!               ├─► Minter ─┬─► BsvService ──► ChainBackend (SimulatedChain)
//! MintFlow ─────┘           ├─► ThreeDService
//!  (ServiceBackend)         └─► Storage (MemStorage, seeded fixtures)
//! ```
//!
//! # Client flow
//!
//! | Step | Operation | Moves to |
//! |------|-----------|----------|
//! | connect | `flow.wallet_connected(addr)` | upload |
//! | upload | `flow.select_file(file)` then `flow.validate()` | preview |
//! | preview | `flow.mint(quality)` | mint |
//! | any | `flow.reset()` | connect |
//!
//! # Features
//!
//! - `native` - HTTP server, CLI, signal handling, log subscriber
//!
//! # Usage
//!
//! ```ignore
//! use ordinal_minter::{Minter, MinterConfig, Quality, Upload};
//!
//! let minter = Minter::from_config(MinterConfig::new("demo"));
//! let result = minter.validate(&Upload::new("fox.png", "image/png", bytes), "1Alice", None)?;
//! let ordinal = result.ordinal.unwrap();
//! let receipt = minter.mint(&ordinal.inscription_id, "1Alice", Quality::High).await?;
//! ```

// =============================================================================
// Shared modules
// =============================================================================
pub mod core;
pub mod error;
pub mod flow;
pub mod minter;
pub mod services;
pub mod storage;

// =============================================================================
// Native-only modules (server, CLI, tokio signals)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod runtime;
#[cfg(feature = "native")]
pub mod server;

// =============================================================================
// Re-exports
// =============================================================================
pub use crate::core::model::{
    Collection, CollectionStats, Id, MintReceipt, MintingTransaction, Ordinal, Quality, ThreeDOrdinal, TxStatus,
    Upload, ValidationResult,
};
pub use error::{MinterError, MinterResult};
pub use flow::{MintBackend, MintFlow, ServiceBackend, SimulatedBackend, StaticWallet, WalletProvider, WalletSession};
pub use minter::{Minter, MinterConfig};
pub use services::{BsvService, ChainBackend, SimulatedChain, ThreeDService};
pub use storage::{MemStorage, Storage};

#[cfg(feature = "native")]
pub use runtime::{install_signal_handlers, Shutdown};
#[cfg(feature = "native")]
pub use server::{create_router, create_router_with_name};

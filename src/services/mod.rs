//! Services: mocked chain and 3D-generation work over `Storage`
//!
//! ```text
//! validate ─► BsvService ─► Storage (ordinal)
//! generate ─► ThreeDService ─► Storage (3D ordinal)
//! mint ─────► BsvService ─► ChainBackend.broadcast ─► Storage (tx, collection)
//! ```

mod bsv;
mod chain;
mod three_d;

pub use bsv::BsvService;
pub use chain::{fabricate_inscription_id, fabricate_txid, Broadcast, ChainBackend, Inscription, SimulatedChain};
pub use three_d::ThreeDService;

//! ThreeDService - "converts" an ordinal into a 3D ordinal
//!
//! No mesh is built. A canned Khronos sample is chosen by ordinal id and the
//! polygon / texture / size metadata comes from the quality tier.

use std::sync::Arc;
use tracing::{debug, info};

use crate::core::constants::{inscriptions, models};
use crate::core::model::{NewThreeD, Ordinal, Quality, ThreeDOrdinal};
use crate::error::MinterResult;
use crate::services::chain::fabricate_inscription_number;
use crate::storage::Storage;

pub struct ThreeDService {
    storage: Arc<dyn Storage>,
}

impl ThreeDService {
    pub fn new(storage: Arc<dyn Storage>) -> Self { Self { storage } }

    pub fn model_url_for(ordinal_id: u32) -> &'static str {
        models::SAMPLES[ordinal_id as usize % models::SAMPLES.len()]
    }

    /// Existing 3D ordinal for this source is returned as-is, whatever `quality` asks for.
    pub fn generate(&self, ordinal: &Ordinal, quality: Quality) -> MinterResult<ThreeDOrdinal> {
        let (three_d, created) = self.storage.three_d_for_source(NewThreeD {
            inscription_id: format!("{}{}", inscriptions::THREE_D_PREFIX, ordinal.inscription_id),
            inscription_number: fabricate_inscription_number(inscriptions::THREE_D_BASE, inscriptions::SPREAD),
            model_url: Self::model_url_for(ordinal.id).into(),
            quality,
            format: models::FORMAT.into(),
            original_ordinal_id: ordinal.id,
            owner: ordinal.owner.clone(),
            collection_id: ordinal.collection_id,
            name: None,
        })?;
        if created {
            info!(ordinal = ordinal.id, three_d = three_d.id, quality = quality.as_str(), "generated 3D model");
        } else {
            debug!(ordinal = ordinal.id, three_d = three_d.id, "reusing generated model");
        }
        Ok(three_d)
    }
}

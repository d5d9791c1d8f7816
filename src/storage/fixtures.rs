//! Seed data loaded into every fresh store.

use crate::core::constants::models;
use crate::core::model::{NewCollection, Quality};

pub const EXAMPLE_OWNER: &str = "Example Owner";
pub const PIXEL_FOXES_SLUG: &str = "bsv-20-foxes";
pub const PIXEL_FOXES_IMAGE: &str = "https://mint-sites.s3.amazonaws.com/foxes/yellow-fox.png";

pub fn collections() -> Vec<NewCollection> {
    vec![NewCollection {
        collection_id: PIXEL_FOXES_SLUG.into(),
        name: "Pixel Foxes".into(),
        description: "A collection of pixel art foxes on the BSV blockchain".into(),
        max_supply: 10_000_000,
        minted: 2_716_039,
        three_d_minted: 1_243,
        mint_fee: crate::core::constants::fees::BASE_MINT,
        image_url: Some(PIXEL_FOXES_IMAGE.into()),
    }]
}

/// Example artifact: (source inscription, display name, quality, minted days ago).
pub struct ExampleArtifact {
    pub inscription_id: &'static str,
    pub name: &'static str,
    pub quality: Quality,
    pub minted_days_ago: i64,
}

pub const EXAMPLES: [ExampleArtifact; 4] = [
    ExampleArtifact { inscription_id: "1234...5678", name: "Pixel Fox #247", quality: Quality::Standard, minted_days_ago: 3 },
    ExampleArtifact { inscription_id: "5678...9012", name: "Pixel Fox #592", quality: Quality::High, minted_days_ago: 7 },
    ExampleArtifact { inscription_id: "9012...3456", name: "Pixel Fox #136", quality: Quality::Standard, minted_days_ago: 14 },
    ExampleArtifact { inscription_id: "3456...7890", name: "Pixel Fox #429", quality: Quality::Ultra, minted_days_ago: 30 },
];

pub fn example_model_url(index: usize) -> &'static str { models::SAMPLES[index % models::SAMPLES.len()] }

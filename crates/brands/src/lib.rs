//! `brandhub-brands`
//!
//! **Responsibility:** brand profiles and their embedded competitor and
//! integration collections.

pub mod brand;
pub mod seed;

pub use brand::{
    Brand, BrandColors, BrandFonts, Competitor, CompetitorUpdate, Integration, IntegrationCategory,
    IntegrationId, NewCompetitor, ToneOfVoice,
};

//! Built-in brand fixtures, written to an empty store on first run.

use brandhub_core::{EntityId, Record};

use crate::brand::{Brand, BrandColors, BrandFonts, Competitor, Integration, IntegrationId, ToneOfVoice};

pub const QUANTUMLEAP_ID: &str = "brand-1";
pub const EVERGREEN_ID: &str = "brand-2";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn competitor(id: &str, name: &str, website: &str, analysis: &str) -> Competitor {
    Competitor {
        id: EntityId::new(id),
        name: name.to_string(),
        website: Some(website.to_string()),
        analysis: Some(analysis.to_string()),
    }
}

fn quantumleap() -> Brand {
    Brand {
        name: "QuantumLeap Tech".to_string(),
        logo: "https://i.picsum.photos/id/1079/100/100.jpg".to_string(),
        secondary_logo: Some("https://i.picsum.photos/id/1079/50/50.jpg".to_string()),
        website: Some("https://quantumleap.tech".to_string()),
        description: Some("Pioneering the future of AI-driven business intelligence solutions.".to_string()),
        audience: Some("Enterprise-level executives and tech enthusiasts".to_string()),
        base_tone: Some(ToneOfVoice::Professional),
        messaging_pillars: strings(&["Innovation", "Efficiency", "Security"]),
        dos: strings(&["Use data-driven language", "Focus on ROI", "Be forward-thinking"]),
        donts: strings(&[
            "Use slang or overly casual terms",
            "Overpromise on capabilities",
            "Ignore data privacy",
        ]),
        colors: Some(BrandColors {
            primary: "#5c22d9".to_string(),
            secondary: "#1f2937".to_string(),
        }),
        fonts: Some(BrandFonts {
            primary: "Inter".to_string(),
            secondary: "Roboto Slab".to_string(),
        }),
        approved_images: strings(&[
            "https://picsum.photos/seed/tech1/400/300",
            "https://picsum.photos/seed/tech2/400/300",
        ]),
        mission: Some(
            "To empower businesses with actionable insights through cutting-edge artificial intelligence."
                .to_string(),
        ),
        values: strings(&["Integrity", "Innovation", "Customer Success"]),
        competitors: vec![
            competitor(
                "comp-1",
                "FutureScape Inc.",
                "futurescape.com",
                "Strong focus on B2B enterprise clients. Weak social media presence.",
            ),
            competitor(
                "comp-2",
                "Innovate Solutions",
                "innovatesolutions.com",
                "Aggressive ad spend on LinkedIn. Recently launched a popular podcast.",
            ),
        ],
        integrations: Integration::full_set(&[
            IntegrationId::GoogleAnalytics,
            IntegrationId::Linkedin,
            IntegrationId::Twitter,
            IntegrationId::Salesforce,
        ]),
    }
}

fn evergreen() -> Brand {
    Brand {
        name: "Evergreen Goods".to_string(),
        logo: "https://i.picsum.photos/id/1015/100/100.jpg".to_string(),
        secondary_logo: Some("https://i.picsum.photos/id/1015/50/50.jpg".to_string()),
        website: Some("https://evergreengoods.com".to_string()),
        description: Some("Sustainable and ethically sourced products for a conscious lifestyle.".to_string()),
        audience: Some("Eco-conscious millennials and families".to_string()),
        base_tone: Some(ToneOfVoice::Casual),
        messaging_pillars: strings(&["Sustainability", "Quality", "Community"]),
        dos: strings(&[
            "Be authentic and transparent",
            "Use warm, inviting language",
            "Highlight eco-friendly aspects",
        ]),
        donts: strings(&["Greenwashing", "Use corporate jargon", "Be preachy"]),
        colors: Some(BrandColors {
            primary: "#10b981".to_string(),
            secondary: "#475569".to_string(),
        }),
        fonts: Some(BrandFonts {
            primary: "Poppins".to_string(),
            secondary: "Lora".to_string(),
        }),
        approved_images: strings(&[
            "https://picsum.photos/seed/eco1/400/300",
            "https://picsum.photos/seed/eco2/400/300",
        ]),
        mission: Some("To make sustainable living beautiful, accessible, and affordable for everyone.".to_string()),
        values: strings(&["Ethical Sourcing", "Environmental Stewardship", "Community"]),
        competitors: vec![
            competitor(
                "comp-3",
                "EcoLiving Co.",
                "ecoliving.com",
                "Dominates Pinterest and Instagram with visual content. Strong brand loyalty.",
            ),
            competitor(
                "comp-4",
                "GreenCart",
                "greencart.com",
                "Heavily reliant on influencer marketing. Runs frequent sales promotions.",
            ),
        ],
        integrations: Integration::full_set(&[
            IntegrationId::Instagram,
            IntegrationId::Facebook,
            IntegrationId::Shopify,
            IntegrationId::Mailchimp,
        ]),
    }
}

pub fn brands() -> Vec<Record<Brand>> {
    vec![
        Record::new(QUANTUMLEAP_ID, quantumleap()),
        Record::new(EVERGREEN_ID, evergreen()),
    ]
}

/// Starting profile for a newly created brand.
///
/// Copies the first fixture's voice and style, renamed, with no competitors
/// and every integration disconnected.
pub fn template(name: impl Into<String>) -> Brand {
    Brand {
        name: name.into(),
        competitors: Vec::new(),
        integrations: Integration::full_set(&[]),
        ..quantumleap()
    }
}

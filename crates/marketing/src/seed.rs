//! Marketing fixtures. Dates are relative to `now`.

use chrono::{DateTime, Duration, Utc};

use brandhub_brands::seed::{EVERGREEN_ID, QUANTUMLEAP_ID};
use brandhub_core::{BrandId, EntityId, Record};

use crate::asset::{Asset, AssetCollection, GeneratedContentType};
use crate::automation::{AutomationNode, AutomationWorkflow, NodeKind};
use crate::calendar::{CalendarContent, ContentCalendarEvent};
use crate::campaign::{Campaign, CampaignStatus, Kpi};
use crate::goal::{Goal, SubTask};
use crate::influencer::{Influencer, InfluencerPlatform};

fn ids(items: &[&str]) -> Vec<EntityId> {
    items.iter().map(|s| EntityId::new(*s)).collect()
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn campaigns(now: DateTime<Utc>) -> Vec<Record<Campaign>> {
    vec![
        Record::new(
            "camp-1",
            Campaign {
                description: "Multi-channel campaign to launch our new flagship product.".into(),
                status: CampaignStatus::Active,
                kpis: vec![Kpi { name: "Leads Generated".into(), target: 500.0, actual: 152.0 }],
                budget: Some(50_000.0),
                linked_asset_ids: Some(ids(&["asset-1"])),
                ..Campaign::new(
                    QUANTUMLEAP_ID,
                    "Project Titan Launch",
                    now - Duration::days(10),
                    now + Duration::days(50),
                )
            },
        ),
        Record::new(
            "camp-2",
            Campaign {
                description: "Campaign celebrating Earth Month with special promotions and content."
                    .into(),
                status: CampaignStatus::Completed,
                kpis: vec![Kpi { name: "Sales".into(), target: 20_000.0, actual: 25_400.0 }],
                budget: Some(15_000.0),
                linked_asset_ids: Some(ids(&["asset-2", "asset-3"])),
                ..Campaign::new(
                    EVERGREEN_ID,
                    "Earth Month Promotion",
                    now - Duration::days(60),
                    now - Duration::days(30),
                )
            },
        ),
    ]
}

pub fn assets(now: DateTime<Utc>) -> Vec<Record<Asset>> {
    vec![
        Record::new(
            "asset-1",
            Asset {
                tags: Some(tags(&["launch", "ai", "b2b"])),
                ..Asset::new(
                    QUANTUMLEAP_ID,
                    "Ad Copy: Titan Launch",
                    GeneratedContentType::AdCopy,
                    "Unleash the power of AI with Project Titan. The future of business intelligence is here.",
                )
            },
        )
        .with_created_at(now - Duration::days(8)),
        Record::new(
            "asset-2",
            Asset {
                image_url: Some("https://picsum.photos/seed/forest/400/300".into()),
                tags: Some(tags(&["nature", "eco", "green"])),
                ..Asset::new(
                    EVERGREEN_ID,
                    "Image: Forest Canopy",
                    GeneratedContentType::Image,
                    "A lush green forest canopy from above.",
                )
            },
        )
        .with_created_at(now - Duration::days(40)),
        Record::new(
            "asset-3",
            Asset {
                tags: Some(tags(&["sustainability", "blog", "eco-friendly"])),
                ..Asset::new(
                    EVERGREEN_ID,
                    "Blog Idea: 10 Ways to Reduce Plastic Waste",
                    GeneratedContentType::BlogIdea,
                    "Title: 10 Simple Swaps to Reduce Plastic Waste in Your Home\n\
                     Description: An actionable guide for families looking to start their sustainability journey.",
                )
            },
        )
        .with_created_at(now - Duration::days(35)),
    ]
}

pub fn collections() -> Vec<Record<AssetCollection>> {
    vec![
        Record::new(
            "coll-1",
            AssetCollection {
                asset_ids: ids(&["asset-1"]),
                ..AssetCollection::new(QUANTUMLEAP_ID, "Project Titan Assets")
            },
        ),
        Record::new(
            "coll-2",
            AssetCollection {
                asset_ids: ids(&["asset-2", "asset-3"]),
                ..AssetCollection::new(EVERGREEN_ID, "Earth Month Content")
            },
        ),
    ]
}

fn sub_task(id: &str, text: &str, completed: bool) -> SubTask {
    SubTask { id: id.into(), text: text.into(), completed }
}

pub fn goals() -> Vec<Record<Goal>> {
    vec![
        Record::new(
            "goal-1",
            Goal {
                brand_id: BrandId::new(QUANTUMLEAP_ID),
                title: "Become a recognized thought leader in AI".into(),
                sub_tasks: vec![
                    sub_task("gst-1", "Publish 4 blog posts", true),
                    sub_task("gst-2", "Host 2 webinars", false),
                ],
            },
        ),
        Record::new(
            "goal-2",
            Goal {
                brand_id: BrandId::new(EVERGREEN_ID),
                title: "Increase customer retention by 15%".into(),
                sub_tasks: vec![
                    sub_task("gst-3", "Launch loyalty program", true),
                    sub_task("gst-4", "Implement feedback survey", true),
                ],
            },
        ),
    ]
}

pub fn calendar_events(now: DateTime<Utc>) -> Vec<Record<ContentCalendarEvent>> {
    vec![
        Record::new(
            "calevent-1",
            ContentCalendarEvent {
                brand_id: BrandId::new(QUANTUMLEAP_ID),
                date: now + Duration::days(7),
                title: "Webinar: The Future of BI".into(),
                content: CalendarContent {
                    kind: GeneratedContentType::SocialPost,
                    text: "Join our webinar on the future of Business Intelligence! Register now.".into(),
                    image_url: None,
                },
            },
        ),
        Record::new(
            "calevent-2",
            ContentCalendarEvent {
                brand_id: BrandId::new(EVERGREEN_ID),
                date: now + Duration::days(3),
                title: "Blog Post: Plastic Waste".into(),
                content: CalendarContent {
                    kind: GeneratedContentType::BlogIdea,
                    text: "Publish the blog post on 10 ways to reduce plastic waste.".into(),
                    image_url: None,
                },
            },
        ),
    ]
}

pub fn automations() -> Vec<Record<AutomationWorkflow>> {
    use NodeKind::{Action, Delay, Trigger};

    vec![
        Record::new(
            "auto-1",
            AutomationWorkflow {
                brand_id: BrandId::new(QUANTUMLEAP_ID),
                name: "New Lead Nurturing".into(),
                description: "Sends a series of emails to new leads from Salesforce.".into(),
                trigger: AutomationNode::new("n1", Trigger, "New Lead in Salesforce"),
                steps: vec![
                    AutomationNode::new("n2", Action, "Send Welcome Email"),
                    AutomationNode::new("n3", Delay, "Wait 3 Days"),
                    AutomationNode::new("n4", Action, "Send Case Study"),
                ],
                active: true,
            },
        ),
        Record::new(
            "auto-2",
            AutomationWorkflow {
                brand_id: BrandId::new(EVERGREEN_ID),
                name: "Post-Purchase Follow-up".into(),
                description: "Follows up with customers after a Shopify purchase.".into(),
                trigger: AutomationNode::new("n5", Trigger, "New Order in Shopify"),
                steps: vec![
                    AutomationNode::new("n6", Action, "Send Thank You Email"),
                    AutomationNode::new("n7", Delay, "Wait 14 Days"),
                    AutomationNode::new("n8", Action, "Request a Review"),
                ],
                active: false,
            },
        ),
    ]
}

pub fn influencers() -> Vec<Record<Influencer>> {
    vec![
        Record::new(
            "inf-1",
            Influencer {
                brand_id: BrandId::new(QUANTUMLEAP_ID),
                name: "TechVisionary".into(),
                handle: "@techvisionary".into(),
                platform: InfluencerPlatform::TwitterX,
                followers: 125_000,
                engagement_rate: 3.5,
                avatar_url: "https://i.pravatar.cc/150?u=tech".into(),
                tags: tags(&["ai", "tech", "business"]),
                ai_analysis: None,
            },
        ),
        Record::new(
            "inf-2",
            Influencer {
                brand_id: BrandId::new(EVERGREEN_ID),
                name: "Sustainable Sarah".into(),
                handle: "@sustainablesarah".into(),
                platform: InfluencerPlatform::Instagram,
                followers: 82_000,
                engagement_rate: 5.2,
                avatar_url: "https://i.pravatar.cc/150?u=sarah".into(),
                tags: tags(&["eco", "lifestyle", "sustainable"]),
                ai_analysis: None,
            },
        ),
    ]
}

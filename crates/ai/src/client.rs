//! Typed calls, one per generation capability.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use brandhub_core::BrandId;

use crate::config::GenerationConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::transport::{GenerationTransport, HttpTransport};
use crate::types::{
    AutomationRecipe, BlogIdea, BrainstormIdea, BreakdownStep, CalendarSuggestion, CampaignBrief, DateRange,
    EmailContent, EmailDraft, SeoKeyword, SuggestedTask, WorkflowDraft,
};

/// Network a social post is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialPlatform {
    #[serde(rename = "Twitter/X")]
    Twitter,
    Instagram,
    LinkedIn,
    Facebook,
}

/// Stateless facade over a [`GenerationTransport`].
///
/// Tone, content type and every contextual payload (brand, client, budgets,
/// ...) are accepted as any `Serialize` value and sent as-is.
#[derive(Debug, Clone)]
pub struct GenerationClient<T = HttpTransport> {
    transport: T,
}

impl GenerationClient<HttpTransport> {
    pub fn http(config: GenerationConfig) -> GenerationResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

fn encode(value: &impl Serialize) -> GenerationResult<Value> {
    serde_json::to_value(value).map_err(|e| GenerationError::InvalidRequest(e.to_string()))
}

fn decode<R: DeserializeOwned>(capability: &str, value: Value) -> GenerationResult<R> {
    serde_json::from_value(value).map_err(|e| GenerationError::UnusableOutput(format!("{capability}: {e}")))
}

/// Plain-text responses must carry some text.
fn text(capability: &str, value: Value) -> GenerationResult<String> {
    let text: String = decode(capability, value)?;
    if text.trim().is_empty() {
        return Err(GenerationError::UnusableOutput(format!("{capability}: empty text")));
    }
    Ok(text)
}

/// String field `field` of an object response.
fn text_field(capability: &str, value: Value, field: &str) -> GenerationResult<String> {
    match value.get(field) {
        Some(inner) => text(capability, inner.clone()),
        None => Err(GenerationError::UnusableOutput(format!(
            "{capability}: missing `{field}`"
        ))),
    }
}

impl<T: GenerationTransport> GenerationClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(&self, capability: &str, body: Value) -> GenerationResult<Value> {
        tracing::debug!(capability, "generation request");
        match self.transport.post(capability, body).await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(capability, error = %err, "generation failed");
                Err(err)
            }
        }
    }

    async fn call_as<R: DeserializeOwned>(&self, capability: &str, body: Value) -> GenerationResult<R> {
        let value = self.call(capability, body).await?;
        decode(capability, value)
    }

    async fn call_text(&self, capability: &str, body: Value) -> GenerationResult<String> {
        let value = self.call(capability, body).await?;
        text(capability, value)
    }

    async fn call_field(&self, capability: &str, body: Value, field: &str) -> GenerationResult<String> {
        let value = self.call(capability, body).await?;
        text_field(capability, value, field)
    }

    pub async fn social_post(
        &self,
        brand_id: &BrandId,
        platform: SocialPlatform,
        product: &str,
        audience: &str,
        tone: &(impl Serialize + Sync),
    ) -> GenerationResult<String> {
        let body = json!({
            "brandId": brand_id,
            "platform": encode(&platform)?,
            "product": product,
            "audience": audience,
            "tone": encode(tone)?,
        });
        self.call_text("social-post", body).await
    }

    pub async fn ad_copy(
        &self,
        brand_id: &BrandId,
        product: &str,
        selling_points: &str,
        tone: &(impl Serialize + Sync),
    ) -> GenerationResult<String> {
        let body = json!({
            "brandId": brand_id,
            "product": product,
            "sellingPoints": selling_points,
            "tone": encode(tone)?,
        });
        self.call_text("ad-copy", body).await
    }

    pub async fn blog_ideas(&self, brand_id: &BrandId, topic: &str) -> GenerationResult<Vec<BlogIdea>> {
        self.call_as("blog-ideas", json!({ "brandId": brand_id, "topic": topic }))
            .await
    }

    /// URL of a generated image.
    pub async fn marketing_image(&self, brand_id: &BrandId, prompt: &str) -> GenerationResult<String> {
        self.call_field("image", json!({ "brandId": brand_id, "prompt": prompt }), "imageUrl")
            .await
    }

    pub async fn seo_keywords(&self, brand_id: &BrandId, topic: &str) -> GenerationResult<Vec<SeoKeyword>> {
        self.call_as("seo-keywords", json!({ "brandId": brand_id, "topic": topic }))
            .await
    }

    pub async fn email_campaign(
        &self,
        brand_id: &BrandId,
        goal: &str,
        product_info: &str,
        tone: &(impl Serialize + Sync),
    ) -> GenerationResult<EmailContent> {
        let body = json!({
            "brandId": brand_id,
            "goal": goal,
            "productInfo": product_info,
            "tone": encode(tone)?,
        });
        self.call_as("email-campaign", body).await
    }

    pub async fn repurpose_content(
        &self,
        brand_id: &BrandId,
        original_content: &str,
        target_format: &str,
    ) -> GenerationResult<String> {
        let body = json!({
            "brandId": brand_id,
            "originalContent": original_content,
            "targetFormat": target_format,
        });
        self.call_text("repurpose", body).await
    }

    pub async fn asset_tags(
        &self,
        content: &str,
        content_type: &(impl Serialize + Sync),
    ) -> GenerationResult<Vec<String>> {
        let body = json!({ "content": content, "type": encode(content_type)? });
        self.call_as("tags", body).await
    }

    /// Free-form completion of `prompt`.
    pub async fn suggestion(&self, prompt: &str) -> GenerationResult<String> {
        self.call_text("suggestion", json!({ "prompt": prompt })).await
    }

    pub async fn competitor_analysis(
        &self,
        brand_id: &BrandId,
        name: &str,
        website: Option<&str>,
    ) -> GenerationResult<String> {
        let mut competitor = json!({ "name": name });
        if let Some(website) = website {
            competitor["website"] = json!(website);
        }
        let body = json!({ "brandId": brand_id, "competitor": competitor });
        self.call_field("competitor-analysis", body, "analysis").await
    }

    /// Content ideas for days that have nothing scheduled.
    pub async fn calendar_suggestions(
        &self,
        brand_id: &BrandId,
        empty_dates: &[NaiveDate],
    ) -> GenerationResult<Vec<CalendarSuggestion>> {
        let dates: Vec<String> = empty_dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
        self.call_as(
            "calendar-suggestions",
            json!({ "brandId": brand_id, "emptyDates": dates }),
        )
        .await
    }

    pub async fn automation_workflow(&self, brand_id: &BrandId, goal: &str) -> GenerationResult<WorkflowDraft> {
        self.call_as("automation-workflow", json!({ "brandId": brand_id, "goal": goal }))
            .await
    }

    pub async fn vet_influencer(&self, brand_id: &BrandId, handle: &str) -> GenerationResult<String> {
        self.call_field("vet-influencer", json!({ "brandId": brand_id, "handle": handle }), "analysis")
            .await
    }

    pub async fn integration_insights(
        &self,
        brand_id: &BrandId,
        integrations: &(impl Serialize + Sync),
    ) -> GenerationResult<String> {
        let body = json!({ "brandId": brand_id, "integrations": encode(integrations)? });
        self.call_field("integration-insights", body, "insight").await
    }

    pub async fn financial_summary(
        &self,
        brand: &(impl Serialize + Sync),
        budgets: &(impl Serialize + Sync),
        expenses: &(impl Serialize + Sync),
        invoices: &(impl Serialize + Sync),
    ) -> GenerationResult<String> {
        let body = json!({
            "brand": encode(brand)?,
            "financials": {
                "budgets": encode(budgets)?,
                "expenses": encode(expenses)?,
                "invoices": encode(invoices)?,
            },
        });
        self.call_field("financial-summary", body, "summary").await
    }

    /// Payment reminder for `invoice`.
    pub async fn invoice_email(
        &self,
        brand: &(impl Serialize + Sync),
        client: &(impl Serialize + Sync),
        invoice: &(impl Serialize + Sync),
    ) -> GenerationResult<EmailDraft> {
        let body = json!({
            "brand": encode(brand)?,
            "client": encode(client)?,
            "invoice": encode(invoice)?,
        });
        self.call_as("invoice-email", body).await
    }

    pub async fn client_report(
        &self,
        client: &(impl Serialize + Sync),
        brands: &(impl Serialize + Sync),
        campaigns: &(impl Serialize + Sync),
        projects: &(impl Serialize + Sync),
        invoices: &(impl Serialize + Sync),
        range: DateRange,
    ) -> GenerationResult<String> {
        let body = json!({
            "client": encode(client)?,
            "brands": encode(brands)?,
            "campaigns": encode(campaigns)?,
            "projects": encode(projects)?,
            "invoices": encode(invoices)?,
            "dateRange": encode(&range)?,
        });
        self.call_field("client-report", body, "report").await
    }

    pub async fn project_tasks(&self, name: &str, description: &str) -> GenerationResult<Vec<SuggestedTask>> {
        self.call_as("project-tasks", json!({ "name": name, "description": description }))
            .await
    }

    /// Sub-task texts for a goal.
    pub async fn goal_breakdown(&self, brand_id: &BrandId, goal: &str) -> GenerationResult<Vec<String>> {
        let steps: Vec<BreakdownStep> = self
            .call_as("goal-breakdown", json!({ "brandId": brand_id, "goal": goal }))
            .await?;
        Ok(steps.into_iter().map(BreakdownStep::into_text).collect())
    }

    pub async fn answer_data_question(&self, brand_id: &BrandId, question: &str) -> GenerationResult<String> {
        self.call_text("data-qa", json!({ "question": question, "brandId": brand_id }))
            .await
    }

    pub async fn full_report(&self, brand_id: &BrandId) -> GenerationResult<String> {
        self.call_text("full-report", json!({ "brandId": brand_id })).await
    }

    pub async fn brainstorm_ideas(&self, topic: &str) -> GenerationResult<Vec<BrainstormIdea>> {
        self.call_as("brainstorm-ideas", json!({ "topic": topic })).await
    }

    pub async fn automation_recipes(
        &self,
        brand: &(impl Serialize + Sync),
    ) -> GenerationResult<Vec<AutomationRecipe>> {
        self.call_as("automation-recipes", json!({ "brand": encode(brand)? }))
            .await
    }

    pub async fn influencer_outreach(
        &self,
        brand: &(impl Serialize + Sync),
        influencer: &(impl Serialize + Sync),
        goal: &str,
    ) -> GenerationResult<EmailDraft> {
        let body = json!({
            "brand": encode(brand)?,
            "influencer": encode(influencer)?,
            "goal": goal,
        });
        self.call_as("influencer-outreach", body).await
    }

    pub async fn campaign_brief(&self, brand_id: &BrandId, goal: &str) -> GenerationResult<CampaignBrief> {
        self.call_as("campaign-brief", json!({ "brandId": brand_id, "goal": goal }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::types::IdeaCategory;

    /// Canned responses per capability; records every request.
    #[derive(Default)]
    struct Scripted {
        responses: HashMap<&'static str, GenerationResult<Value>>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl Scripted {
        fn reply(mut self, capability: &'static str, response: GenerationResult<Value>) -> Self {
            self.responses.insert(capability, response);
            self
        }

        fn last_request(&self) -> (String, Value) {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerationTransport for Scripted {
        async fn post(&self, capability: &str, body: Value) -> GenerationResult<Value> {
            self.requests.lock().unwrap().push((capability.to_string(), body));
            self.responses
                .get(capability)
                .cloned()
                .unwrap_or_else(|| Err(GenerationError::Transport(format!("no script for {capability}"))))
        }
    }

    fn brand() -> BrandId {
        BrandId::new("brand-1")
    }

    #[tokio::test]
    async fn social_post_sends_camel_case_body() {
        let client = GenerationClient::new(Scripted::default().reply("social-post", Ok(json!("Meet Titan."))));

        let post = client
            .social_post(&brand(), SocialPlatform::Twitter, "Titan", "CTOs", &"Witty")
            .await
            .unwrap();
        assert_eq!(post, "Meet Titan.");

        let (capability, body) = client.transport().last_request();
        assert_eq!(capability, "social-post");
        assert_eq!(
            body,
            json!({
                "brandId": "brand-1",
                "platform": "Twitter/X",
                "product": "Titan",
                "audience": "CTOs",
                "tone": "Witty",
            })
        );
    }

    #[tokio::test]
    async fn wrapped_results_are_unwrapped() {
        let client = GenerationClient::new(
            Scripted::default()
                .reply("image", Ok(json!({ "imageUrl": "https://cdn.example/titan.png" })))
                .reply("competitor-analysis", Ok(json!({ "analysis": "Cheaper, slower." }))),
        );

        let url = client.marketing_image(&brand(), "rocket").await.unwrap();
        assert_eq!(url, "https://cdn.example/titan.png");

        let analysis = client.competitor_analysis(&brand(), "Innovate Inc.", None).await.unwrap();
        assert_eq!(analysis, "Cheaper, slower.");
        let (_, body) = client.transport().last_request();
        assert_eq!(body["competitor"], json!({ "name": "Innovate Inc." }));
    }

    #[tokio::test]
    async fn service_errors_pass_through() {
        let failure = GenerationError::Service {
            status: 503,
            message: "model overloaded".into(),
        };
        let client = GenerationClient::new(Scripted::default().reply("full-report", Err(failure.clone())));

        assert_eq!(client.full_report(&brand()).await.unwrap_err(), failure);
    }

    #[tokio::test]
    async fn malformed_output_is_unusable() {
        let client = GenerationClient::new(
            Scripted::default()
                .reply("blog-ideas", Ok(json!([{ "title": "only a title" }])))
                .reply("vet-influencer", Ok(json!({ "verdict": "ok" })))
                .reply("suggestion", Ok(json!("   "))),
        );

        let unusable = |r: GenerationResult<_>| matches!(r, Err(GenerationError::UnusableOutput(_)));
        assert!(unusable(client.blog_ideas(&brand(), "AI").await.map(|_| ())));
        assert!(unusable(client.vet_influencer(&brand(), "@x").await.map(|_| ())));
        assert!(unusable(client.suggestion("hi").await.map(|_| ())));
    }

    #[tokio::test]
    async fn goal_breakdown_accepts_both_shapes() {
        let client = GenerationClient::new(
            Scripted::default().reply("goal-breakdown", Ok(json!(["Audit site", { "text": "Fix titles" }]))),
        );

        let steps = client.goal_breakdown(&brand(), "Rank higher").await.unwrap();
        assert_eq!(steps, vec!["Audit site".to_string(), "Fix titles".to_string()]);
    }

    #[tokio::test]
    async fn contextual_payloads_are_nested() {
        let client = GenerationClient::new(
            Scripted::default()
                .reply("financial-summary", Ok(json!({ "summary": "On budget." })))
                .reply("brainstorm-ideas", Ok(json!([{ "text": "Pop-up", "category": "Wildcard Idea" }]))),
        );

        let summary = client
            .financial_summary(&json!({ "name": "Acme" }), &json!([]), &json!([{ "amount": 5 }]), &json!([]))
            .await
            .unwrap();
        assert_eq!(summary, "On budget.");
        let (_, body) = client.transport().last_request();
        assert_eq!(body["financials"]["expenses"][0]["amount"], 5);

        let ideas = client.brainstorm_ideas("summer").await.unwrap();
        assert_eq!(ideas[0].category, IdeaCategory::WildcardIdea);
    }

    #[tokio::test]
    async fn calendar_dates_are_plain_days() {
        let client = GenerationClient::new(Scripted::default().reply("calendar-suggestions", Ok(json!([]))));
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        client.calendar_suggestions(&brand(), &[day]).await.unwrap();
        let (_, body) = client.transport().last_request();
        assert_eq!(body["emptyDates"], json!(["2024-06-03"]));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub brand_id: BrandId,
    pub client_id: EntityId,
    pub invoice_number: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl EntityKind for Invoice {
    const COLLECTION: &'static str = "db_invoices";
}

impl BrandScoped for Invoice {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Invoice {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Unpaid and past its due date. The stored status is not consulted
    /// beyond `Paid`.
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.status != InvoiceStatus::Paid && self.due_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invoice(status: InvoiceStatus, due_in_days: i64) -> Invoice {
        let now = Utc::now();
        Invoice {
            brand_id: BrandId::new("brand-2"),
            client_id: EntityId::new("client-2"),
            invoice_number: "INV-002".into(),
            amount: 10_000.0,
            status,
            issue_date: now,
            due_date: now + Duration::days(due_in_days),
            items: vec![
                InvoiceItem { description: "Campaign Management".into(), amount: 8_000.0 },
                InvoiceItem { description: "Content Creation".into(), amount: 2_000.0 },
            ],
        }
    }

    #[test]
    fn items_total_sums_lines() {
        assert_eq!(invoice(InvoiceStatus::Sent, 1).items_total(), 10_000.0);
    }

    #[test]
    fn paid_invoices_are_never_past_due() {
        let now = Utc::now();
        assert!(invoice(InvoiceStatus::Sent, -1).is_past_due(now));
        assert!(!invoice(InvoiceStatus::Paid, -1).is_past_due(now));
        assert!(!invoice(InvoiceStatus::Draft, 3).is_past_due(now));
    }
}

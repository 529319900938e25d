use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Advertising,
    Software,
    #[serde(rename = "Content Creation")]
    ContentCreation,
    Influencers,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub brand_id: BrandId,
    pub budget_id: EntityId,
    pub name: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl EntityKind for Expense {
    const COLLECTION: &'static str = "db_expenses";
}

impl BrandScoped for Expense {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

/// Totals per category, in first-seen order.
pub fn totals_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> Vec<(ExpenseCategory, f64)> {
    let mut totals: Vec<(ExpenseCategory, f64)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category, expense.amount)),
        }
    }
    totals
}

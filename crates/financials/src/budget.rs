use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityId, EntityKind};

use crate::expense::Expense;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub brand_id: BrandId,
    pub name: String,
    pub amount: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl EntityKind for Budget {
    const COLLECTION: &'static str = "db_budgets";
}

impl BrandScoped for Budget {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Budget {
    /// Sum of the expenses drawn from budget `id`.
    pub fn spent<'a>(id: &EntityId, expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
        expenses
            .into_iter()
            .filter(|e| &e.budget_id == id)
            .map(|e| e.amount)
            .sum()
    }

    /// Amount left after the expenses drawn from budget `id`; negative when overspent.
    pub fn remaining<'a>(&self, id: &EntityId, expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
        self.amount - Self::spent(id, expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseCategory;

    fn expense(budget: &str, amount: f64) -> Expense {
        Expense {
            brand_id: BrandId::new("brand-1"),
            budget_id: EntityId::new(budget),
            name: "Spend".into(),
            category: ExpenseCategory::Advertising,
            amount,
            date: Utc::now(),
        }
    }

    #[test]
    fn remaining_counts_only_own_expenses() {
        let now = Utc::now();
        let budget = Budget {
            brand_id: BrandId::new("brand-1"),
            name: "Q3".into(),
            amount: 1_000.0,
            start_date: now,
            end_date: now,
        };
        let id = EntityId::new("bud-1");
        let expenses = [expense("bud-1", 300.0), expense("bud-2", 900.0), expense("bud-1", 50.0)];
        assert_eq!(Budget::spent(&id, &expenses), 350.0);
        assert_eq!(budget.remaining(&id, &expenses), 650.0);
    }
}

//! Budget, expense and invoice fixtures. Dates are relative to `now`.

use chrono::{DateTime, Duration, Utc};

use brandhub_brands::seed::{EVERGREEN_ID, QUANTUMLEAP_ID};
use brandhub_core::{BrandId, EntityId, Record};

use crate::budget::Budget;
use crate::expense::{Expense, ExpenseCategory};
use crate::invoice::{Invoice, InvoiceItem, InvoiceStatus};

pub fn budgets(now: DateTime<Utc>) -> Vec<Record<Budget>> {
    let budget = |brand: &str, name: &str, amount: f64| Budget {
        brand_id: BrandId::new(brand),
        name: name.into(),
        amount,
        start_date: now - Duration::days(30),
        end_date: now + Duration::days(60),
    };

    vec![
        Record::new("bud-1", budget(QUANTUMLEAP_ID, "Q3 Marketing Budget", 50_000.0)),
        Record::new("bud-2", budget(EVERGREEN_ID, "Q3 Content Creation", 10_000.0)),
    ]
}

pub fn expenses(now: DateTime<Utc>) -> Vec<Record<Expense>> {
    let expense = |brand: &str, budget: &str, name: &str, category, amount, days_ago| Expense {
        brand_id: BrandId::new(brand),
        budget_id: EntityId::new(budget),
        name: name.into(),
        category,
        amount,
        date: now - Duration::days(days_ago),
    };

    vec![
        Record::new(
            "exp-1",
            expense(QUANTUMLEAP_ID, "bud-1", "LinkedIn Ads", ExpenseCategory::Advertising, 5_000.0, 15),
        ),
        Record::new(
            "exp-2",
            expense(
                QUANTUMLEAP_ID,
                "bud-1",
                "Webinar Software Subscription",
                ExpenseCategory::Software,
                500.0,
                10,
            ),
        ),
        Record::new(
            "exp-3",
            expense(
                EVERGREEN_ID,
                "bud-2",
                "Influencer Payment (S. Sarah)",
                ExpenseCategory::Influencers,
                1_500.0,
                20,
            ),
        ),
    ]
}

fn item(description: &str, amount: f64) -> InvoiceItem {
    InvoiceItem { description: description.into(), amount }
}

pub fn invoices(now: DateTime<Utc>) -> Vec<Record<Invoice>> {
    vec![
        Record::new(
            "inv-1",
            Invoice {
                brand_id: BrandId::new(QUANTUMLEAP_ID),
                client_id: EntityId::new("client-1"),
                invoice_number: "INV-001".into(),
                amount: 25_000.0,
                status: InvoiceStatus::Paid,
                issue_date: now - Duration::days(45),
                due_date: now - Duration::days(15),
                items: vec![item("Monthly Retainer", 25_000.0)],
            },
        ),
        Record::new(
            "inv-2",
            Invoice {
                brand_id: BrandId::new(EVERGREEN_ID),
                client_id: EntityId::new("client-2"),
                invoice_number: "INV-002".into(),
                amount: 10_000.0,
                status: InvoiceStatus::Sent,
                issue_date: now - Duration::days(10),
                due_date: now + Duration::days(20),
                items: vec![item("Campaign Management", 8_000.0), item("Content Creation", 2_000.0)],
            },
        ),
    ]
}

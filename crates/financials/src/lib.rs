//! `brandhub-financials`
//!
//! **Responsibility:** budgets, the expenses drawn against them, and client
//! invoices.

pub mod budget;
pub mod expense;
pub mod invoice;
pub mod seed;

pub use budget::Budget;
pub use expense::{Expense, ExpenseCategory};
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus};

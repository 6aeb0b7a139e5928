//! Domain entity definitions.

mod bill;
mod employee;
mod expense_type;
mod receipt;

pub use bill::{Bill, BillKey, BillStatus};
pub use employee::Employee;
pub use expense_type::ExpenseType;
pub use receipt::ReceiptFileName;

//! View containers: one per screen, dispatching discrete UI commands to
//! the store, session, and navigation collaborators.

mod bills;
mod new_bill;

pub use bills::BillsContainer;
pub use new_bill::{NewBillContainer, NewBillError, SubmitOutcome, UpdateOutcome};

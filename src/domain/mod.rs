//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Route definitions.
pub mod routes;

pub use entities::{Bill, BillKey, BillStatus, Employee, ExpenseType, ReceiptFileName};
pub use errors::{ReceiptError, SessionError, StoreError};
pub use ports::{BillStorePort, NavigationPort, SessionPort};
pub use routes::Route;

pub mod classification;
pub mod money;
pub mod transaction;

pub use classification::{RevenueType, UnknownWireType, WireType};
pub use money::Money;
pub use transaction::{ClassifiedTransaction, Transaction, TransactionType};

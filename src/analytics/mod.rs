//! Pure calculators over already-loaded trades and accounts.
//!
//! Nothing here mutates its inputs or touches storage; callers own the state
//! and pass it in.

pub mod balance;
pub mod equity;
pub mod filter;
pub mod profit;
pub mod range;
pub mod stats;

pub use balance::*;
pub use equity::*;
pub use filter::*;
pub use profit::*;
pub use range::*;
pub use stats::*;

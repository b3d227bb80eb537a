//! Domain Model
//!
//! Member, loan, savings, and ledger records as served to the mobile app.
//! Wire names are camelCase to match the app's JSON contract; enums carry
//! their lowercase wire form.

mod loan;
mod notification;
mod product;
mod savings;
mod transaction;
mod user;

pub use loan::*;
pub use notification::*;
pub use product::*;
pub use savings::*;
pub use transaction::*;
pub use user::*;

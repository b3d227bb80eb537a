//! Screens
//!
//! One struct per mobile screen, holding exactly the state that screen
//! renders from. They all follow the same contract: a fetch claims the
//! screen's single request slot, `state()` exposes the current
//! [`LoadState`](crate::screen::LoadState), and a failed fetch can be
//! retried when the error was transient.

mod dashboard;
mod forgot_password;
mod loans;
mod login;
mod profile;
mod register;
mod savings;
mod transactions;

pub use dashboard::{greeting_for_hour, DashboardData, DashboardScreen};
pub use forgot_password::ForgotPasswordScreen;
pub use loans::{LoanTab, LoansScreen};
pub use login::LoginScreen;
pub use profile::{ProfileData, ProfileScreen};
pub use register::RegisterScreen;
pub use savings::{SavingsData, SavingsScreen, SavingsTab};
pub use transactions::{TransactionsData, TransactionsScreen};

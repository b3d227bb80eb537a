//! Hana App
//!
//! The client-side layer of the platform: the signed-in session, one state
//! store per mobile screen, and the HTTP backend that talks to the REST
//! API. Screens reach the services only through the trait handles in
//! [`Backend`](hana_services::Backend), so the simulated backend drops in
//! for demos and tests and the remote one for production.

pub mod remote;
pub mod screen;
pub mod screens;
pub mod session;

pub use remote::{RemoteBackend, RemoteConfig};
pub use screen::{LoadState, ScreenError, ScreenStore};
pub use session::{AppSession, SessionEvent};

//! AeroDesk client SDK for Rust.
//!
//! Talks to the AeroDesk flight-booking backend: one REST gateway with token
//! stamping and response normalization, typed endpoint wrappers, the persisted
//! session and the static route table.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use aerodesk_client::{FileTokenStore, RestClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> aerodesk_client::Result<()> {
//!     let session = Session::new(FileTokenStore::new("./data/token.json"));
//!     let rest = RestClient::new(session, Some("http://localhost:8080/api"))?;
//!
//!     rest.login("alice", "secret").await?;
//!     if let Some(user) = rest.session().current_user() {
//!         println!("logged in as {} ({})", user.username, user.role);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod interceptor;
pub mod rest;
pub mod routes;
pub mod session;

pub use error::{ClientError, Result};
pub use rest::RestClient;
pub use session::{CurrentUser, FileTokenStore, MemoryTokenStore, Session, TokenStore};

//! Kitchen management service.
//!
//! Cooks sign in and maintain dish types, ingredients and dishes. The crate
//! follows a ports-and-adapters layout: [`domain`] holds records, validation
//! and services; [`inbound`] exposes them over actix-web; [`outbound`]
//! stores them in PostgreSQL (or memory) and hashes passwords.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

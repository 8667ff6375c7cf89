//! Inbound adapters translating HTTP requests into domain calls.
//!
//! Framework types stay inside [`http`]; handlers only see the driving
//! ports from [`crate::domain::ports`].

pub mod http;

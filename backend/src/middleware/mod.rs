//! Request middleware: trace ids and the login gate.

pub mod login_required;
pub mod trace;

pub use login_required::LoginRequired;
pub use trace::Trace;

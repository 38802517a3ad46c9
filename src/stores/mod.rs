//! In-memory stores for session state

mod session_store;

pub use session_store::{LookupRefusal, LookupTicket, SessionStore};

//! Database models split into domain-specific modules.

pub mod lead;
pub mod order;
pub mod retailer;
pub mod session;

pub use lead::*;
pub use order::*;
pub use retailer::*;
pub use session::*;

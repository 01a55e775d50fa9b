//! Backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::{MethodOverride, Trace};

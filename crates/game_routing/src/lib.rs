pub mod endpoints;
pub mod logger;
pub mod router;

pub mod criteria;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

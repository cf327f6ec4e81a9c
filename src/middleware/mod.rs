pub mod audit;
pub mod auth;
pub mod context;
pub mod feature;
pub mod rate_limit;
pub mod role;

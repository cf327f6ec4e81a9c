pub mod audit;
pub mod auth;
pub mod features;
pub mod organizations;
pub mod users;

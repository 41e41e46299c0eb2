pub mod activity_service;
pub mod auth;
pub mod geo_service;
pub mod search_service;

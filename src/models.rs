pub mod activity;
pub mod auth;
pub mod company;
pub mod geo;

pub mod activities;
pub mod auth;
pub mod maps;
pub mod search;

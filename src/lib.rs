//! Search for French establishments by SIREN/SIRET, name, NAF activity code or
//! proximity, with the HTTP server and a typed client of its API.

pub mod app;
pub mod client;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

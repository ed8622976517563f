#![doc = "The `newsboard` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, storage boundary, authentication, news retrieval,"]
#![doc = "routing configuration and error handling for two services: a personalized news"]
#![doc = "API (`newsboard` binary) and an in-memory task API (`tasks` binary)."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod routes;
pub mod store;

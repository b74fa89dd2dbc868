//! Homzy listings service: filtered search and CRUD over real-estate listings
//! backed by a document store.

pub mod config;
pub mod http;
pub mod models;
pub mod query;
pub mod seed;
pub mod service;
pub mod store;

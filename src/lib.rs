pub mod animator;
pub mod api;
pub mod client;
pub mod config;
pub mod data_models;
pub mod input;
pub mod search_engine;
pub mod session;
pub mod view;

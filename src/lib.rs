pub mod activities;
pub mod app;
pub mod auth;
pub mod boards;
pub mod cards;
pub mod comments;
pub mod config;
pub mod error;
pub mod ids;
pub mod lists;
pub mod model;
pub mod state;
pub mod store;

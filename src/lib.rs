#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Account signup and login with bcrypt-hashed passwords and signed bearer tokens,"]
#![doc = "and per-user task CRUD in which every read and write is scoped to the"]
#![doc = "authenticated owner. The binary (`main.rs`) wires these pieces into an HTTP server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

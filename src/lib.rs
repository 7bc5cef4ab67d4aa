//! Artisan gateway: REST CRUD over the PostgreSQL `artisans` table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, ConfigError, DbConfig};
pub use error::{AppError, Operation};
pub use model::{Artisan, ArtisanPatch, Field, NewArtisan};
pub use routes::{app, artisan_routes, common_routes};
pub use state::AppState;
pub use store::{ArtisanStore, PgArtisanStore};

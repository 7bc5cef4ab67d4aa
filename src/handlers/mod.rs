//! HTTP handlers for artisan CRUD.

pub mod artisan;
pub use artisan::*;

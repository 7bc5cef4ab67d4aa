//! Input shaping ahead of storage.

pub mod validation;
pub use validation::{artisan_patch, is_truthy, new_artisan, parse_id};

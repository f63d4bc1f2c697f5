pub mod entry;
pub mod photo;
pub mod project;
pub mod sqlx_repo;

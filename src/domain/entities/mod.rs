pub mod entry;
pub mod photo;
pub mod project;
pub mod stats;

pub mod entries;
pub mod export;
pub mod home;
pub mod photos;
pub mod project;
pub mod reports;

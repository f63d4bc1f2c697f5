pub mod db;
pub mod report;
pub mod storage;

pub mod cluster;
pub mod contacts;

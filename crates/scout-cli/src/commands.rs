pub mod ask;
pub mod version;

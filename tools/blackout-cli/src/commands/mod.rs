pub mod cover;
pub mod list;

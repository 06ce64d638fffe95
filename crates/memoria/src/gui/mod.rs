pub mod app;
pub mod mount;
pub mod ring;
pub mod theme;

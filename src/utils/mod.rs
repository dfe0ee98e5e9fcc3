pub mod replace;
pub mod settings;

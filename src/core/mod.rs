pub mod fetch;
pub mod frame;
pub mod loader;
pub mod manifest;
pub mod source;
pub mod spinner;
pub mod surface;

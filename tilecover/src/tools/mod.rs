pub mod cover;
pub mod scales;
mod view;

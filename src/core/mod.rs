pub mod constants;
pub mod model;

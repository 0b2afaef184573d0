pub mod concepts;
pub mod gallery;
pub mod model;

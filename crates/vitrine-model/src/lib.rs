mod domain;
pub use domain::*;

mod resource;
pub use resource::*;

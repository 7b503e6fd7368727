mod params;
pub use params::{ParamValue, Params};

mod state;
pub use state::QueryController;

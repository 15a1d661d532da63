pub mod errors;
pub mod gateway;
pub mod output;
pub mod paths;

pub use errors::*;
pub use output::*;
pub use paths::*;

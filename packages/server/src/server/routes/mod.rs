// HTTP routes
pub mod generate;
pub mod meta;
pub mod status;

pub use generate::*;
pub use meta::*;
pub use status::*;

pub mod error;
pub mod logging;

pub use error::{CultureError, CultureErrorResponse, CultureResult};
pub use logging::{init_logging, with_bootstrap_logging};

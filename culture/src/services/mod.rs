pub mod culture_resolver;
pub mod culture_store;
pub mod url_parser;

pub use culture_resolver::{
    ResolutionConfig, ResolutionMode, localize_url, resolve, resolve_language, resolve_region,
    set_stored, stored,
};
pub use culture_store::{CultureSlot, CultureStore, RequestCulture};

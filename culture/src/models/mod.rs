pub mod culture;

pub use culture::Culture;

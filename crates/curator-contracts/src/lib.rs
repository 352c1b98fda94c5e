pub mod candidates;
pub mod catalog;
pub mod console;
pub mod error;
pub mod events;
pub mod requests;
pub mod selection;

pub use error::CuratorError;

mod category;
mod entity;
mod resolver;
mod target_id;

pub use category::{Category, ImageSize};
pub use entity::{Backdrop, CatalogEntity, CatalogSnapshot, Portrait};
pub use resolver::{default_prompt, TargetInfo, TargetOption, TargetResolver, NO_SELECTION};
pub use target_id::TargetId;

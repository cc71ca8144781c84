//! The individual rewrites composed by the pass coordinator

pub mod annotations;
pub mod class_identity;
pub mod import;
pub mod suspension;
pub mod wrapper;

pub use annotations::{has_trigger, normalize_modifiers};
pub use class_identity::rewrite_class_identity;
pub use import::{namespace_import, prepend_import, reserve_generated_identifier};
pub use suspension::rewrite_suspensions;
pub use wrapper::wrap_in_async_adapter;

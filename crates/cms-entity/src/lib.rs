//! # cms-entity — Template and Layout Records
//!
//! - **Template** (`template.rs`): content validated on every write, name
//!   derived from the content, required layout reference.
//! - **Layout** (`layout.rs`): shared structural definition, opaque here.
//! - **Stores** (`store.rs`): `LayoutStore` / `TemplateStore` traits and
//!   their in-memory implementations.
//!
//! Records are plain structs with explicit fields. Required relationships
//! are enforced by constructor signatures, and side-effecting writes are
//! explicit methods returning `Result`.

pub mod layout;
pub mod store;
pub mod template;

pub use layout::Layout;
pub use store::{
    InMemoryLayoutStore, InMemoryTemplateStore, LayoutStore, Store, StoreError, TemplateStore,
};
pub use template::{Template, TemplateError};

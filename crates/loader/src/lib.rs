//! Layered configuration loading.
//!
//! This crate loads a configuration file together with its
//! environment-specific sibling, recursively folds in the files it imports,
//! and resolves `${...}` reference placeholders in the merged result.
//!
//! ```rust,ignore
//! use layerconf_loader::{Loader, LoadOptions};
//!
//! let loader = Loader::builder().with_environment("test").with_yaml().build();
//! let config = loader.load("config/app.json").await?;
//! let port = config.get("server.port");
//! ```

pub mod constants;
pub mod document;
pub mod extension;
mod flatten;
mod loader;
pub mod path;
pub mod reference;

pub use document::{Document, deep_merge, merge_documents};
pub use extension::{
    BoxError, ExtensionLoader, ExtensionRegistry, FileError, FnLoader, JsonLoader, YamlLoader,
    from_fn,
};
pub use flatten::{FlatDocument, LoadOutput};
pub use loader::{
    LoadOptions, Loader, LoaderBuilder, LoaderError, LoaderOptions, create_loader,
    env_var_or_none,
};
pub use reference::{PlaceholderResolver, ReferenceError, ReferenceResolver, ResolverOptions};

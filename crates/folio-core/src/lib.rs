pub mod catalog;
pub mod config;
pub mod document;
pub mod filter;
pub mod nav;
pub mod project;
pub mod store;
pub mod theme;

pub use catalog::{
  CatalogAction,
  CatalogSnapshot,
  LoadError,
  LoadLatch,
  LoadState,
  ProjectCatalog,
  fetch_snapshot
};
pub use config::SiteConfig;
pub use filter::FilterState;
pub use project::{
  Project,
  ProjectRecord
};
pub use store::{
  KeyValueStore,
  ProjectStore,
  ThemeSink
};
pub use theme::{
  ThemeController,
  ThemeMode
};

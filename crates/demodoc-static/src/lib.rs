//! Vue documentation generator for component demos.
//!
//! Loads each component's demo and index markdown, writes one Vue file per
//! demo plus a container per locale, and emits a two-locale router table.

pub mod builder;
pub mod container;
pub mod loader;
pub mod naming;
pub mod router;
pub mod storage;
pub mod templates;

pub use builder::{
    ComponentReport, FileDiagnostic, GenerateConfig, GenerateError, Generator, RunReport,
    DOCS_DIR, ROUTER_FILE,
};
pub use container::render_container;
pub use loader::{load_demos, LoadedDemos};
pub use naming::camel_identifier;
pub use router::{LocaleRoutes, Route, RouteConflict, RouteTable};
pub use storage::{write_file, DirEntry, FsStorage, Storage};
pub use templates::TemplateEngine;

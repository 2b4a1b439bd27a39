//! Demo document loading.

use std::io;
use std::path::Path;

use futures::future::join_all;

use demodoc_mdx::{parse_demo, DemoRecord, Diagnostic};

use crate::builder::{FileDiagnostic, GenerateError};
use crate::storage::Storage;

/// Directory holding a component's demo documents (and, in the output, its demo files).
pub const DEMO_DIR: &str = "demo";

/// Extension of demo documents.
pub const DEMO_EXTENSION: &str = ".md";

/// Demos loaded for one component.
#[derive(Debug, Default)]
pub struct LoadedDemos {
    /// Parsed demos, in directory listing order
    pub demos: Vec<DemoRecord>,

    /// Parser and listing diagnostics
    pub diagnostics: Vec<FileDiagnostic>,

    /// Demos that could not be read
    pub failures: Vec<GenerateError>,
}

/// Load and parse every demo document in `demo_dir`.
///
/// Files are read concurrently; a failed read only drops that demo. A
/// missing directory yields no demos and a tip, since a component may
/// legitimately have none.
pub async fn load_demos<S: Storage + ?Sized>(
    storage: &S,
    demo_dir: &Path,
    component: &str,
) -> LoadedDemos {
    let mut loaded = LoadedDemos::default();

    let entries = match storage.list_dir(demo_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            loaded.diagnostics.push(FileDiagnostic {
                path: demo_dir.to_path_buf(),
                diagnostic: Diagnostic::tip("no demo directory, generating without demos"),
            });
            return loaded;
        }
        Err(source) => {
            loaded.failures.push(GenerateError::List {
                path: demo_dir.to_path_buf(),
                source,
            });
            return loaded;
        }
    };

    let reads = entries
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .filter_map(|entry| {
            let Some(name) = entry.name.strip_suffix(DEMO_EXTENSION) else {
                tracing::debug!("Skipping {} in {}", entry.name, demo_dir.display());
                return None;
            };
            Some((demo_dir.join(&entry.name), name.to_string()))
        })
        .map(|(path, name)| async move {
            let result = storage.read_to_string(&path).await;
            (path, name, result)
        });

    for (path, name, result) in join_all(reads).await {
        match result {
            Ok(source) => {
                let parsed = parse_demo(&source, component, &name);
                loaded
                    .diagnostics
                    .extend(parsed.diagnostics.into_iter().map(|diagnostic| FileDiagnostic {
                        path: path.clone(),
                        diagnostic,
                    }));
                loaded.demos.push(parsed.value);
            }
            Err(source) => loaded.failures.push(GenerateError::Read { path, source }),
        }
    }

    loaded
}

//! Component documentation generator.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::future::join_all;

use demodoc_mdx::{parse_index, DemoRecord, Diagnostic, IndexRecord, Locale, Parsed, Severity};

use crate::container::{demo_identifier, render_container};
use crate::loader::{load_demos, DEMO_DIR};
use crate::router::RouteTable;
use crate::storage::{write_file, FsStorage, Storage};
use crate::templates::TemplateEngine;

/// Name of the generated router module, relative to the output directory.
pub const ROUTER_FILE: &str = "router.js";

/// Directory under the output root holding one directory per component.
pub const DOCS_DIR: &str = "docs";

/// Configuration for generating component docs.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Source root: one directory per component
    pub components_dir: PathBuf,

    /// Output root
    pub output_dir: PathBuf,

    /// Component directories skipped during discovery
    pub ignore: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from("components"),
            output_dir: PathBuf::from("site"),
            ignore: ["style", "_util", "col", "row"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to render {}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    #[error("Demos '{first}' and '{second}' of {component} both generate `{identifier}`")]
    DuplicateIdentifier {
        component: String,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Demo '{demo}' of {component} has no ASCII letters or digits to build an identifier from")]
    EmptyIdentifier { component: String, demo: String },
}

/// A parser diagnostic tied to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub diagnostic: Diagnostic,
}

/// Outcome of generating one component.
#[derive(Debug)]
pub struct ComponentReport {
    pub component: String,

    /// Number of demos loaded
    pub demos: usize,

    /// Files written
    pub written: Vec<PathBuf>,

    pub diagnostics: Vec<FileDiagnostic>,

    pub failures: Vec<GenerateError>,
}

impl ComponentReport {
    fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            demos: 0,
            written: Vec::new(),
            diagnostics: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether every file of the component was generated.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn diagnostic(&mut self, diagnostic: FileDiagnostic) {
        match diagnostic.diagnostic.severity {
            Severity::Error => tracing::error!(
                "{}: {}",
                diagnostic.path.display(),
                diagnostic.diagnostic.message
            ),
            Severity::Tip => tracing::warn!(
                "{}: {}",
                diagnostic.path.display(),
                diagnostic.diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    fn failure(&mut self, error: GenerateError) {
        tracing::error!("{}", error);
        self.failures.push(error);
    }

    fn record(&mut self, result: Result<PathBuf, GenerateError>) {
        match result {
            Ok(path) => self.written.push(path),
            Err(e) => self.failure(e),
        }
    }
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunReport {
    pub components: Vec<ComponentReport>,

    /// Path of the router module, or why it could not be written
    pub router: Result<PathBuf, GenerateError>,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    /// Number of components generated without failures.
    pub fn succeeded(&self) -> usize {
        self.components.iter().filter(|c| c.is_success()).count()
    }

    /// Total number of files written, router included.
    pub fn files_written(&self) -> usize {
        self.components.iter().map(|c| c.written.len()).sum::<usize>()
            + usize::from(self.router.is_ok())
    }
}

/// Generates Vue containers, demo files and the router table.
pub struct Generator<S = FsStorage> {
    config: GenerateConfig,
    storage: S,
    templates: TemplateEngine,
}

impl Generator<FsStorage> {
    /// Create a generator over the local file system.
    pub fn with_fs(config: GenerateConfig) -> Self {
        Self::new(config, FsStorage)
    }
}

impl<S: Storage> Generator<S> {
    pub fn new(config: GenerateConfig, storage: S) -> Self {
        Self {
            config,
            storage,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Output directory holding one directory per component.
    pub fn docs_dir(&self) -> PathBuf {
        self.config.output_dir.join(DOCS_DIR)
    }

    /// Every component directory under the source root, minus ignored ones.
    pub async fn discover_components(&self) -> Result<Vec<String>, GenerateError> {
        let dir = &self.config.components_dir;
        let entries = self
            .storage
            .list_dir(dir)
            .await
            .map_err(|source| GenerateError::List {
                path: dir.clone(),
                source,
            })?;

        Ok(entries
            .into_iter()
            .filter(|e| e.is_dir && !self.config.ignore.contains(&e.name))
            .map(|e| e.name)
            .collect())
    }

    /// Generate every component concurrently, then the router table.
    pub async fn run<C: AsRef<str>>(&self, components: &[C]) -> RunReport {
        let start = Instant::now();

        let reports = join_all(components.iter().map(|c| self.process(c.as_ref()))).await;
        let router = self.build_router().await;
        if let Err(e) = &router {
            tracing::error!("{}", e);
        }

        RunReport {
            components: reports,
            router,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Generate one component's demo files and locale containers.
    ///
    /// Failures are collected in the report and never stop the rest of the
    /// component, except an empty or colliding demo identifier, which skips
    /// all of the component's output.
    pub async fn process(&self, component: &str) -> ComponentReport {
        let mut report = ComponentReport::new(component);
        let source_dir = self.config.components_dir.join(component);
        let demo_source_dir = source_dir.join(DEMO_DIR);
        let output_dir = self.docs_dir().join(component);

        let (loaded, zh, en) = tokio::join!(
            load_demos(&self.storage, &demo_source_dir, component),
            self.load_index(&source_dir, Locale::ZhCn),
            self.load_index(&source_dir, Locale::EnUs),
        );

        loaded
            .diagnostics
            .into_iter()
            .for_each(|d| report.diagnostic(d));
        loaded.failures.into_iter().for_each(|e| report.failure(e));

        let mut indexes = Vec::new();
        for (path, result) in [zh, en] {
            match result {
                Ok(parsed) => {
                    for diagnostic in parsed.diagnostics {
                        report.diagnostic(FileDiagnostic {
                            path: path.clone(),
                            diagnostic,
                        });
                    }
                    indexes.push(parsed.value);
                }
                Err(e) => report.failure(e),
            }
        }

        let mut demos = loaded.demos;
        demos.sort_by(compare_demos);
        report.demos = demos.len();

        if let Err(e) = check_identifiers(component, &demos) {
            report.failure(e);
            return report;
        }

        let demo_dir = output_dir.join(DEMO_DIR);
        let demo_writes = demos
            .iter()
            .map(|demo| self.write(&demo_dir, format!("{}.vue", demo.name), &demo.code));
        let container_writes = indexes
            .iter()
            .map(|index| self.write_container(&output_dir, index, &demos));

        let (demo_results, container_results) =
            tokio::join!(join_all(demo_writes), join_all(container_writes));

        demo_results
            .into_iter()
            .chain(container_results)
            .for_each(|r| report.record(r));

        if report.is_success() {
            tracing::info!("Generated {} with {} demos", component, report.demos);
        }

        report
    }

    /// Write the router table for every generated component directory.
    ///
    /// An unlistable docs directory degrades to empty route arrays.
    pub async fn build_router(&self) -> Result<PathBuf, GenerateError> {
        let docs_dir = self.docs_dir();

        let components: Vec<String> = match self.storage.list_dir(&docs_dir).await {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| e.is_dir)
                .map(|e| e.name)
                .collect(),
            Err(e) => {
                tracing::error!("Failed to list {}: {}", docs_dir.display(), e);
                Vec::new()
            }
        };

        let table = RouteTable::from_components(components.as_slice());
        for conflict in &table.conflicts {
            tracing::error!(
                "Components '{}' and '{}' both generate `{}`, skipping route for '{}'",
                conflict.kept,
                conflict.skipped,
                conflict.identifier,
                conflict.skipped
            );
        }
        let js = self
            .templates
            .render_router(&table)
            .map_err(|e| GenerateError::Template {
                path: self.config.output_dir.join(ROUTER_FILE),
                message: e.to_string(),
            })?;

        self.write(&self.config.output_dir, ROUTER_FILE.to_string(), &js)
            .await
    }

    async fn load_index(
        &self,
        source_dir: &Path,
        locale: Locale,
    ) -> (PathBuf, Result<Parsed<IndexRecord>, GenerateError>) {
        let path = source_dir.join(format!("index.{}.md", locale.tag()));

        let result = match self.storage.read_to_string(&path).await {
            Ok(source) => Ok(parse_index(&source, locale)),
            Err(source) => Err(GenerateError::Read {
                path: path.clone(),
                source,
            }),
        };

        (path, result)
    }

    async fn write_container(
        &self,
        output_dir: &Path,
        index: &IndexRecord,
        demos: &[DemoRecord],
    ) -> Result<PathBuf, GenerateError> {
        let name = format!("index-{}.vue", index.locale.short());

        let vue = render_container(&self.templates, index, demos).map_err(|e| {
            GenerateError::Template {
                path: output_dir.join(&name),
                message: e.to_string(),
            }
        })?;

        self.write(output_dir, name, &vue).await
    }

    async fn write(
        &self,
        dir: &Path,
        name: String,
        contents: &str,
    ) -> Result<PathBuf, GenerateError> {
        write_file(&self.storage, dir, &name, contents)
            .await
            .map_err(|source| GenerateError::Write {
                path: dir.join(&name),
                source,
            })
    }
}

/// Demos with a numeric order first (ascending), then by name.
fn compare_demos(a: &DemoRecord, b: &DemoRecord) -> Ordering {
    match (a.order.value(), b.order.value()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.name.cmp(&b.name))
}

/// Fail if a demo has no usable identifier or two demos would be imported
/// under the same one.
fn check_identifiers(component: &str, demos: &[DemoRecord]) -> Result<(), GenerateError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for demo in demos {
        let identifier = demo_identifier(demo);
        if identifier.is_empty() {
            return Err(GenerateError::EmptyIdentifier {
                component: component.to_string(),
                demo: demo.name.clone(),
            });
        }
        if let Some(first) = seen.insert(identifier.clone(), demo.name.as_str()) {
            return Err(GenerateError::DuplicateIdentifier {
                component: component.to_string(),
                identifier,
                first: first.to_string(),
                second: demo.name.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const BASIC_DEMO: &str = "---
order: 1
title:
  zh-CN: 基础按钮
  en-US: Basic button
---

## zh-CN

基础按钮

## en-US

Basic button

```` html
<my-button/>
````
";

    fn index_doc(title: &str, subtitle: &str) -> String {
        format!("---\ntitle: {title}\nsubtitle: {subtitle}\n---\n\nOverview\n\n## API\n\nProps\n")
    }

    fn write_component(root: &Path, component: &str, demos: &[(&str, &str)], locales: &[Locale]) {
        let dir = root.join(component);
        fs::create_dir_all(dir.join(DEMO_DIR)).unwrap();
        for (name, source) in demos {
            fs::write(dir.join(DEMO_DIR).join(format!("{name}.md")), source).unwrap();
        }
        for locale in locales {
            let (title, subtitle) = match locale {
                Locale::ZhCn => ("Button", "按钮"),
                Locale::EnUs => ("Button", ""),
            };
            fs::write(
                dir.join(format!("index.{}.md", locale.tag())),
                index_doc(title, subtitle),
            )
            .unwrap();
        }
    }

    fn generator(temp: &TempDir) -> Generator {
        Generator::with_fs(GenerateConfig {
            components_dir: temp.path().join("components"),
            output_dir: temp.path().join("site"),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn generates_button_component() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(&components, "button", &[("basic", BASIC_DEMO)], &Locale::ALL);

        let generator = generator(&temp);
        let report = generator.run(&["button"]).await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.files_written(), 4);

        let out = temp.path().join("site").join("docs").join("button");
        assert_eq!(
            fs::read_to_string(out.join("demo").join("basic.vue")).unwrap(),
            "<my-button/>"
        );

        for file in ["index-zh.vue", "index-en.vue"] {
            let vue = fs::read_to_string(out.join(file)).unwrap();
            assert_eq!(vue.matches("import buttonBasic from './demo/basic'").count(), 1);
            assert_eq!(vue.matches("    buttonBasic,\n").count(), 1);
            assert_eq!(vue.matches("<button-basic></button-basic>").count(), 1);
        }

        let zh = fs::read_to_string(out.join("index-zh.vue")).unwrap();
        assert!(zh.contains("<h1>Button 按钮</h1>"));
        assert!(zh.contains("title=\"基础按钮\""));

        let router = fs::read_to_string(temp.path().join("site").join(ROUTER_FILE)).unwrap();
        assert!(router.contains("import zhButton from './docs/button/index-zh'"));
        assert!(router.contains("import enButton from './docs/button/index-en'"));
        assert!(router.contains("name: 'button-en'"));
    }

    #[tokio::test]
    async fn missing_demo_directory_generates_empty_containers() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(&components, "icon", &[], &Locale::ALL);
        fs::remove_dir(components.join("icon").join(DEMO_DIR)).unwrap();

        let report = generator(&temp).process("icon").await;

        assert!(report.is_success());
        assert_eq!(report.demos, 0);
        assert_eq!(report.written.len(), 2);

        let vue =
            fs::read_to_string(temp.path().join("site/docs/icon/index-en.vue")).unwrap();
        assert!(!vue.contains("<code-show"));
    }

    #[tokio::test]
    async fn missing_locale_index_skips_only_that_locale() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(&components, "button", &[("basic", BASIC_DEMO)], &[Locale::EnUs]);
        write_component(&components, "card", &[("basic", BASIC_DEMO)], &Locale::ALL);

        let report = generator(&temp).run(&["button", "card"]).await;

        let button = &report.components[0];
        assert_eq!(button.failures.len(), 1);
        assert!(matches!(button.failures[0], GenerateError::Read { .. }));

        let out = temp.path().join("site/docs");
        assert!(out.join("button/index-en.vue").exists());
        assert!(!out.join("button/index-zh.vue").exists());
        assert!(out.join("button/demo/basic.vue").exists());
        assert!(out.join("card/index-zh.vue").exists());
        assert!(report.components[1].is_success());
        assert!(report.router.is_ok());
    }

    #[tokio::test]
    async fn colliding_identifiers_fail_the_component() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(
            &components,
            "card",
            &[("a-b", BASIC_DEMO), ("a_b", BASIC_DEMO)],
            &Locale::ALL,
        );
        write_component(&components, "button", &[("basic", BASIC_DEMO)], &Locale::ALL);

        let report = generator(&temp).run(&["card", "button"]).await;

        let card = &report.components[0];
        assert!(!card.is_success());
        match &card.failures[0] {
            GenerateError::DuplicateIdentifier { identifier, .. } => {
                assert_eq!(identifier, "cardAB");
            }
            other => panic!("unexpected failure: {other}"),
        }
        assert!(card.written.is_empty());
        assert!(!temp.path().join("site/docs/card").exists());
        assert!(report.components[1].is_success());
    }

    #[tokio::test]
    async fn orders_demos_by_front_matter() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        let alpha = BASIC_DEMO.replace("order: 1", "order: 3");
        let gamma = BASIC_DEMO.replace("order: 1\n", "");
        write_component(
            &components,
            "button",
            &[
                ("alpha", alpha.as_str()),
                ("beta", BASIC_DEMO),
                ("gamma", gamma.as_str()),
            ],
            &[Locale::EnUs],
        );

        generator(&temp).process("button").await;

        let vue =
            fs::read_to_string(temp.path().join("site/docs/button/index-en.vue")).unwrap();
        let beta = vue.find("import buttonBeta").unwrap();
        let alpha = vue.find("import buttonAlpha").unwrap();
        let gamma = vue.find("import buttonGamma").unwrap();
        assert!(beta < alpha && alpha < gamma);
    }

    #[tokio::test]
    async fn runs_are_idempotent() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(&components, "button", &[("basic", BASIC_DEMO)], &Locale::ALL);
        write_component(&components, "card", &[("basic", BASIC_DEMO)], &Locale::ALL);
        let generator = generator(&temp);
        let files = [
            "site/router.js",
            "site/docs/button/index-zh.vue",
            "site/docs/card/index-en.vue",
            "site/docs/card/demo/basic.vue",
        ];

        generator.run(&["button", "card"]).await;
        let first: Vec<String> = files
            .iter()
            .map(|f| fs::read_to_string(temp.path().join(f)).unwrap())
            .collect();

        generator.run(&["card", "button"]).await;
        let second: Vec<String> = files
            .iter()
            .map(|f| fs::read_to_string(temp.path().join(f)).unwrap())
            .collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn router_without_docs_directory_is_empty() {
        let temp = tempdir().unwrap();

        let path = generator(&temp).build_router().await.unwrap();

        let js = fs::read_to_string(path).unwrap();
        assert!(js.contains("path: '/component/zh-CN',\n      children: [\n      ]"));
        assert!(js.contains("path: '/component/en-US',\n      children: [\n      ]"));
    }

    #[tokio::test]
    async fn discovers_components_skipping_ignored() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        for dir in ["button", "style", "_util", "icon"] {
            fs::create_dir_all(components.join(dir)).unwrap();
        }
        fs::write(components.join("README.md"), "").unwrap();

        let found = generator(&temp).discover_components().await.unwrap();

        assert_eq!(found, vec!["button".to_string(), "icon".to_string()]);
    }

    #[tokio::test]
    async fn collision_still_reports_index_diagnostics() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(
            &components,
            "card",
            &[("a-b", BASIC_DEMO), ("a_b", BASIC_DEMO)],
            &[],
        );
        fs::write(
            components.join("card/index.en-US.md"),
            "---\ntitle: Card\n---\n\nNo API here\n",
        )
        .unwrap();

        let report = generator(&temp).process("card").await;

        assert!(matches!(
            report.failures.last(),
            Some(GenerateError::DuplicateIdentifier { .. })
        ));
        assert!(report.diagnostics.iter().any(|d| {
            d.path.ends_with("index.en-US.md") && d.diagnostic.severity == Severity::Error
        }));
    }

    #[tokio::test]
    async fn demo_without_ascii_identifier_fails_the_component() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(&components, "按钮", &[("基础", BASIC_DEMO)], &Locale::ALL);

        let report = generator(&temp).process("按钮").await;

        match report.failures.as_slice() {
            [GenerateError::EmptyIdentifier { component, demo }] => {
                assert_eq!(component, "按钮");
                assert_eq!(demo, "基础");
            }
            other => panic!("unexpected failures: {other:?}"),
        }
        assert!(report.written.is_empty());
    }

    #[tokio::test]
    async fn router_skips_components_with_colliding_identifiers() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("site/docs");
        for dir in ["date-picker", "date_picker"] {
            fs::create_dir_all(docs.join(dir)).unwrap();
        }

        let path = generator(&temp).build_router().await.unwrap();

        let js = fs::read_to_string(path).unwrap();
        assert_eq!(js.matches("import zhDatePicker ").count(), 1);
        assert_eq!(js.matches("import enDatePicker ").count(), 1);
        assert!(js.contains("'./docs/date-picker/index-zh'"));
        assert!(!js.contains("date_picker"));
    }

    /// File system storage whose writes to one path always fail.
    struct FailingWrites {
        path: PathBuf,
    }

    #[async_trait::async_trait]
    impl Storage for FailingWrites {
        async fn read_to_string(&self, path: &Path) -> io::Result<String> {
            FsStorage.read_to_string(path).await
        }

        async fn list_dir(&self, path: &Path) -> io::Result<Vec<crate::storage::DirEntry>> {
            FsStorage.list_dir(path).await
        }

        async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            if path == self.path {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            FsStorage.write(path, contents).await
        }

        async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            FsStorage.create_dir_all(path).await
        }
    }

    #[tokio::test]
    async fn failed_write_does_not_stop_sibling_writes() {
        let temp = tempdir().unwrap();
        let components = temp.path().join("components");
        write_component(
            &components,
            "button",
            &[("basic", BASIC_DEMO), ("ghost", BASIC_DEMO)],
            &Locale::ALL,
        );
        let out = temp.path().join("site/docs/button");
        let storage = FailingWrites {
            path: out.join("demo/ghost.vue"),
        };
        let config = GenerateConfig {
            components_dir: components,
            output_dir: temp.path().join("site"),
            ..Default::default()
        };

        let report = Generator::new(config, storage).process("button").await;

        assert_eq!(report.failures.len(), 1);
        match &report.failures[0] {
            GenerateError::Write { path, .. } => assert_eq!(path, &out.join("demo/ghost.vue")),
            other => panic!("unexpected failure: {other}"),
        }
        for file in ["demo/basic.vue", "index-zh.vue", "index-en.vue"] {
            assert!(report.written.contains(&out.join(file)), "{file} not written");
            assert!(out.join(file).exists());
        }
        assert!(!out.join("demo/ghost.vue").exists());
    }

    #[test]
    fn compare_puts_unordered_demos_last() {
        let ordered = demodoc_mdx::parse_demo(BASIC_DEMO, "b", "z").value;
        let unordered =
            demodoc_mdx::parse_demo(&BASIC_DEMO.replace("order: 1\n", ""), "b", "a").value;

        assert_eq!(compare_demos(&ordered, &unordered), Ordering::Less);
    }
}

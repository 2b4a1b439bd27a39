//! Vue container generation for one component page.

use demodoc_mdx::{render_markdown, DemoRecord, IndexRecord, Locale};

use crate::naming::camel_identifier;
use crate::templates::{ContainerContext, DemoBlock, TemplateEngine};

/// Heading shown above the demo list.
fn showcase_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::ZhCn => "代码展示",
        Locale::EnUs => "Examples",
    }
}

/// Generated import identifier for a demo.
pub fn demo_identifier(demo: &DemoRecord) -> String {
    camel_identifier(&[&demo.component, &demo.name])
}

/// Render a component container for one locale.
///
/// Demos appear in the order given; sorting by `order` is the caller's job.
pub fn render_container(
    engine: &TemplateEngine,
    index: &IndexRecord,
    demos: &[DemoRecord],
) -> Result<String, minijinja::Error> {
    let locale = index.locale;

    let demos = demos
        .iter()
        .map(|demo| DemoBlock {
            identifier: demo_identifier(demo),
            name: demo.name.clone(),
            title: escape_attribute(demo.title.get(locale)),
            description: escape_attribute(&render_markdown(demo.description.get(locale))),
            code: escape_attribute(&demo.code_markup),
            display: demo.display.clone(),
        })
        .collect();

    let context = ContainerContext {
        title: index.title.clone(),
        subtitle: index.subtitle.clone(),
        before_code: render_markdown(&index.before_code),
        after_code: render_markdown(&index.after_code),
        showcase_heading: showcase_heading(locale).to_string(),
        demos,
    };

    engine.render_container(&context)
}

/// Escape a value placed inside a double-quoted attribute.
fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

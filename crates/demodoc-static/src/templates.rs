//! Template engine for rendering generated Vue containers and the router table.

use minijinja::{AutoEscape, Environment};

use crate::router::RouteTable;

/// One demo as shown inside a container.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DemoBlock {
    /// Generated component identifier (e.g. `buttonBasic`)
    pub identifier: String,
    /// Demo file name, used in the import path
    pub name: String,
    /// Attribute-escaped title
    pub title: String,
    /// Attribute-escaped rendered description
    pub description: String,
    /// Attribute-escaped rendered code
    pub code: String,
    /// Placeholder element for the live demo
    pub display: String,
}

/// Context for rendering a container template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContainerContext {
    pub title: String,
    pub subtitle: String,
    /// Rendered overview HTML
    pub before_code: String,
    /// Rendered API reference HTML
    pub after_code: String,
    /// Heading above the demo list
    pub showcase_heading: String,
    pub demos: Vec<DemoBlock>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the container and router templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Output is Vue/JavaScript source, values are escaped by the caller where needed
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_template_owned("container.vue".to_string(), CONTAINER_TEMPLATE.to_string())
            .expect("Failed to add container template");

        env.add_template_owned("router.js".to_string(), ROUTER_TEMPLATE.to_string())
            .expect("Failed to add router template");

        Self { env }
    }

    /// Render a component container.
    pub fn render_container(&self, context: &ContainerContext) -> Result<String, minijinja::Error> {
        self.env.get_template("container.vue")?.render(context)
    }

    /// Render the router table module.
    pub fn render_router(&self, table: &RouteTable) -> Result<String, minijinja::Error> {
        self.env.get_template("router.js")?.render(table)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const CONTAINER_TEMPLATE: &str = r##"<template>
  <container>
    <h1>{{ title }} {{ subtitle }}</h1>
    {{ before_code }}
    <h2>{{ showcase_heading }}</h2>
{% for demo in demos %}
    <code-show
      title="{{ demo.title }}"
      desc="{{ demo.description }}"
      code="{{ demo.code }}">
      {{ demo.display }}
    </code-show>
{% endfor %}
    {{ after_code }}
  </container>
</template>

<script>
import Container from '../common/container'
import CodeShow from '../common/code-show'
{% for demo in demos %}
import {{ demo.identifier }} from './demo/{{ demo.name }}'
{% endfor %}

export default {
  components: {
{% for demo in demos %}
    {{ demo.identifier }},
{% endfor %}
    Container,
    CodeShow
  }
}
</script>
"##;

const ROUTER_TEMPLATE: &str = r##"import Vue from 'vue'
import Router from 'vue-router'
{% for table in tables %}
{% for route in table.routes %}
import {{ route.identifier }} from '{{ route.module }}'
{% endfor %}
{% endfor %}

Vue.use(Router)

const router = new Router({
  routes: [
{% for table in tables %}
    {
      path: '{{ table.path }}',
      children: [
{% for route in table.routes %}
        {
          path: '{{ route.path }}',
          component: {{ route.identifier }},
          name: '{{ route.name }}'
        },
{% endfor %}
      ]
    },
{% endfor %}
  ]
})

export default router
"##;

//! Two-locale router table.

use std::collections::HashMap;

use demodoc_mdx::Locale;

use crate::naming::camel_identifier;

/// Root path under which a locale's component routes are nested.
fn locale_root(locale: Locale) -> String {
    format!("/component/{}", locale.tag())
}

/// A single child route.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Route {
    /// Path relative to the locale root (the component name)
    pub path: String,
    /// Identifier the container module is imported as
    pub identifier: String,
    /// Import path of the container module
    pub module: String,
    /// Route name (`button-zh`)
    pub name: String,
}

/// Routes of one locale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LocaleRoutes {
    pub locale: Locale,
    pub path: String,
    pub routes: Vec<Route>,
}

/// A component left out of the table because an earlier one already
/// claimed its import identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConflict {
    /// Component that keeps the identifier
    pub kept: String,
    pub skipped: String,
    /// Identifier both components generate in the zh-CN table
    pub identifier: String,
}

/// Routes of every locale.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RouteTable {
    pub tables: Vec<LocaleRoutes>,

    #[serde(skip)]
    pub conflicts: Vec<RouteConflict>,
}

impl RouteTable {
    /// Build the table for the given generated component directories, in order.
    ///
    /// Locale prefixes are plain lower-case words, so a component colliding
    /// with an earlier one in one locale collides in all of them and is left
    /// out of every table.
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> Self {
        let mut claimed: HashMap<String, &str> = HashMap::new();
        let mut accepted = Vec::new();
        let mut conflicts = Vec::new();

        for component in components {
            let component = component.as_ref();
            let identifier = camel_identifier(&[Locale::ZhCn.short(), component]);
            match claimed.get(&identifier) {
                Some(kept) => conflicts.push(RouteConflict {
                    kept: kept.to_string(),
                    skipped: component.to_string(),
                    identifier,
                }),
                None => {
                    claimed.insert(identifier, component);
                    accepted.push(component);
                }
            }
        }

        let tables = Locale::ALL
            .iter()
            .map(|&locale| LocaleRoutes {
                locale,
                path: locale_root(locale),
                routes: accepted.iter().map(|c| route(locale, c)).collect(),
            })
            .collect();

        Self { tables, conflicts }
    }

    /// Routes of one locale.
    pub fn routes(&self, locale: Locale) -> &[Route] {
        self.tables
            .iter()
            .find(|t| t.locale == locale)
            .map(|t| t.routes.as_slice())
            .unwrap_or_default()
    }
}

fn route(locale: Locale, component: &str) -> Route {
    let short = locale.short();
    Route {
        path: component.to_string(),
        identifier: camel_identifier(&[short, component]),
        module: format!("./docs/{component}/index-{short}"),
        name: format!("{component}-{short}"),
    }
}

//! Handlebars-backed `ViewRenderer` implementation.
//!
//! Templates are loaded once from a directory tree at startup; a template at
//! `listings/index.hbs` is rendered under the view name `listings/index`.
//! Rendering is pure CPU work over the pre-parsed registry, so the port
//! stays synchronous.

use std::path::Path;

use handlebars::{DirectorySourceOptions, Handlebars};
use serde_json::Value;

use crate::domain::ports::{RenderError, ViewRenderer};

/// View renderer over a pre-registered Handlebars template directory.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Load and parse every `.hbs` file under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when the directory cannot be read
    /// or any template fails to parse.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        // Pages tolerate absent optional fields (for example `flashes`), so
        // strict mode stays off.
        registry
            .register_templates_directory(dir.as_ref(), DirectorySourceOptions::default())
            .map_err(|error| RenderError::template(error.to_string()))?;
        Ok(Self { registry })
    }
}

impl ViewRenderer for HandlebarsRenderer {
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError> {
        if !self.registry.has_template(view) {
            return Err(RenderError::missing_view(view));
        }
        self.registry
            .render(view, data)
            .map_err(|error| RenderError::template(error.to_string()))
    }
}

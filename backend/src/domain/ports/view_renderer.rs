//! Port abstraction for server-side view rendering.

use serde_json::Value;

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by view renderer adapters.
    pub enum RenderError {
        /// No template is registered under the requested view name.
        MissingView { name: String } => "view {name} is not registered",
        /// The template engine failed while rendering.
        Template { message: String } => "template rendering failed: {message}",
    }
}

/// Renders a named view against a data payload, producing an HTML body.
///
/// Registered once at startup; implementations must be read-only afterwards
/// so handlers can share them freely.
pub trait ViewRenderer: Send + Sync {
    /// Render the named view with the given payload.
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError>;
}

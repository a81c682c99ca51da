//! Markup templates rendered with [`minijinja`](https://crates.io/crates/minijinja).

use intl_tel_core::{LazyLock, error::Error};
use minijinja::Environment;
use serde::Serialize;

/// Template of the input markup.
pub(crate) const INPUT_TEMPLATE: &str = "input.html";

/// Template of the editor preview markup.
pub(crate) const PREVIEW_TEMPLATE: &str = "preview.html";

/// Renders a template with the given context.
pub(crate) fn render(template_name: &str, context: impl Serialize) -> Result<String, Error> {
    let template = SHARED_VIEW_ENGINE.get_template(template_name)?;
    let markup = template.render(context)?;
    Ok(markup.trim_end().to_owned())
}

/// Shared view engine with the bundled templates.
static SHARED_VIEW_ENGINE: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut view_engine = Environment::new();
    let templates = [
        (INPUT_TEMPLATE, include_str!("../templates/input.html")),
        (PREVIEW_TEMPLATE, include_str!("../templates/preview.html")),
    ];
    for (name, source) in templates {
        if let Err(err) = view_engine.add_template(name, source) {
            tracing::error!(template = name, "fail to add the template: {err}");
        }
    }
    view_engine
});

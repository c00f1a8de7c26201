use log::error;
use std::sync::LazyLock;
use tera::Tera;

use super::errors;

pub static WEB_TEMPLATES: LazyLock<Tera> =
    LazyLock::new(|| match Tera::new("web/templates/**/*.html") {
        Ok(templates) => templates,
        Err(e) => {
            error!("web templates couldnt be loaded: {e}");
            Tera::default()
        }
    });

/// Renders `template_name`, `endpoint` only tags the error message
pub fn render(
    template_name: &str,
    context: &tera::Context,
    endpoint: &str,
) -> Result<String, errors::ServerError> {
    WEB_TEMPLATES.render(template_name, context).map_err(|e| {
        errors::ServerError::TemplateError(format!(
            "at {endpoint} endpoint the template {template_name} couldnt be rendered: {e}"
        ))
    })
}

use minijinja::{context, Environment, UndefinedBehavior};

use crate::export::{outline, ExportError, ReportDocument};

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../../templates/report.html");

/// Standalone HTML page. The `.html` template name turns on minijinja's
/// HTML auto-escaping, so model text is always escaped.
pub fn render(document: &ReportDocument<'_>) -> Result<String, ExportError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(render_error)?;

    let template = env.get_template(TEMPLATE_NAME).map_err(render_error)?;
    template
        .render(context! {
            lang => document.language.code(),
            dir => document.language.direction().as_str(),
            title => document.language.labels().report_title,
            name => &document.profile.name,
            generated => document.report.generated_at.format("%Y-%m-%d").to_string(),
            blocks => outline::build(document),
        })
        .map_err(render_error)
}

fn render_error(err: minijinja::Error) -> ExportError {
    ExportError::Render(err.to_string())
}

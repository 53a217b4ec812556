use anyhow::Result;
use handlebars::Handlebars;

use crate::common::get_handlebars;

/// Registry with all page templates and layout partials compiled in.
pub fn get_templates() -> Result<Handlebars<'static>> {
    let mut handlebars = get_handlebars();

    handlebars.register_partial("page_head", include_str!("templates/page_head.hbs"))?;
    handlebars.register_partial("page_foot", include_str!("templates/page_foot.hbs"))?;
    handlebars.register_template_string("index", include_str!("templates/index.hbs"))?;
    handlebars.register_template_string("plan", include_str!("templates/plan.hbs"))?;
    handlebars.register_template_string("history", include_str!("templates/history.hbs"))?;

    Ok(handlebars)
}

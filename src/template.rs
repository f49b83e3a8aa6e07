//! Built-in minijinja templates.
//!
//! Two templates are recognised: `document` (posts, notes, tables of
//! contents) and `about`. Both take `{created_date, title, content}`;
//! tables of contents omit `created_date`, which renders empty under
//! minijinja's lenient undefined handling.

use minijinja::Environment;
use tracing::debug;

use crate::contract::{TemplateEngine, TemplateError, TemplateVars};

const DOCUMENT_TEMPLATE: &str = "\
---
title: \"{{ title }}\"
date: {{ created_date }}
---

{{ content }}";

const ABOUT_TEMPLATE: &str = "\
---
title: \"{{ title }}\"
date: {{ created_date }}
layout: about
---

{{ content }}";

pub struct JinjaTemplates {
    env: Environment<'static>,
}

impl JinjaTemplates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template("document", DOCUMENT_TEMPLATE)
            .map_err(|e| TemplateError(e.to_string()))?;
        env.add_template("about", ABOUT_TEMPLATE)
            .map_err(|e| TemplateError(e.to_string()))?;
        Ok(Self { env })
    }
}

impl TemplateEngine for JinjaTemplates {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| TemplateError(format!("unknown template {template:?}: {e}")))?;
        debug!(template, "rendering template");
        tmpl.render(vars).map_err(|e| TemplateError(e.to_string()))
    }
}

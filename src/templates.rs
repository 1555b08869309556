use std::fs;
use std::path::Path;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output,
    RenderContext, RenderErrorReason,
};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::{io_error, RunError};
use crate::money::{decimal_from_json, MoneyFormat};

/// `{{money value}}`: formats a JSON number with the configured convention.
/// Also registered as `eur`.
struct MoneyHelper(MoneyFormat);

impl HelperDef for MoneyHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("money", 0))?;

        let amount = match param.value() {
            Value::Null => {
                warn!(
                    "No amount for money({}), showing zero",
                    param.relative_path().map_or("", String::as_str)
                );
                Decimal::ZERO
            }
            value => decimal_from_json(value)
                .ok_or(RenderErrorReason::InvalidParamType("number"))?,
        };

        out.write(&self.0.format(amount))?;
        Ok(())
    }
}

pub struct Renderer {
    money: MoneyFormat,
}

impl Renderer {
    pub fn new(money: MoneyFormat) -> Self {
        Self { money }
    }

    fn registry(&self) -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        registry.register_helper("money", Box::new(MoneyHelper(self.money.clone())));
        registry.register_helper("eur", Box::new(MoneyHelper(self.money.clone())));
        registry
    }

    pub fn render<T: Serialize>(
        &self,
        template: &Path,
        context: &T,
    ) -> Result<String, RunError> {
        let source = fs::read_to_string(template).map_err(io_error(template))?;
        debug!("Rendering {}", template.display());

        self.registry()
            .render_template(&source, context)
            .map_err(|source| RunError::Template {
                path: template.to_path_buf(),
                source,
            })
    }

    pub fn render_to_file<T: Serialize>(
        &self,
        template: &Path,
        output: &Path,
        context: &T,
    ) -> Result<(), RunError> {
        let html = self.render(template, context)?;
        fs::write(output, html).map_err(io_error(output))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(MoneyFormat::default())
    }
}

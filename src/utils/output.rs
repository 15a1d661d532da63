use crate::utils::errors::Result;
use serde_json::Value;

/// Output format configuration
#[derive(Clone, Debug)]
pub struct OutputFormat {
    pub raw: bool,
}

impl OutputFormat {
    pub fn new(raw: bool) -> Self {
        Self { raw }
    }

    /// Render a JSON payload - either raw (single line) or pretty-printed
    pub fn render_json(&self, value: &Value) -> Result<String> {
        if self.raw {
            Ok(serde_json::to_string(value)?)
        } else {
            Ok(serde_json::to_string_pretty(value)?)
        }
    }

    /// Print a JSON payload to stdout
    pub fn print_json(&self, value: &Value) -> Result<()> {
        println!("{}", self.render_json(value)?);
        Ok(())
    }
}

use crate::units::error::FormattingError;
use crate::units::formatter;
use crate::units::numeric::Numeric;
use crate::units::template::Template;

/// Format used when a unit does not declare its own ("value symbol")
pub const DEFAULT_FORMAT: &str = "%f %s";

/// A unit of measure with its symbols and compiled quantity template
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    symbols: Vec<String>,
    dimension: Option<String>,
    template: Template,
}

impl Unit {
    pub fn new(name: &str, symbols: &[&str], format: &str) -> Result<Self, FormattingError> {
        Ok(Self {
            name: name.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            dimension: None,
            template: Template::parse(format)?,
        })
    }

    pub fn with_default_format(name: &str, symbols: &[&str]) -> Result<Self, FormattingError> {
        Self::new(name, symbols, DEFAULT_FORMAT)
    }

    pub fn with_dimension(mut self, dimension: &str) -> Self {
        self.dimension = Some(dimension.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Symbol used for rendering: the first tag, or the name if there is none
    pub fn symbol(&self) -> &str {
        self.symbols.first().map(String::as_str).unwrap_or(&self.name)
    }

    pub fn dimension(&self) -> Option<&str> {
        self.dimension.as_deref()
    }

    pub fn format(&self) -> &str {
        self.template.source()
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn render<T: Numeric>(&self, value: T) -> Result<String, FormattingError> {
        self.template.render(value, self.symbol())
    }
}

/// A value expressed in a unit
#[derive(Debug, Clone, Copy)]
pub struct Quantity<'u, T> {
    value: T,
    unit: &'u Unit,
}

impl<'u, T: Numeric> Quantity<'u, T> {
    pub fn new(value: T, unit: &'u Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn unit(&self) -> &'u Unit {
        self.unit
    }

    /// Render with the unit's own format
    pub fn to_formatted_string(&self) -> Result<String, FormattingError> {
        self.unit.render(self.value)
    }

    /// Render with a caller-supplied format instead of the unit's
    pub fn format_with(&self, format: &str) -> Result<String, FormattingError> {
        formatter::to_string(self.value, self.unit.symbol(), format)
    }
}

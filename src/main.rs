use clap::{Parser, Subcommand};
use qtyfmt::catalog::UnitCatalog;
use qtyfmt::units::{self, Conversion, NumericArg, Template, DEFAULT_FORMAT};

#[derive(Parser)]
#[command(name = "qtyfmt")]
#[command(about = "Render quantities with units through printf-style templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a quantity and unit label
    Render {
        /// Numeric quantity (e.g. "3.5", "-12", "42")
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Unit label (e.g. "m", "kg", "°C")
        unit: String,

        /// Format template: a numeric conversion followed by %s
        #[arg(short, long, default_value = DEFAULT_FORMAT)]
        format: String,
    },

    /// Validate a format template and describe its conversions
    Check {
        /// Format template (e.g. "%.2f %s")
        format: String,
    },

    /// Render a quantity with a unit from a catalog file
    Show {
        /// Unit catalog (TOML)
        catalog: String,

        /// Unit name or symbol
        unit: String,

        /// Numeric quantity
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Print the units of a catalog file as JSON
    List {
        /// Unit catalog (TOML)
        catalog: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            quantity,
            unit,
            format,
        } => render_quantity(&quantity, &unit, &format),
        Commands::Check { format } => check_template(&format),
        Commands::Show {
            catalog,
            unit,
            quantity,
        } => show_quantity(&catalog, &unit, &quantity),
        Commands::List { catalog } => list_units(&catalog),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parse the quantity as the kind the template's numeric conversion expects.
/// Unsigned conversions take the full u64 range unless the text is negative.
fn parse_quantity(template: &Template, quantity: &str) -> Result<NumericArg, String> {
    let text = quantity.trim();
    let conversion = template.quantity_spec().map(|spec| spec.conversion);

    match conversion {
        Some(Conversion::Unsigned | Conversion::Octal | Conversion::Hex { .. })
            if !text.starts_with('-') =>
        {
            text.parse::<u64>()
                .map(NumericArg::Unsigned)
                .map_err(|e| format!("'{}' is not an unsigned integer: {}", quantity, e))
        }
        Some(c) if c.is_integral() => text
            .parse::<i64>()
            .map(NumericArg::Signed)
            .map_err(|e| format!("'{}' is not an integer: {}", quantity, e)),
        _ => text
            .parse::<f64>()
            .map(NumericArg::Float)
            .map_err(|e| format!("'{}' is not a number: {}", quantity, e)),
    }
}

fn render_with(
    template: &Template,
    quantity: &str,
    unit: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let value = parse_quantity(template, quantity)?;
    Ok(template.render(value, unit)?)
}

fn render_quantity(
    quantity: &str,
    unit: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse(format)?;
    println!("{}", render_with(&template, quantity, unit)?);
    Ok(())
}

fn check_template(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse(format)?;

    for segment in template.segments() {
        match segment {
            units::Segment::Literal(text) => println!("literal   {:?}", text),
            units::Segment::Quantity(spec) => {
                let kind = if template.expects_integer() {
                    "integer"
                } else {
                    "floating-point"
                };
                println!("quantity  {} ({})", spec.text, kind);
            }
            units::Segment::Unit(spec) => println!("unit      {}", spec.text),
        }
    }
    Ok(())
}

fn show_quantity(
    catalog_path: &str,
    unit: &str,
    quantity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = UnitCatalog::load_from_file(catalog_path)?;
    let unit = catalog
        .resolve(unit)
        .ok_or_else(|| format!("Unit '{}' not found in {}", unit, catalog_path))?;

    println!("{}", render_with(unit.template(), quantity, unit.symbol())?);
    Ok(())
}

fn list_units(catalog_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = UnitCatalog::load_from_file(catalog_path)?;
    let json = serde_json::to_string_pretty(catalog.definitions())?;
    println!("{}", json);
    Ok(())
}

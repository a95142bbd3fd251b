use std::{borrow::Cow, env, fs};

use slicewise_application::{OptimizeError, PizzaOptimizer};
use slicewise_domain::OrderContext;
use slicewise_infrastructure::{GoodLpEngine, load_settings};
use slicewise_presentation::PlanPresenter;
use tracing_subscriber::EnvFilter;

pub type CliResult<T> = Result<T, Cow<'static, str>>;

/// Initialize logging and tracing. Logs go to stderr so the plan on stdout
/// stays clean; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads an order file, solves it and prints the plan.
pub fn run() -> CliResult<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let Some(path) = env::args().nth(1) else {
        return Err("Usage: slicewise <order.json>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;
    let order = parse_order(&source)?;
    let settings = load_settings().map_err(|err| format!("Invalid settings: {err}"))?;

    tracing::info!(
        path = %path,
        participants = order.participants.len(),
        toppings = order.toppings.len(),
        pizzas = order.num_pizzas,
        mode = %order.optimization_mode,
        "Order loaded"
    );

    let pizzas = PizzaOptimizer::new(&GoodLpEngine, settings)
        .optimize(&order)
        .map_err(format_optimize_error)?;

    print!(
        "{}",
        PlanPresenter::render(&pizzas, &order.participants, &order.toppings)
    );
    Ok(())
}

pub fn parse_order(source: &str) -> CliResult<OrderContext> {
    serde_json::from_str(source).map_err(|err| format!("Invalid order: {err}").into())
}

pub fn format_optimize_error(err: OptimizeError) -> Cow<'static, str> {
    match err {
        OptimizeError::InvalidConfiguration(inner) => {
            format!("Invalid order configuration: {inner}").into()
        }
        OptimizeError::SolveFailure(status) => {
            format!("No pizza plan could be found (solver status: {status})").into()
        }
    }
}

//! Activity graph CLI application.
//!
//! # Usage
//! ```ignore
//! kusa                      // Year ending today
//! kusa 2021-01-03           // Year starting 3 January 2021
//! kusa -f svg -o out.svg    // Standalone SVG file
//! ```

mod logging;

use std::io::Write;

use kusa::args::Args;
use kusa::error::KusaError;
use kusa::formatter::render_markup;
use kusa::types::GraphContext;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("kusa: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), KusaError> {
    let ctx = GraphContext::new(args)?;
    let markup = render_markup(&ctx);

    match &ctx.output {
        Some(path) => std::fs::write(path, markup)?,
        None => std::io::stdout().lock().write_all(markup.as_bytes())?,
    }

    Ok(())
}

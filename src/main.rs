/*
 * Generate HTML invoices and credit notes from JSON data files
 *
 * Single document:
 * - Load data/<name>.json
 * - Compute row prices, total, and VAT when a positive rate is given
 * - Render templates/<type>.hbs into <output>/<name>.html
 *
 * Batch:
 * - Every data/<type>*.json file is generated with the template of its type
 *
 * Either way the index page <output>/index.html is then rebuilt from the
 * documents found in the output directory, grouped by type.
 */

mod catalog;
mod cli;
mod error;
mod kind;
mod money;
mod run;
mod templates;
mod totals;

use clap::Parser;
use crate::cli::Opts;

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    if let Err(error) = run::run_cmd(opts) {
        eprintln!("{}", error);
    }
}

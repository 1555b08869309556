use clap::{Parser, ValueHint};
use std::path::PathBuf;
use strum::VariantNames;

use crate::kind::DocumentType;

/* Layout beneath the project root
 *
 * templates/<type>.hbs, templates/index.hbs
 * data/<name>.json
 * dist/<name>.html, dist/index.html (unless --output is given)
 */

#[derive(Parser)]
#[clap(name = "docgen", version,
    about = "Generate HTML invoices and credit notes from JSON data")]
pub struct Opts {
    /// Document type
    #[clap(short = 't', long = "type", default_value = "invoice",
        value_parser = parse_type)]
    pub doc_type: DocumentType,

    /// Data file name, without the .json extension. All data files are
    /// generated when omitted
    #[clap(short, long)]
    pub data: Option<String>,

    /// Output directory [default: <root>/dist]
    #[clap(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Print the generated documents
    #[clap(short, long)]
    pub print: bool,

    /// Project directory holding the templates and data directories
    #[clap(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub root: PathBuf,
}

fn parse_type(value: &str) -> Result<DocumentType, String> {
    value.parse().map_err(|_| {
        format!("expected one of: {}", DocumentType::VARIANTS.join(", "))
    })
}

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::catalog::Catalog;
use crate::cli::Opts;
use crate::error::{io_error, RunError};
use crate::kind::DocumentType;
use crate::money::MoneyFormat;
use crate::templates::Renderer;
use crate::totals::Document;

const DATA_SUFFIX: &str = ".json";
const OUTPUT_SUFFIX: &str = ".html";

/// Where templates and data are read from and documents are written to.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub templates: PathBuf,
    pub data: PathBuf,
    pub output: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, output: Option<PathBuf>) -> Self {
        Self {
            templates: root.join("templates"),
            data: root.join("data"),
            output: output.unwrap_or_else(|| root.join("dist")),
        }
    }

    fn template(&self, doc_type: DocumentType) -> PathBuf {
        self.templates.join(doc_type.template_name())
    }

    fn index_template(&self) -> PathBuf {
        self.templates.join("index.hbs")
    }

    fn data_file(&self, name: &str) -> PathBuf {
        self.data.join(format!("{}{}", name, DATA_SUFFIX))
    }

    fn output_file(&self, name: &str) -> PathBuf {
        self.output.join(format!("{}{}", name, OUTPUT_SUFFIX))
    }

    fn index(&self) -> PathBuf {
        self.output.join("index.html")
    }
}

pub struct Generator {
    layout: Layout,
    renderer: Renderer,
}

impl Generator {
    pub fn new(layout: Layout, money: MoneyFormat) -> Self {
        Self {
            layout,
            renderer: Renderer::new(money),
        }
    }

    /// Renders `data/<name>.json` with the template of `doc_type` into
    /// `<output>/<name>.html`.
    pub fn generate(
        &self,
        doc_type: DocumentType,
        name: &str,
    ) -> Result<PathBuf, RunError> {
        let name = name.strip_suffix(DATA_SUFFIX).unwrap_or(name);
        let data_path = self.layout.data_file(name);
        debug!("Loading {} as {}", data_path.display(), doc_type);
        let document = load_document(&data_path)?;
        let context = document.priced().map_err(|source| RunError::Overflow {
            path: data_path.clone(),
            source,
        })?;

        fs::create_dir_all(&self.layout.output)
            .map_err(io_error(&self.layout.output))?;

        let output = self.layout.output_file(name);
        self.renderer.render_to_file(
            &self.layout.template(doc_type),
            &output,
            &context,
        )?;
        info!("Generated {} {}", doc_type, output.display());
        Ok(output)
    }

    /// Generates every data file whose name starts with a document type.
    /// Stops at the first failure.
    pub fn generate_all(&self) -> Result<Vec<PathBuf>, RunError> {
        let types: Vec<DocumentType> = DocumentType::iter().collect();
        let catalog = Catalog::scan(&self.layout.data, DATA_SUFFIX, &types)?;
        debug!("Found {} data files", catalog.len());

        catalog
            .entries()
            .map(|(doc_type, file_name)| self.generate(doc_type, file_name))
            .collect()
    }

    /// Rewrites `<output>/index.html` from the documents in the output
    /// directory.
    pub fn rebuild_index(&self) -> Result<PathBuf, RunError> {
        let types: Vec<DocumentType> = DocumentType::iter().collect();
        fs::create_dir_all(&self.layout.output)
            .map_err(io_error(&self.layout.output))?;
        let catalog = Catalog::scan(&self.layout.output, OUTPUT_SUFFIX, &types)?;

        if catalog.is_empty() {
            warn!("No documents found in {}", self.layout.output.display());
        }

        let index = self.layout.index();
        self.renderer
            .render_to_file(&self.layout.index_template(), &index, &catalog)?;
        info!("Indexed {} documents in {}", catalog.len(), index.display());
        Ok(index)
    }
}

fn load_document(path: &Path) -> Result<Document, RunError> {
    let file = File::open(path).map_err(io_error(path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| RunError::Data {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run_cmd(opts: Opts) -> Result<(), RunError> {
    let layout = Layout::new(&opts.root, opts.output);
    let generator = Generator::new(layout, MoneyFormat::default());

    let generated = match opts.data {
        Some(name) => vec![generator.generate(opts.doc_type, &name)?],
        None => generator.generate_all()?,
    };
    generator.rebuild_index()?;

    for path in generated.iter() {
        println!("File {} generated", path.display());
    }

    if opts.print {
        return Err(RunError::Unsupported { feature: "Printing" });
    }
    Ok(())
}

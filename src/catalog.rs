use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{io_error, RunError};
use crate::kind::DocumentType;

/// File names of a directory grouped by the document type their name starts
/// with. Types without any file are left out.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Catalog {
    docs: BTreeMap<DocumentType, Vec<String>>,
}

impl Catalog {
    pub fn scan(
        dir: &Path,
        suffix: &str,
        types: &[DocumentType],
    ) -> Result<Self, RunError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error(dir))? {
            let entry = entry.map_err(io_error(dir))?;
            match entry.file_name().into_string() {
                Ok(name) if name.ends_with(suffix) => names.push(name),
                Ok(_) => {}
                Err(name) => debug!("Skipping non UTF-8 file name {:?}", name),
            }
        }
        names.sort();

        Ok(Self::classify(names, types))
    }

    pub fn classify<I>(names: I, types: &[DocumentType]) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut docs: BTreeMap<DocumentType, Vec<String>> = BTreeMap::new();
        for name in names {
            let matching: Vec<&DocumentType> =
                types.iter().filter(|t| t.classifies(&name)).collect();
            if matching.len() > 1 {
                warn!("{} matches several document types: {:?}", name, matching);
            }
            for doc_type in matching {
                docs.entry(*doc_type).or_default().push(name.clone());
            }
        }
        Self { docs }
    }

    /// File names of one type, `None` when the type has none.
    pub fn get(&self, doc_type: DocumentType) -> Option<&[String]> {
        self.docs.get(&doc_type).map(Vec::as_slice)
    }

    /// Every (type, file name) pair, grouped by type.
    pub fn entries(&self) -> impl Iterator<Item = (DocumentType, &str)> {
        self.docs.iter().flat_map(|(doc_type, names)| {
            names.iter().map(move |name| (*doc_type, name.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.docs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.docs.len()))?;
        for (doc_type, names) in self.docs.iter() {
            map.serialize_entry(doc_type.as_ref(), names)?;
        }
        map.end()
    }
}

use strum_macros::{AsRefStr, Display, EnumIter, EnumString, VariantNames};

/// Kind of document a data file describes. The lowercase identifier picks
/// the template and is the filename prefix used to classify files.
#[derive(
    Display,
    EnumString,
    VariantNames,
    AsRefStr,
    EnumIter,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentType {
    Invoice,
    CreditNote,
}

impl DocumentType {
    pub fn template_name(&self) -> String {
        format!("{}.hbs", self)
    }

    pub fn classifies(&self, file_name: &str) -> bool {
        file_name.starts_with(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{IntoEnumIterator, VariantNames};

    #[test]
    fn identifiers() {
        assert_eq!(DocumentType::Invoice.to_string(), "invoice");
        assert_eq!(DocumentType::CreditNote.as_ref(), "creditnote");
        assert_eq!(DocumentType::VARIANTS, &["invoice", "creditnote"]);
        assert_eq!(DocumentType::iter().count(), 2);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            DocumentType::from_str("creditnote"),
            Ok(DocumentType::CreditNote)
        );
        assert!(DocumentType::from_str("Invoice").is_err());
        assert!(DocumentType::from_str("receipt").is_err());
    }

    #[test]
    fn template_name() {
        assert_eq!(DocumentType::Invoice.template_name(), "invoice.hbs");
        assert_eq!(DocumentType::CreditNote.template_name(), "creditnote.hbs");
    }

    #[test]
    fn classifies_by_prefix() {
        assert!(DocumentType::Invoice.classifies("invoice-001.html"));
        assert!(DocumentType::Invoice.classifies("invoice.json"));
        assert!(!DocumentType::Invoice.classifies("Invoice-001.html"));
        assert!(!DocumentType::Invoice.classifies("old-invoice.html"));
        assert!(!DocumentType::CreditNote.classifies("index.html"));
    }
}

//! Document-vs-name input classification.
//!
//! A query is treated as a taxpayer document when, after stripping every
//! non-digit character, exactly 11 (CPF) or 14 (CNPJ) digits remain.
//! Anything else is searched by name.

use serde::Serialize;

/// Digits in an individual taxpayer id (CPF).
const CPF_LEN: usize = 11;

/// Digits in an organisation taxpayer id (CNPJ).
const CNPJ_LEN: usize = 14;

/// Kind of taxpayer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Individual,
    Organization,
}

/// How a query is sent to the legal-records provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputMode {
    /// Search by document number (digits only).
    Document { digits: String, kind: DocumentKind },
    /// Search by (trimmed) name.
    Name { name: String },
}

impl InputMode {
    /// Query-string parameter carrying this input: `cpf_cnpj` XOR `nome`.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            Self::Document { digits, .. } => ("cpf_cnpj", digits.as_str()),
            Self::Name { name } => ("nome", name.as_str()),
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document { .. })
    }

    /// The name to search the web for, if the input already is one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name { name } => Some(name.as_str()),
            Self::Document { .. } => None,
        }
    }
}

/// Classify raw user input.
pub fn classify(input: &str) -> InputMode {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        CPF_LEN => InputMode::Document {
            digits,
            kind: DocumentKind::Individual,
        },
        CNPJ_LEN => InputMode::Document {
            digits,
            kind: DocumentKind::Organization,
        },
        _ => InputMode::Name {
            name: input.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_cpf_is_document() {
        let mode = classify("123.456.789-00");
        assert_eq!(
            mode,
            InputMode::Document {
                digits: "12345678900".into(),
                kind: DocumentKind::Individual,
            }
        );
        assert_eq!(mode.query_param(), ("cpf_cnpj", "12345678900"));
    }

    #[test]
    fn formatted_cnpj_is_document() {
        let mode = classify("12.345.678/0001-90");
        assert!(matches!(
            mode,
            InputMode::Document {
                kind: DocumentKind::Organization,
                ..
            }
        ));
    }

    #[test]
    fn plain_name_is_name_mode() {
        let mode = classify("  Maria Silva ");
        assert_eq!(
            mode,
            InputMode::Name {
                name: "Maria Silva".into()
            }
        );
        assert_eq!(mode.query_param(), ("nome", "Maria Silva"));
        assert_eq!(mode.name(), Some("Maria Silva"));
    }

    #[test]
    fn only_11_or_14_digits_are_documents() {
        for len in 0..20 {
            let input = "7".repeat(len);
            let expected = len == 11 || len == 14;
            assert_eq!(classify(&input).is_document(), expected, "len {len}");
        }
    }

    #[test]
    fn name_with_digits_stays_name_mode() {
        // 12 digits: neither CPF nor CNPJ
        let mode = classify("Loja 123456789012");
        assert!(!mode.is_document());
    }
}

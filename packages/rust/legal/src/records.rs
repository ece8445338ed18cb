//! Decoding of the process-list payload into [`LegalRecords`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::classify::InputMode;

/// Decoded answer of the process-list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LegalRecords {
    /// Provider-declared process count, falling back to `items.len()`.
    pub total: u64,
    /// First matched party, if the provider identified one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<LegalPartyRecord>,
    /// Raw process records as returned by the provider.
    pub items: Vec<Value>,
    /// Pagination links, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    /// Value of the consumed-credits response header.
    pub credits_used: String,
}

/// Identity and participation breakdown of the searched party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegalPartyRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<String>,
    /// Process count per procedural role (e.g. `ATIVO`, `PASSIVO`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub by_role: BTreeMap<String, u64>,
    /// Process count per justice branch.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub by_branch: BTreeMap<String, u64>,
}

impl LegalRecords {
    pub(crate) fn from_payload(body: &Value, input: &InputMode, credits_used: String) -> Self {
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let found = first_party(body);

        let total = found
            .and_then(|p| p.get("quantidade_processos"))
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);

        let party = found.and_then(|p| {
            let name = str_field(p, "nome")?;
            let document = str_field(p, "cpf_cnpj")
                .or_else(|| str_field(p, "cpf"))
                .or_else(|| str_field(p, "cnpj"))
                .or_else(|| match input {
                    InputMode::Document { digits, .. } => Some(digits.clone()),
                    InputMode::Name { .. } => None,
                });
            let (by_role, by_branch) = participation(&items, &name, document.as_deref());
            Some(LegalPartyRecord {
                person_type: str_field(p, "tipo_pessoa"),
                name,
                document,
                by_role,
                by_branch,
            })
        });

        let links = body.get("links").filter(|v| !v.is_null()).cloned();

        Self {
            total,
            party,
            items,
            links,
            credits_used,
        }
    }
}

/// `envolvido_encontrado` may be a single object or a list of candidates.
fn first_party(body: &Value) -> Option<&Value> {
    match body.get("envolvido_encontrado")? {
        Value::Array(list) => list.first(),
        obj @ Value::Object(_) => Some(obj),
        _ => None,
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Count processes per role of the searched party and per justice branch.
///
/// Each process counts once per map, using its first source that carries
/// the relevant field.
fn participation(
    items: &[Value],
    name: &str,
    document: Option<&str>,
) -> (BTreeMap<String, u64>, BTreeMap<String, u64>) {
    let mut by_role = BTreeMap::new();
    let mut by_branch = BTreeMap::new();
    let name_lower = name.to_lowercase();
    let doc_digits = document.map(digits_of).filter(|d| !d.is_empty());

    for item in items {
        let sources = item
            .get("fontes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if let Some(branch) = sources.iter().find_map(branch_of) {
            *by_branch.entry(branch).or_insert(0) += 1;
        }

        let role = sources.iter().find_map(|source| {
            let parties = source.get("envolvidos")?.as_array()?;
            parties.iter().find_map(|party| {
                let matches_doc = doc_digits.as_ref().is_some_and(|d| {
                    ["cpf", "cnpj", "cpf_cnpj"]
                        .iter()
                        .filter_map(|k| party.get(*k).and_then(Value::as_str))
                        .any(|v| digits_of(v) == *d)
                });
                let matches_name = party
                    .get("nome")
                    .and_then(Value::as_str)
                    .is_some_and(|n| n.trim().to_lowercase() == name_lower);
                if !(matches_doc || matches_name) {
                    return None;
                }
                str_field(party, "polo").or_else(|| str_field(party, "tipo_normalizado"))
            })
        });

        if let Some(role) = role {
            *by_role.entry(role).or_insert(0) += 1;
        }
    }

    (by_role, by_branch)
}

/// Justice branch of one source: declared category, else inferred from the
/// court acronym.
fn branch_of(source: &Value) -> Option<String> {
    if let Some(category) = source.get("tribunal").and_then(|t| str_field(t, "categoria")) {
        return Some(category);
    }

    let sigla = source
        .get("tribunal")
        .and_then(|t| str_field(t, "sigla"))
        .or_else(|| str_field(source, "sigla"))?
        .to_uppercase();

    let branch = if sigla.starts_with("TRT") || sigla == "TST" {
        "Justiça do Trabalho"
    } else if sigla.starts_with("TRF") || sigla.starts_with("JF") {
        "Justiça Federal"
    } else if sigla.starts_with("TRE") || sigla == "TSE" {
        "Justiça Eleitoral"
    } else if matches!(sigla.as_str(), "TJMSP" | "TJMMG" | "TJMRS" | "STM") {
        "Justiça Militar"
    } else if sigla.starts_with("TJ") {
        "Justiça Estadual"
    } else if sigla == "STF" || sigla == "STJ" {
        "Tribunais Superiores"
    } else {
        return Some(sigla);
    };
    Some(branch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "envolvido_encontrado": {
                "nome": "Maria Silva",
                "tipo_pessoa": "FISICA",
                "quantidade_processos": 12
            },
            "items": [
                {
                    "numero_cnj": "0000001-00.2020.8.26.0100",
                    "fontes": [{
                        "sigla": "TJSP",
                        "tribunal": { "sigla": "TJSP" },
                        "envolvidos": [
                            { "nome": "MARIA SILVA", "polo": "ATIVO" },
                            { "nome": "Banco X", "polo": "PASSIVO" }
                        ]
                    }]
                },
                {
                    "numero_cnj": "0000002-00.2021.5.02.0001",
                    "fontes": [{
                        "tribunal": { "sigla": "TRT2", "categoria": "Justiça do Trabalho" },
                        "envolvidos": [
                            { "nome": "Empresa Y", "polo": "ATIVO" },
                            { "nome": "Maria Silva", "polo": "PASSIVO" }
                        ]
                    }]
                },
                {
                    "numero_cnj": "0000003-00.2022.8.26.0100",
                    "fontes": [{
                        "sigla": "TJSP",
                        "envolvidos": [
                            { "nome": "Outra Pessoa", "cpf": "123.456.789-00", "polo": "PASSIVO" }
                        ]
                    }]
                }
            ],
            "links": { "next": "https://api.example.com/page2" }
        })
    }

    #[test]
    fn declared_count_wins_over_item_count() {
        let records = LegalRecords::from_payload(&payload(), &classify("Maria Silva"), "3".into());
        assert_eq!(records.total, 12);
        assert_eq!(records.items.len(), 3);
        assert!(records.links.is_some());
        assert_eq!(records.credits_used, "3");
    }

    #[test]
    fn falls_back_to_item_count() {
        let body = json!({ "items": [{}, {}] });
        let records = LegalRecords::from_payload(&body, &classify("Maria Silva"), "N/A".into());
        assert_eq!(records.total, 2);
        assert!(records.party.is_none());
        assert!(records.links.is_none());
    }

    #[test]
    fn party_roles_and_branches() {
        let records = LegalRecords::from_payload(&payload(), &classify("Maria Silva"), "1".into());
        let party = records.party.expect("party");
        assert_eq!(party.name, "Maria Silva");
        assert_eq!(party.person_type.as_deref(), Some("FISICA"));
        assert_eq!(party.by_role.get("ATIVO"), Some(&1));
        assert_eq!(party.by_role.get("PASSIVO"), Some(&1));
        assert_eq!(party.by_branch.get("Justiça Estadual"), Some(&2));
        assert_eq!(party.by_branch.get("Justiça do Trabalho"), Some(&1));
    }

    #[test]
    fn document_input_matches_by_digits() {
        let mut body = payload();
        body["envolvido_encontrado"]["nome"] = json!("Outra Pessoa");
        let records =
            LegalRecords::from_payload(&body, &classify("123.456.789-00"), "1".into());
        let party = records.party.expect("party");
        assert_eq!(party.document.as_deref(), Some("12345678900"));
        assert_eq!(party.by_role.get("PASSIVO"), Some(&1));
        assert_eq!(party.by_role.values().sum::<u64>(), 1);
    }

    #[test]
    fn party_list_takes_first() {
        let body = json!({
            "envolvido_encontrado": [
                { "nome": "Primeiro", "quantidade_processos": 4 },
                { "nome": "Segundo", "quantidade_processos": 9 }
            ],
            "items": []
        });
        let records = LegalRecords::from_payload(&body, &classify("x"), "N/A".into());
        assert_eq!(records.total, 4);
        assert_eq!(records.party.map(|p| p.name).as_deref(), Some("Primeiro"));
    }
}

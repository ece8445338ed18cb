//! Pattern and lookup tables driving the extractors.
//!
//! Tuning an extractor means editing these tables; the control flow in the
//! sibling modules does not change. Patterns are compiled once, on first use.

use regex::Regex;

/// Capitalized place name, allowing Portuguese connectors ("Rio de Janeiro").
const PLACE: &str = r"\p{Lu}\p{L}+(?:\s+(?:(?:de|do|da|dos|das)\s+)?\p{Lu}\p{L}+)*";

/// Capitalized organisation name of up to five words.
const ORG: &str = r"\p{Lu}[\p{L}\p{N}&.\-]*(?:\s+(?:(?:de|do|da|dos|das|e|&)\s+)?\p{Lu}[\p{L}\p{N}&.\-]*){0,4}";

/// Brazilian state abbreviations.
const UF: &str = r"(?:AC|AL|AP|AM|BA|CE|DF|ES|GO|MA|MT|MS|MG|PA|PB|PR|PE|PI|RJ|RN|RS|RO|RR|SC|SP|SE|TO)";

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Residency verb followed by a place. Group 1 = place.
pub(crate) fn residence_patterns() -> Vec<String> {
    vec![
        format!(
            r"(?i:mora em|moro em|reside em|residente em|vive em|morador de|moradora de|natural de|radicad[oa] em)\s+({PLACE})"
        ),
        format!(r"(?i:lives in|living in|based in|resides in)\s+({PLACE})"),
    ]
}

/// City followed by a state abbreviation. Group 1 = city, group 2 = state.
pub(crate) fn city_state_patterns() -> Vec<String> {
    vec![format!(r"({PLACE})\s*(?:-|–|,|/)\s*({UF})\b")]
}

/// Major cities matched by case-insensitive substring.
pub(crate) const CITY_GAZETTEER: &[&str] = &[
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Brasília",
    "Salvador",
    "Fortaleza",
    "Curitiba",
    "Recife",
    "Porto Alegre",
    "Manaus",
    "Belém",
    "Goiânia",
    "Campinas",
    "Florianópolis",
    "São Luís",
    "Maceió",
    "João Pessoa",
    "Teresina",
    "Cuiabá",
    "Campo Grande",
    "Niterói",
    "Ribeirão Preto",
];

// ---------------------------------------------------------------------------
// Employer
// ---------------------------------------------------------------------------

/// Role title, optional department, preposition, organisation. Group 1 = org.
pub(crate) fn role_employer_patterns() -> Vec<String> {
    vec![format!(
        r"(?:CEO|CTO|CFO|COO|(?i:diretora?|gerente|coordenadora?|analista|engenheir[oa]|advogad[oa]|s[óo]ci[oa]|fundadora?|cofundadora?|co-fundadora?|presidente|consultora?|supervisora?|professora?|m[ée]dic[oa]|manager|director|engineer|founder|head))(?:\s+(?i:de)\s+\p{{L}}+)?\s+(?i:na|no|da|do|em|at|of)\s+({ORG})"
    )]
}

/// "Works at/for" phrasing. Group 1 = org.
pub(crate) fn works_at_patterns() -> Vec<String> {
    vec![
        format!(
            r"(?i:trabalha (?:na|no|em|para)|trabalhou (?:na|no|em|para)|atua (?:na|no|em)|colaboradora? (?:da|do))\s+({ORG})"
        ),
        format!(r"(?i:works (?:at|for)|worked (?:at|for)|employed (?:at|by))\s+({ORG})"),
    ]
}

/// Name ending in a legal-entity suffix. Group 1 = full name with suffix.
pub(crate) fn entity_suffix_patterns() -> Vec<String> {
    vec![format!(
        r"(\p{{Lu}}[\p{{L}}\p{{N}}&\-]*(?:\s+\p{{Lu}}[\p{{L}}\p{{N}}&\-]*){{0,4}}\s+(?:Ltda\.?|LTDA|S/A|S\.A\.?|SA|EIRELI|ME|Inc\.?|LLC|Corp\.?))(?:\W|$)"
    )]
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// "45 anos" / "45 years old". Group 1 = age.
pub(crate) const DIRECT_AGE_PATTERNS: &[&str] = &[r"\b(\d{1,3})\s*(?i:anos|years old|years|yo)\b"];

/// "idade: 45" / "age 45". Group 1 = age.
pub(crate) const EXPLICIT_AGE_PATTERNS: &[&str] = &[r"\b(?i:idade|age)\s*[:=]?\s*(\d{1,3})\b"];

/// Birth statement followed by a four-digit year. Group 1 = year.
pub(crate) const BIRTH_YEAR_PATTERNS: &[&str] =
    &[r"(?i:nascid[oa]|nasceu|nascimento|born)[^\n]{0,40}?\b(\d{4})\b"];

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

/// Known news outlets, matched as URL substrings.
pub(crate) const NEWS_DOMAINS: &[&str] = &[
    "g1.globo.com",
    "oglobo.globo.com",
    "valor.globo.com",
    "folha.uol.com.br",
    "noticias.uol.com.br",
    "estadao.com.br",
    "veja.abril.com.br",
    "cnnbrasil.com.br",
    "r7.com",
    "terra.com.br",
    "metropoles.com",
    "exame.com",
    "correiobraziliense.com.br",
    "gazetadopovo.com.br",
    "band.uol.com.br",
    "istoe.com.br",
    "cartacapital.com.br",
    "bbc.com",
];

/// Generic news markers, matched as URL substrings.
pub(crate) const NEWS_KEYWORDS: &[&str] =
    &["noticia", "news", "jornal", "/materia", "reportagem", "imprensa"];

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Compile a pattern table. Tables are static, so a bad pattern is a bug.
pub(crate) fn compile<S: AsRef<str>>(patterns: &[S]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p.as_ref()).expect("extractor pattern"))
        .collect()
}

//! Placeholder hits for running without a live search provider.
//!
//! Every hit built here carries `simulated = true` and points at a
//! reserved example domain, so it can never pass for live data.

use personscope_shared::{Category, SearchHit};

/// Fixed placeholder templates: (path, title suffix, snippet).
const TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "perfil",
        "perfil profissional",
        "Resultado simulado: nenhum provedor de busca configurado.",
    ),
    (
        "noticias",
        "menções na imprensa",
        "Resultado simulado para demonstração do fluxo de busca.",
    ),
    (
        "registro",
        "registros públicos",
        "Resultado simulado; configure a chave de busca para dados reais.",
    ),
];

/// Build up to `num` flagged placeholder hits for `text`.
pub fn placeholder_hits(text: &str, num: u32) -> Vec<SearchHit> {
    let label = text.replace('"', "");
    let label = label.trim();
    let slug: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();

    TEMPLATES
        .iter()
        .take(num as usize)
        .map(|(path, title, snippet)| SearchHit {
            url: format!("https://example.com/simulado/{path}/{slug}"),
            title: format!("{label} - {title}"),
            snippet: (*snippet).to_string(),
            category: Category::General,
            simulated: true,
        })
        .collect()
}

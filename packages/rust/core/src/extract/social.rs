//! Social-profile heuristic: first matching profile per platform.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use personscope_shared::{Category, SearchHit};

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linkedin,
    Instagram,
    Facebook,
    Twitter,
}

/// Static description of one platform.
pub struct PlatformSpec {
    pub platform: Platform,
    /// Battery category whose hits are scanned.
    pub category: Category,
    /// Hosts serving profiles on this platform; subdomains match too.
    pub domains: &'static [&'static str],
    /// Path prefix of a personal profile, when the host also serves other pages.
    pub path_prefix: Option<&'static str>,
    pub icon: &'static str,
}

/// Platforms in battery order.
pub const PLATFORMS: &[PlatformSpec] = &[
    PlatformSpec {
        platform: Platform::Linkedin,
        category: Category::Linkedin,
        domains: &["linkedin.com"],
        path_prefix: Some("/in/"),
        icon: "💼",
    },
    PlatformSpec {
        platform: Platform::Instagram,
        category: Category::Instagram,
        domains: &["instagram.com"],
        path_prefix: None,
        icon: "📸",
    },
    PlatformSpec {
        platform: Platform::Facebook,
        category: Category::Facebook,
        domains: &["facebook.com"],
        path_prefix: None,
        icon: "👥",
    },
    PlatformSpec {
        platform: Platform::Twitter,
        category: Category::Twitter,
        domains: &["twitter.com", "x.com"],
        path_prefix: None,
        icon: "🐦",
    },
];

/// A profile link found for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialProfile {
    pub platform: Platform,
    pub icon: &'static str,
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl PlatformSpec {
    /// Whether `url` points at a profile on this platform.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url) else {
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let on_domain = self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|sub| sub.ends_with('.'))
        });
        on_domain
            && self
                .path_prefix
                .is_none_or(|prefix| url.path().to_ascii_lowercase().starts_with(prefix))
    }
}

/// First profile per platform, among hits tagged with that platform's category.
pub fn extract_social_profiles(hits: &[SearchHit]) -> BTreeMap<Platform, SocialProfile> {
    PLATFORMS
        .iter()
        .filter_map(|spec| {
            let hit = hits.iter().find(|hit| {
                hit.category == spec.category && spec.matches(&hit.url)
            })?;
            Some((
                spec.platform,
                SocialProfile {
                    platform: spec.platform,
                    icon: spec.icon,
                    url: hit.url.clone(),
                    title: hit.title.clone(),
                    snippet: hit.snippet.clone(),
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(url: &str, category: Category) -> SearchHit {
        SearchHit {
            url: url.into(),
            title: format!("title {url}"),
            snippet: String::new(),
            category,
            simulated: false,
        }
    }

    #[test]
    fn first_match_per_platform() {
        let hits = [
            tagged("https://br.linkedin.com/in/ana-souza", Category::Linkedin),
            tagged("https://br.linkedin.com/in/ana-souza-2", Category::Linkedin),
            tagged("https://x.com/anasouza", Category::Twitter),
            tagged("https://www.instagram.com/anasouza", Category::Instagram),
        ];
        let profiles = extract_social_profiles(&hits);

        assert_eq!(profiles.len(), 3);
        assert_eq!(
            profiles[&Platform::Linkedin].url,
            "https://br.linkedin.com/in/ana-souza"
        );
        assert_eq!(profiles[&Platform::Twitter].url, "https://x.com/anasouza");
        assert_eq!(profiles[&Platform::Twitter].icon, "🐦");
        assert!(!profiles.contains_key(&Platform::Facebook));
    }

    #[test]
    fn category_must_match() {
        // A LinkedIn URL that surfaced first under the general query is not a
        // LinkedIn-category hit.
        let hits = [tagged("https://linkedin.com/in/ana", Category::General)];
        assert!(extract_social_profiles(&hits).is_empty());
    }

    #[test]
    fn domain_must_match() {
        let hits = [tagged("https://example.com/ana", Category::Facebook)];
        assert!(extract_social_profiles(&hits).is_empty());
    }

    #[test]
    fn linkedin_requires_personal_profile_path() {
        let hits = [
            tagged("https://www.linkedin.com/company/natura", Category::Linkedin),
            tagged("https://www.linkedin.com/jobs/view/123", Category::Linkedin),
        ];
        assert!(extract_social_profiles(&hits).is_empty());

        let hits = [
            tagged("https://www.linkedin.com/company/natura", Category::Linkedin),
            tagged("https://br.linkedin.com/in/ana-souza", Category::Linkedin),
        ];
        let profiles = extract_social_profiles(&hits);
        assert_eq!(
            profiles[&Platform::Linkedin].url,
            "https://br.linkedin.com/in/ana-souza"
        );
    }

    #[test]
    fn host_must_be_the_platform_domain() {
        let hits = [
            tagged("https://www.linux.com/ana", Category::Twitter),
            tagged("https://ana.wix.com/perfil", Category::Twitter),
            tagged("https://example.com/?ref=x.com/ana", Category::Twitter),
            tagged("https://notfacebook.com/ana", Category::Facebook),
        ];
        assert!(extract_social_profiles(&hits).is_empty());

        let hits = [tagged("https://mobile.x.com/ana", Category::Twitter)];
        assert_eq!(
            extract_social_profiles(&hits)[&Platform::Twitter].url,
            "https://mobile.x.com/ana"
        );
    }

    #[test]
    fn unparseable_url_is_skipped() {
        let hits = [tagged("instagram.com/ana", Category::Instagram)];
        assert!(extract_social_profiles(&hits).is_empty());
    }

    #[test]
    fn twitter_legacy_domain() {
        let hits = [tagged("https://twitter.com/ana", Category::Twitter)];
        let profiles = extract_social_profiles(&hits);
        assert_eq!(profiles[&Platform::Twitter].title, "title https://twitter.com/ana");
    }
}

//! Social platforms and the link normalizer.
//!
//! Every supported platform has a fixed URL prefix; a user's raw handle or
//! number is appended verbatim to build the outbound link. Handles are not
//! validated or re-encoded, so odd input produces an odd (but well-formed)
//! URL rather than an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A supported social/contact channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Facebook,
    Tiktok,
    Linkedin,
    Whatsapp,
    Youtube,
    Snapchat,
    Threads,
    Twitter,
    Twitch,
    Telegram,
    Clubhouse,
}

/// Static descriptor for a [`Platform`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlatformDef {
    pub platform: Platform,
    pub id: u8,
    pub name: &'static str,
    /// Storage field key, e.g. `instagram_username`.
    pub field: &'static str,
    pub icon: &'static str,
    /// Everything before the handle.
    pub url_prefix: &'static str,
}

/// The fixed platform catalogue, in display order.
pub const PLATFORMS: [PlatformDef; 12] = [
    PlatformDef {
        platform: Platform::Instagram,
        id: 1,
        name: "Instagram",
        field: "instagram_username",
        icon: "instagram",
        url_prefix: "https://instagram.com/",
    },
    PlatformDef {
        platform: Platform::Facebook,
        id: 2,
        name: "Facebook",
        field: "facebook_username",
        icon: "facebook",
        url_prefix: "https://facebook.com/",
    },
    PlatformDef {
        platform: Platform::Tiktok,
        id: 3,
        name: "TikTok",
        field: "tiktok_username",
        icon: "tiktok",
        url_prefix: "https://tiktok.com/@",
    },
    PlatformDef {
        platform: Platform::Linkedin,
        id: 4,
        name: "LinkedIn",
        field: "linkedin_username",
        icon: "linkedin",
        url_prefix: "https://linkedin.com/in/",
    },
    PlatformDef {
        platform: Platform::Whatsapp,
        id: 5,
        name: "WhatsApp",
        field: "whatsapp_number",
        icon: "whatsapp",
        url_prefix: "https://wa.me/",
    },
    PlatformDef {
        platform: Platform::Youtube,
        id: 6,
        name: "YouTube",
        field: "youtube_username",
        icon: "youtube",
        url_prefix: "https://youtube.com/@",
    },
    PlatformDef {
        platform: Platform::Snapchat,
        id: 7,
        name: "Snapchat",
        field: "snapchat_username",
        icon: "snapchat",
        url_prefix: "https://snapchat.com/add/",
    },
    PlatformDef {
        platform: Platform::Threads,
        id: 8,
        name: "Threads",
        field: "threads_username",
        icon: "threads",
        url_prefix: "https://www.threads.net/@",
    },
    PlatformDef {
        platform: Platform::Twitter,
        id: 9,
        name: "X",
        field: "twitter_username",
        icon: "twitter",
        url_prefix: "https://x.com/",
    },
    PlatformDef {
        platform: Platform::Twitch,
        id: 10,
        name: "Twitch",
        field: "twitch_username",
        icon: "twitch",
        url_prefix: "https://twitch.tv/",
    },
    PlatformDef {
        platform: Platform::Telegram,
        id: 11,
        name: "Telegram",
        field: "telegram_username",
        icon: "telegram",
        url_prefix: "https://t.me/",
    },
    PlatformDef {
        platform: Platform::Clubhouse,
        id: 12,
        name: "Clubhouse",
        field: "clubhouse_username",
        icon: "clubhouse",
        url_prefix: "https://www.clubhouse.com/@",
    },
];

impl Platform {
    pub fn def(self) -> &'static PlatformDef {
        // PLATFORMS is declared in enum order.
        &PLATFORMS[self as usize]
    }

    /// Resolve a storage field key such as `whatsapp_number`.
    pub fn from_field(field: &str) -> Option<Self> {
        PLATFORMS
            .iter()
            .find(|def| def.field == field)
            .map(|def| def.platform)
    }

    /// Like [`Platform::from_field`] but rejects unknown keys.
    pub fn parse_field(field: &str) -> Result<Self, CoreError> {
        Self::from_field(field).ok_or_else(|| {
            CoreError::Validation(format!("Unknown social platform field '{field}'"))
        })
    }
}

/// Canonical outbound URL per platform, keyed by platform.
pub type SocialLinks = BTreeMap<Platform, String>;

/// Build the canonical URL for `raw` on `platform`.
///
/// Returns `None` when the trimmed input is empty.
pub fn normalize_link(platform: Platform, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{}{trimmed}", platform.def().url_prefix))
}

/// Recover the handle from a canonical link, for re-displaying saved links.
pub fn handle_from_link(platform: Platform, url: &str) -> Option<&str> {
    url.strip_prefix(platform.def().url_prefix)
        .filter(|handle| !handle.is_empty())
}

/// Normalize a set of raw handles keyed by storage field.
///
/// Empty handles are dropped; unknown field keys are a validation error.
pub fn normalize_all<'a, I>(handles: I) -> Result<SocialLinks, CoreError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut links = SocialLinks::new();
    for (field, raw) in handles {
        let platform = Platform::parse_field(field)?;
        if let Some(url) = normalize_link(platform, raw) {
            links.insert(platform, url);
        }
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_in_enum_order() {
        for (i, def) in PLATFORMS.iter().enumerate() {
            assert_eq!(def.platform as usize, i);
            assert_eq!(def.id as usize, i + 1);
            assert_eq!(def.platform.def().field, def.field);
        }
    }

    #[test]
    fn from_field_resolves_every_platform() {
        for def in &PLATFORMS {
            assert_eq!(Platform::from_field(def.field), Some(def.platform));
        }
        assert_eq!(Platform::from_field("myspace_username"), None);
        assert!(Platform::parse_field("myspace_username").is_err());
    }

    #[test]
    fn instagram_handle_is_appended() {
        assert_eq!(
            normalize_link(Platform::Instagram, "jane.doe").as_deref(),
            Some("https://instagram.com/jane.doe")
        );
    }

    #[test]
    fn whatsapp_number_uses_wa_me() {
        assert_eq!(
            normalize_link(Platform::Whatsapp, " 61400111222 ").as_deref(),
            Some("https://wa.me/61400111222")
        );
    }

    #[test]
    fn at_prefixed_platforms() {
        assert_eq!(
            normalize_link(Platform::Tiktok, "jane").as_deref(),
            Some("https://tiktok.com/@jane")
        );
        assert_eq!(
            normalize_link(Platform::Threads, "jane").as_deref(),
            Some("https://www.threads.net/@jane")
        );
    }

    #[test]
    fn blank_input_yields_none_for_every_platform() {
        for def in &PLATFORMS {
            assert_eq!(normalize_link(def.platform, "  "), None);
            assert_eq!(normalize_link(def.platform, ""), None);
        }
    }

    #[test]
    fn output_is_prefix_plus_trimmed_input_verbatim() {
        let inputs = ["jane", "  jane.doe  ", "a b/c?d=e", "ünïcødé", "@already"];
        for def in &PLATFORMS {
            for input in inputs {
                let url = normalize_link(def.platform, input).expect("non-empty input");
                assert!(url.starts_with(def.url_prefix));
                assert!(url.ends_with(input.trim()));
                assert_eq!(url.len(), def.url_prefix.len() + input.trim().len());
            }
        }
    }

    #[test]
    fn handle_is_recovered_from_link() {
        let url = normalize_link(Platform::Linkedin, "jane-doe").unwrap();
        assert_eq!(handle_from_link(Platform::Linkedin, &url), Some("jane-doe"));
        assert_eq!(handle_from_link(Platform::Twitch, &url), None);
        assert_eq!(handle_from_link(Platform::Twitch, "https://twitch.tv/"), None);
    }

    #[test]
    fn normalize_all_skips_blank_and_rejects_unknown() {
        let links = normalize_all([
            ("instagram_username", "jane"),
            ("facebook_username", " "),
            ("whatsapp_number", "123"),
        ])
        .unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[&Platform::Whatsapp], "https://wa.me/123");
        assert!(!links.contains_key(&Platform::Facebook));

        assert!(normalize_all([("orkut_username", "jane")]).is_err());
    }
}

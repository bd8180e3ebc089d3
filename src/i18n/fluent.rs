// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::{langid, LanguageIdentifier};

const DEFAULT_LOCALE: LanguageIdentifier = langid!("en-US");

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                tracing::warn!(file = filename, "skipping translation with invalid locale name");
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    tracing::warn!(file = filename, errors = errors.len(), "translation has syntax errors");
                    resource
                }
            };

            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Unicode isolation marks render as boxes in Iced text.
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = filename, errors = errors.len(), "duplicate translation keys");
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(DEFAULT_LOCALE);
        tracing::debug!(locale = %current_locale, "resolved UI locale");

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key`, substituting Fluent variables.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn parse_available(raw: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = raw.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "ru-RU" from the OS should still pick the "ru" bundle.
    available
        .iter()
        .find(|candidate| candidate.language == lang.language)
        .cloned()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang) = cli_lang
        .as_deref()
        .and_then(|raw| parse_available(raw, available))
    {
        return Some(lang);
    }

    // 2. Check config file
    if let Some(lang) = config
        .general
        .language
        .as_deref()
        .and_then(|raw| parse_available(raw, available))
    {
        return Some(lang);
    }

    // 3. Check OS locale
    sys_locale::get_locale().and_then(|raw| parse_available(&raw, available))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use unic_langid::LanguageIdentifier;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "ru".parse().unwrap()]
    }

    #[test]
    fn test_resolve_locale_cli() {
        let config = Config::default();
        let lang = resolve_locale(Some("ru".to_string()), &config, &available());
        assert_eq!(lang, Some("ru".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_config() {
        let mut config = Config::default();
        config.general.language = Some("ru".to_string());
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("ru".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_cli_beats_config() {
        let mut config = Config::default();
        config.general.language = Some("ru".to_string());
        let lang = resolve_locale(Some("en-US".to_string()), &config, &available());
        assert_eq!(lang, Some("en-US".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_matches_language_only() {
        let config = Config::default();
        let lang = resolve_locale(Some("ru-RU".to_string()), &config, &available());
        assert_eq!(lang, Some("ru".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_default() {
        let config = Config::default();
        let lang = resolve_locale(None, &config, &available());
        // Depends on the host locale.
        if let Some(l) = lang {
            assert!(available().contains(&l));
        }
    }

    #[test]
    fn embedded_bundles_are_loaded() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert!(i18n.available_locales.contains(&"en-US".parse().unwrap()));
        assert!(i18n.available_locales.contains(&"ru".parse().unwrap()));
        assert_eq!(i18n.tr("search-button"), "Search");
    }

    #[test]
    fn unknown_key_is_marked_missing() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn arguments_are_substituted_without_isolation_marks() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(
            i18n.tr_with_args("preview-by", &[("author", FluentValue::from("Ann"))]),
            "Photo by Ann"
        );
        assert_eq!(
            i18n.tr_with_args("results-count", &[("count", FluentValue::from(1))]),
            "1 image"
        );
        assert_eq!(
            i18n.tr_with_args("results-count", &[("count", FluentValue::from(90))]),
            "90 images"
        );
    }

    #[test]
    fn russian_error_messages_are_translated() {
        let i18n = I18n::new(Some("ru".to_string()), &Config::default());
        assert_ne!(i18n.tr("error-rate-limit"), "MISSING: error-rate-limit");
        assert_ne!(i18n.tr("error-rate-limit"), i18n_en().tr("error-rate-limit"));
    }

    fn i18n_en() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }
}

//! Internationalization and localization.

use crate::{
    LazyLock, SharedString, bail, error::Error, extension::TomlTableExt, state::State, warn,
};
use fluent::{FluentResource, bundle::FluentBundle};
use intl_memoizer::concurrent::IntlLangMemoizer;
use std::{fs, io::ErrorKind, path::Path};

pub use fluent::FluentArgs;
pub use unic_langid::LanguageIdentifier;

/// Bundled FTL resources.
const BUNDLED_RESOURCES: [(&str, &str); 2] = [
    ("en-US", include_str!("../../locale/en-US.ftl")),
    ("es-ES", include_str!("../../locale/es-ES.ftl")),
];

/// Translation type.
type Translation = FluentBundle<FluentResource, IntlLangMemoizer>;

/// A set of localization bundles with a default locale.
pub struct Localization {
    /// Bundles for the supported locales.
    bundles: Vec<(LanguageIdentifier, Translation)>,
    /// Default locale.
    default_locale: LanguageIdentifier,
}

impl Localization {
    /// Creates a new instance without any resources.
    pub fn new(default_locale: &str) -> Result<Self, Error> {
        let default_locale = default_locale
            .parse::<LanguageIdentifier>()
            .map_err(|err| Error::with_source(format!("invalid locale `{default_locale}`"), err))?;
        Ok(Self {
            bundles: Vec::new(),
            default_locale,
        })
    }

    /// Creates a new instance with the bundled `en-US` and `es-ES` resources.
    pub fn with_bundled_resources(default_locale: &str) -> Result<Self, Error> {
        let mut localization = Self::new(default_locale)?;
        for (locale, ftl_string) in BUNDLED_RESOURCES {
            localization.add_resource(locale, ftl_string.to_owned())?;
        }
        Ok(localization)
    }

    /// Adds an FTL resource for the locale.
    /// Messages of a later resource override the existing ones.
    pub fn add_resource(&mut self, locale: &str, ftl_string: String) -> Result<(), Error> {
        let lang_id = locale
            .parse::<LanguageIdentifier>()
            .map_err(|err| Error::with_source(format!("invalid locale `{locale}`"), err))?;
        let resource = FluentResource::try_new(ftl_string)
            .map_err(|(_, errors)| warn!("fail to parse the FTL string for `{}`: {:?}", locale, errors))?;
        if let Some((_, bundle)) = self.bundles.iter_mut().find(|(id, _)| id == &lang_id) {
            bundle.add_resource_overriding(resource);
        } else {
            let mut bundle = FluentBundle::new_concurrent(vec![lang_id.clone()]);
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                bail!("fail to add FTL resources for `{}`: {:?}", locale, errors);
            }
            self.bundles.push((lang_id, bundle));
        }
        Ok(())
    }

    /// Loads the `*.ftl` files in the directory. A missing directory is not an error.
    pub fn load_dir(&mut self, locale_dir: &Path) -> Result<(), Error> {
        let entries = match fs::read_dir(locale_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let locale_file = entry?.path();
            if locale_file.extension().and_then(|s| s.to_str()) != Some("ftl") {
                continue;
            }
            if let Some(locale) = locale_file.file_stem().and_then(|s| s.to_str()) {
                let ftl_string = fs::read_to_string(&locale_file)?;
                self.add_resource(locale, ftl_string)?;
                tracing::info!(locale, "`{}` loaded", locale_file.display());
            }
        }
        Ok(())
    }

    /// Returns the default locale.
    #[inline]
    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    /// Selects a language from the supported locales
    /// according to the `Accept-Language` header value.
    pub fn select_language(&self, accepted_languages: &str) -> Option<LanguageIdentifier> {
        let mut languages = accepted_languages
            .split(',')
            .filter_map(|s| {
                let (language, quality) = if let Some((language, quality)) = s.split_once(';') {
                    let quality = quality.trim().strip_prefix("q=")?.parse::<f32>().ok()?;
                    (language.trim(), quality)
                } else {
                    (s.trim(), 1.0)
                };
                let lang_id = language.parse::<LanguageIdentifier>().ok()?;
                self.bundles.iter().find_map(|(id, _)| {
                    (id == &lang_id || id.language == lang_id.language)
                        .then(|| (id.clone(), quality))
                })
            })
            .collect::<Vec<_>>();
        languages.sort_by(|a, b| b.1.total_cmp(&a.1));
        languages.into_iter().next().map(|(language, _)| language)
    }

    /// Translates the localization message.
    pub fn translate(
        &self,
        locale: &LanguageIdentifier,
        message: &str,
        args: Option<FluentArgs<'_>>,
    ) -> Result<SharedString, Error> {
        let bundle = self
            .bundles
            .iter()
            .find_map(|(lang_id, bundle)| (lang_id == locale).then_some(bundle))
            .or_else(|| {
                let lang = locale.language;
                self.bundles
                    .iter()
                    .find_map(|(lang_id, bundle)| (lang_id.language == lang).then_some(bundle))
            })
            .or_else(|| {
                self.bundles
                    .iter()
                    .find_map(|(lang_id, bundle)| (lang_id == &self.default_locale).then_some(bundle))
            })
            .ok_or_else(|| warn!("localization bundle does not exist for `{}`", locale))?;
        let pattern = bundle
            .get_message(message)
            .ok_or_else(|| warn!("fail to get the localization message for `{}`", message))?
            .value()
            .ok_or_else(|| warn!("fail to retrieve the pattern for `{}`", message))?;

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args.as_ref(), &mut errors);
        if errors.is_empty() {
            Ok(value.into_owned().into())
        } else {
            bail!("fail to format the message `{}`: {:?}", message, errors);
        }
    }
}

/// A namespace for the shared localization.
#[derive(Debug, Clone, Copy)]
pub struct Intl;

impl Intl {
    /// Returns the default locale.
    #[inline]
    pub fn default_locale() -> &'static LanguageIdentifier {
        SHARED_LOCALIZATION.default_locale()
    }

    /// Translates the localization message with the shared bundles.
    #[inline]
    pub fn translate(
        locale: &LanguageIdentifier,
        message: &str,
        args: Option<FluentArgs<'_>>,
    ) -> Result<SharedString, Error> {
        SHARED_LOCALIZATION.translate(locale, message, args)
    }

    /// Translates the message for the locale, falling back to the supplied text
    /// if the translation is not available.
    pub fn translate_or(
        locale: &LanguageIdentifier,
        message: &str,
        fallback: &'static str,
    ) -> SharedString {
        Self::translate(locale, message, None).unwrap_or(SharedString::Borrowed(fallback))
    }
}

/// Shared localization with the bundled resources and
/// the `*.ftl` files in the `locale` directory of the config.
static SHARED_LOCALIZATION: LazyLock<Localization> = LazyLock::new(|| {
    let default_locale = State::shared()
        .get_config("i18n")
        .and_then(|config| config.get_str("default-locale"))
        .unwrap_or("en-US");
    let mut localization = Localization::with_bundled_resources(default_locale)
        .or_else(|err| {
            tracing::error!("{err}; the `en-US` locale is used");
            Localization::with_bundled_resources("en-US")
        })
        .expect("fail to create the bundled localization");
    if let Err(err) = localization.load_dir(&State::config_dir().join("locale")) {
        tracing::error!("fail to load the locale directory: {err}");
    }
    localization
});

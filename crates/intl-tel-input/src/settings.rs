//! Settings of the field from the `[int-tel-input]` table of the config.

use intl_tel_core::{
    Map,
    extension::{JsonObjectExt, TomlTableExt},
    i18n::{Intl, LanguageIdentifier},
    state::State,
    validation::PhoneNumberValidator,
};
use phonenumber::country::Id;
use toml::value::Table;

/// Default region for numbers without a dial code.
pub const DEFAULT_REGION: Id = Id::EC;

/// Source of the default region used by the field validator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RegionSource {
    /// Always use the configured default region.
    #[default]
    Fixed,
    /// Use the `initial-country` editor setting of the field when it is a region code,
    /// falling back to the configured default region.
    InitialCountry,
}

impl RegionSource {
    /// Parses the config value: `fixed` | `initial-country`.
    #[inline]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(Self::Fixed),
            "initial-country" => Some(Self::InitialCountry),
            _ => None,
        }
    }

    /// Returns `self` as `&'static str`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::InitialCountry => "initial-country",
        }
    }
}

/// Settings of the international telephone input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    /// Default region.
    default_region: Id,
    /// Source of the default region.
    region_source: RegionSource,
    /// Base URL of the static assets.
    assets_url: String,
    /// Locale set explicitly by the operator.
    locale: Option<LanguageIdentifier>,
}

impl FieldSettings {
    /// Creates a new instance with the default settings.
    #[inline]
    pub fn new() -> Self {
        Self {
            default_region: DEFAULT_REGION,
            region_source: RegionSource::Fixed,
            assets_url: String::new(),
            locale: None,
        }
    }

    /// Creates a new instance from the `[int-tel-input]` table of the state config.
    pub fn from_state(state: &State) -> Self {
        let mut settings = Self::new();
        if let Some(config) = state.get_config("int-tel-input") {
            settings.apply_config(config);
        }
        settings
    }

    /// Applies the config table. Invalid values are ignored with a warning.
    pub fn apply_config(&mut self, config: &Table) {
        if let Some(region) = config.get_str("default-region") {
            if let Some(region) = PhoneNumberValidator::parse_region(region) {
                self.default_region = region;
            } else {
                tracing::warn!(region, "unsupported default region; `EC` is used");
            }
        }
        if let Some(source) = config.get_str("region-source") {
            if let Some(source) = RegionSource::parse(source) {
                self.region_source = source;
            } else {
                tracing::warn!(source, "unsupported region source; `fixed` is used");
            }
        }
        if let Some(assets_url) = config.get_str("assets-url") {
            self.assets_url = assets_url.to_owned();
        }
        if let Some(locale) = config.get_str("locale") {
            self.set_locale(locale);
        }
    }

    /// Sets the default region.
    #[inline]
    pub fn set_default_region(&mut self, region: Id) {
        self.default_region = region;
    }

    /// Sets the source of the default region.
    #[inline]
    pub fn set_region_source(&mut self, source: RegionSource) {
        self.region_source = source;
    }

    /// Sets the base URL of the static assets.
    #[inline]
    pub fn set_assets_url(&mut self, assets_url: impl Into<String>) {
        self.assets_url = assets_url.into();
    }

    /// Sets the locale. An invalid locale is ignored with a warning.
    pub fn set_locale(&mut self, locale: &str) {
        match locale.parse() {
            Ok(locale) => self.locale = Some(locale),
            Err(err) => tracing::warn!(locale, "invalid locale: {err}"),
        }
    }

    /// Returns the default region.
    #[inline]
    pub fn default_region(&self) -> Id {
        self.default_region
    }

    /// Returns the source of the default region.
    #[inline]
    pub fn region_source(&self) -> RegionSource {
        self.region_source
    }

    /// Returns the base URL of the static assets.
    #[inline]
    pub fn assets_url(&self) -> &str {
        &self.assets_url
    }

    /// Returns the locale of the control labels,
    /// which defaults to the locale of the shared localization.
    #[inline]
    pub fn locale(&self) -> &LanguageIdentifier {
        self.locale.as_ref().unwrap_or_else(|| Intl::default_locale())
    }

    /// Returns the locale set by `[int-tel-input] locale`, if any.
    #[inline]
    pub fn explicit_locale(&self) -> Option<&LanguageIdentifier> {
        self.locale.as_ref()
    }

    /// Resolves the region used to parse a candidate of the field.
    pub fn resolve_region(&self, field_settings: &Map) -> Id {
        if self.region_source == RegionSource::InitialCountry {
            if let Some(region) = field_settings
                .parse_string("initial-country")
                .and_then(PhoneNumberValidator::parse_region)
            {
                return region;
            }
        }
        self.default_region
    }

    /// Returns the URL of an asset path.
    pub fn asset_url(&self, path: &str) -> String {
        let base_url = self.assets_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if base_url.is_empty() {
            path.to_owned()
        } else {
            [base_url, path].join("/")
        }
    }
}

impl Default for FieldSettings {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldSettings, RegionSource};
    use intl_tel_core::{
        Map,
        extension::JsonObjectExt,
        i18n::Intl,
        state::{Env, State},
    };
    use phonenumber::country::Id;

    #[test]
    fn it_uses_default_settings() {
        let settings = FieldSettings::from_state(&State::new(Env::Dev));
        assert_eq!(settings.default_region(), Id::EC);
        assert_eq!(settings.region_source(), RegionSource::Fixed);
        assert_eq!(settings.locale(), Intl::default_locale());
        assert!(settings.explicit_locale().is_none());
        assert_eq!(settings.asset_url("assets/js/utils.js"), "assets/js/utils.js");
    }

    #[test]
    fn it_reads_settings_from_config() {
        let source = r#"
            [i18n]
            default-locale = "es-ES"

            [int-tel-input]
            default-region = "es"
            region-source = "initial-country"
            assets-url = "https://cdn.example.com/plugins/int-tel-input/"
        "#;
        let state = State::from_toml_str(Env::Prod, source).unwrap();
        let settings = FieldSettings::from_state(&state);
        assert_eq!(settings.default_region(), Id::ES);
        assert_eq!(settings.region_source(), RegionSource::InitialCountry);
        assert!(settings.explicit_locale().is_none());
        assert_eq!(
            settings.asset_url("/assets/js/utils.js"),
            "https://cdn.example.com/plugins/int-tel-input/assets/js/utils.js"
        );
    }

    #[test]
    fn it_ignores_invalid_settings() {
        let source = r#"
            [int-tel-input]
            default-region = "ecuador"
            region-source = "per-field"
        "#;
        let state = State::from_toml_str(Env::Dev, source).unwrap();
        let settings = FieldSettings::from_state(&state);
        assert_eq!(settings.default_region(), Id::EC);
        assert_eq!(settings.region_source(), RegionSource::Fixed);
    }

    #[test]
    fn it_reads_the_explicit_locale() {
        let source = r#"
            [int-tel-input]
            locale = "es-ES"
        "#;
        let state = State::from_toml_str(Env::Dev, source).unwrap();
        let settings = FieldSettings::from_state(&state);
        let locale = settings.explicit_locale().map(|locale| locale.to_string());
        assert_eq!(locale.as_deref(), Some("es-ES"));
        assert_eq!(settings.locale().to_string(), "es-ES");

        let mut settings = FieldSettings::new();
        settings.set_locale("not a locale!");
        assert!(settings.explicit_locale().is_none());
    }

    #[test]
    fn it_resolves_regions() {
        let mut field_settings = Map::from_entry("initial-country", "es");
        let mut settings = FieldSettings::new();
        assert_eq!(settings.resolve_region(&field_settings), Id::EC);

        settings.set_region_source(RegionSource::InitialCountry);
        assert_eq!(settings.resolve_region(&field_settings), Id::ES);

        field_settings.upsert("initial-country", "auto");
        assert_eq!(settings.resolve_region(&field_settings), Id::EC);
        assert_eq!(settings.resolve_region(&Map::new()), Id::EC);
    }
}

//! Scripts and styles the field depends on.

use crate::settings::FieldSettings;
use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

/// Handle of the widget script.
pub const SCRIPT_HANDLE: &str = "int-tel-input-script-handle";

/// Handle of the widget init script.
pub const INIT_SCRIPT_HANDLE: &str = "int-tel-input-init-script-handle";

/// Handle of the widget stylesheet.
pub const STYLE_HANDLE: &str = "int-tel-input-style-handle";

/// Handle of the form theme stylesheet.
pub const THEME_STYLE_HANDLE: &str = "bmg-int-tel-input-style-handle";

/// Path of the widget script.
pub const SCRIPT_PATH: &str = "assets/js/intlTelInput.min.js";

/// Path of the widget init script.
pub const INIT_SCRIPT_PATH: &str = "assets/js/intl-tel-input-init.js";

/// Path of the widget utils script.
pub const UTILS_SCRIPT_PATH: &str = "assets/js/utils.js";

/// Path of the widget stylesheet.
pub const STYLE_PATH: &str = "assets/css/intlTelInput.min.css";

/// Path of the form theme stylesheet.
pub const THEME_STYLE_PATH: &str = "assets/css/bmg-efit.css";

/// Source of the widget init script.
///
/// It reads the options from the `data-intl-tel-input` attribute of each input.
pub const INIT_SCRIPT: &str = include_str!("../assets/js/intl-tel-input-init.js");

/// Kind of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// JavaScript.
    Script,
    /// Stylesheet.
    Style,
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Kind.
    kind: AssetKind,
    /// URL.
    url: String,
    /// Handles of the dependencies.
    deps: Vec<&'static str>,
}

impl Asset {
    /// Returns the kind.
    #[inline]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Returns the URL.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the handles of the dependencies.
    #[inline]
    pub fn deps(&self) -> &[&'static str] {
        &self.deps
    }
}

/// Registry of scripts and styles by handle.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<&'static str, Asset>,
}

impl AssetRegistry {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Registers a script.
    #[inline]
    pub fn register_script(&mut self, handle: &'static str, url: String, deps: &[&'static str]) {
        self.register(handle, AssetKind::Script, url, deps);
    }

    /// Registers a stylesheet.
    #[inline]
    pub fn register_style(&mut self, handle: &'static str, url: String, deps: &[&'static str]) {
        self.register(handle, AssetKind::Style, url, deps);
    }

    fn register(&mut self, handle: &'static str, kind: AssetKind, url: String, deps: &[&'static str]) {
        let asset = Asset {
            kind,
            url,
            deps: deps.to_vec(),
        };
        if self.assets.insert(handle, asset).is_some() {
            tracing::debug!(handle, "asset is registered again");
        }
    }

    /// Returns the asset for the handle.
    #[inline]
    pub fn get(&self, handle: &str) -> Option<&Asset> {
        self.assets.get(handle)
    }

    /// Returns the number of registered assets.
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if no asset has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Resolves the URLs of the handles with their dependencies first.
    /// Each asset is resolved once, and unknown handles are skipped with a warning.
    pub fn resolve(&self, handles: &[&str]) -> Vec<&str> {
        let mut urls = Vec::new();
        let mut visited = HashSet::new();
        for handle in handles {
            self.visit(handle, &mut visited, &mut urls);
        }
        urls
    }

    fn visit<'a>(
        &'a self,
        handle: &str,
        visited: &mut HashSet<&'static str>,
        urls: &mut Vec<&'a str>,
    ) {
        match self.assets.get_key_value(handle) {
            Some((&handle, asset)) => {
                if !visited.insert(handle) {
                    return;
                }
                for dep in &asset.deps {
                    self.visit(dep, visited, urls);
                }
                urls.push(&asset.url);
            }
            None => tracing::warn!(handle, "asset is not registered"),
        }
    }
}

/// Registers the scripts and styles of the field.
pub fn register_dependencies(registry: &mut AssetRegistry, settings: &FieldSettings) {
    registry.register_script(SCRIPT_HANDLE, settings.asset_url(SCRIPT_PATH), &[]);
    registry.register_script(
        INIT_SCRIPT_HANDLE,
        settings.asset_url(INIT_SCRIPT_PATH),
        &[SCRIPT_HANDLE],
    );
    registry.register_style(STYLE_HANDLE, settings.asset_url(STYLE_PATH), &[]);
    registry.register_style(
        THEME_STYLE_HANDLE,
        settings.asset_url(THEME_STYLE_PATH),
        &[STYLE_HANDLE],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_registers_dependencies() {
        let mut settings = FieldSettings::new();
        settings.set_assets_url("/wp-content/plugins/int-tel-input");

        let mut registry = AssetRegistry::new();
        register_dependencies(&mut registry, &settings);
        assert_eq!(registry.len(), 4);

        let script = registry.get(SCRIPT_HANDLE).unwrap();
        assert_eq!(script.kind(), AssetKind::Script);
        assert_eq!(
            script.url(),
            "/wp-content/plugins/int-tel-input/assets/js/intlTelInput.min.js"
        );
        assert_eq!(registry.get(THEME_STYLE_HANDLE).unwrap().kind(), AssetKind::Style);
    }

    #[test]
    fn it_resolves_dependencies_first() {
        let mut registry = AssetRegistry::new();
        register_dependencies(&mut registry, &FieldSettings::new());
        let urls = registry.resolve(&[INIT_SCRIPT_HANDLE, SCRIPT_HANDLE, "missing-handle"]);
        assert_eq!(urls, [SCRIPT_PATH, INIT_SCRIPT_PATH]);

        let urls = registry.resolve(&[THEME_STYLE_HANDLE]);
        assert_eq!(urls, [STYLE_PATH, THEME_STYLE_PATH]);
    }

    #[test]
    fn it_resolves_shared_and_cyclic_dependencies_once() {
        let mut registry = AssetRegistry::new();
        register_dependencies(&mut registry, &FieldSettings::new());
        let urls = registry.resolve(&[
            THEME_STYLE_HANDLE,
            STYLE_HANDLE,
            THEME_STYLE_HANDLE,
        ]);
        assert_eq!(urls, [STYLE_PATH, THEME_STYLE_PATH]);

        registry.register_script("flags", "flags.js".to_owned(), &["countries"]);
        registry.register_script("countries", "countries.js".to_owned(), &["flags"]);
        assert_eq!(registry.resolve(&["flags"]), ["countries.js", "flags.js"]);
        assert_eq!(
            registry.resolve(&["countries", "flags", "countries"]),
            ["flags.js", "countries.js"]
        );
    }

    #[test]
    fn it_embeds_the_init_script() {
        assert!(INIT_SCRIPT.contains("data-intl-tel-input"));
        assert!(INIT_SCRIPT.contains("elementor/popup/show"));
    }
}

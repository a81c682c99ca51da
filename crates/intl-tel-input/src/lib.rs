#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

pub mod assets;
pub mod controls;
pub mod field;
pub mod form;
pub mod options;
pub mod registrar;
pub mod settings;

mod view;

use assets::AssetRegistry;
use intl_tel_core::{application, error::Error, state::State};
use registrar::FieldRegistrar;

#[doc(no_inline)]
pub use field::{FIELD_TYPE, IntTelInputField, ValidationOutcome, validate_candidate};
#[doc(no_inline)]
pub use settings::FieldSettings;

/// Registers the field type and the assets it depends on.
///
/// It should be called once from the startup sequence of the hosting form.
pub fn register(
    registrar: &mut FieldRegistrar,
    assets: &mut AssetRegistry,
    settings: FieldSettings,
) {
    assets::register_dependencies(assets, &settings);
    IntTelInputField::register(registrar, settings);
}

/// Initializes the ambient services with the shared state
/// and returns the field settings read from its config.
pub fn init() -> Result<FieldSettings, Error> {
    let state = State::shared();
    application::init(state)?;
    Ok(FieldSettings::from_state(state))
}

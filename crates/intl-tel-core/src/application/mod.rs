//! Bootstrapping of the ambient services.

use crate::{error::Error, state::State};

#[cfg(feature = "tracing-subscriber")]
mod tracing_subscriber;

/// Initializes the ambient services for the state: currently the global
/// tracing subscriber when the `tracing-subscriber` feature is enabled.
pub fn init(state: &State) -> Result<(), Error> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::init(state)?;

    tracing::info!(env = state.env().as_str(), "ambient services initialized");
    Ok(())
}

//! Rig Build - drives a rig through its build steps.
//!
//! - [`RigBuild`]: one build of one asset. Owns the module graph, remembers
//!   how far it got, and continues from there on the next [`RigBuild::run`].
//! - [`BuildScript`] / [`ScriptRegistry`]: what to build, by name.
//! - [`BuildSession`]: the long-lived entry point. Holds the last build and
//!   continues it when that is safe, or starts over.
//! - [`BuildConfig`]: asset name and rig-data location.

mod config;
mod orchestrator;
mod script;
mod session;

pub use config::BuildConfig;
pub use orchestrator::{RigBuild, ASSET_ROOT_MODULE_NAME};
pub use script::{BuildScript, ScriptRegistry};
pub use session::{BuildRequest, BuildSession, ResumeBlocker};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, once per process.
///
/// [`BuildSession::new`] calls this, so builds log as soon as `RUST_LOG` is
/// set (`RUST_LOG=rig_build=debug`, `RUST_LOG=rig_module=trace`). Without
/// `RUST_LOG`, or when the host already installed a subscriber, nothing
/// changes.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
        if let Err(err) = installed {
            tracing::debug!(%err, "keeping the existing tracing subscriber");
        }
    });
}

#[cfg(test)]
mod test_helpers;

// Library crate: the headless board, backend client and driver, exposed for
// integration tests. GUI-specific modules (app, ui, viewport rendering) remain
// in the binary crate.

pub mod backend;
pub mod driver;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod state;

/// Map math shared with the binary's viewport (projection, picking).
pub mod viewport {
    pub mod camera;
    pub mod picking;
}

#[must_use]
pub const fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

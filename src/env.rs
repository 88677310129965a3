use lazy_static::lazy_static;

lazy_static! {
    /// Logging configuration.
    pub static ref RUST_LOG: String =
        dotenvy::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    /// Whether to verify the ordering of intermediate results. Defaults to
    /// on in debug builds.
    pub static ref VERIFY_ORDERING: bool = match dotenvy::var("VERIFY_ORDERING") {
        Ok(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => cfg!(debug_assertions),
    };
}

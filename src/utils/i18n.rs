use tracing::{info, warn};

/// Locales shipped in `locales/`
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "fi"];

/// Switch widget labels to `locale`, falling back to English when unknown
pub fn set_locale(locale: &str) {
    let locale = locale.trim();
    if SUPPORTED_LOCALES.contains(&locale) {
        info!("Setting display locale to {}", locale);
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unsupported display locale '{}', using en", locale);
        rust_i18n::set_locale("en");
    }
}

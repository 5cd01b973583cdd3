//! Configuration access port trait.

/// Read-only view over sectioned key/value configuration. The `[analysis]`
/// section overrides indicator parameters and `[chart]` sizes the terminal
/// renderer; typed getters fall back to the caller's default when a key is
/// absent or unparsable, so mode presets always win for untouched keys.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}

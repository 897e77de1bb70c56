//! Configuration access port trait.
//!
//! Values come back as raw strings; parsing and defaults belong to
//! `config_validation`, which needs to tell absent keys from malformed ones.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

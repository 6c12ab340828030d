pub(crate) mod config;
pub(crate) mod driver;
pub(crate) mod fingerprint;
pub(crate) mod opts;
pub(crate) mod seed;

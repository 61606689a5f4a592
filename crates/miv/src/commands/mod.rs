//! CLI command implementations.

pub(crate) mod at;
pub(crate) mod languages;
pub(crate) mod scan;

pub(crate) use at::AtArgs;
pub(crate) use languages::LanguagesArgs;
pub(crate) use scan::ScanArgs;

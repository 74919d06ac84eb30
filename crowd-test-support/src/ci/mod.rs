//! Knobs that let CI tune test suites without code changes.

pub mod property_test_profile;

pub use property_test_profile::ProptestRunProfile;

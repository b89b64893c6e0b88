// Entry point for the property suites under tests/property/.

#[path = "property/closure_properties.rs"]
mod closure_properties;

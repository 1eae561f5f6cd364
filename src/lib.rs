/// rpp-scriptgen — core library
///
/// Provides the instance-directory scan, the invocation-line generator, the
/// JSON listing, and the shared stdout schema types used by the two
/// sub-commands: gen, list.
pub mod schema;
pub mod instances;
pub mod r#gen;
pub mod list;

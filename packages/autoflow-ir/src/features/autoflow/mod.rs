//! Autoflow Feature
//!
//! Rewrites one source unit so that async class members marked with the
//! flow trigger become mobx-keystone flows and classes marked with the
//! model trigger get an identity annotation.
//!
//! ## Structure
//! - `domain/` - Tree visitor (`Fold`, `Visit`), per-pass context, host capabilities
//! - `infrastructure/` - The individual rewrites:
//!   - `suspension`     : `await E` → `yield* _await(E)`, async → generator
//!   - `wrapper`        : `_async(function* (this: C, ...) { ... })`
//!   - `annotations`    : annotation/qualifier normalization
//!   - `class_identity` : `@autoModel` → `@model("<name>")`
//!   - `import`         : namespace import + collision-free local name
//! - `application/` - `AutoflowTransformer`, the pass coordinator
//!
//! ## Example
//!
//! ```text
//! class Test {
//!   fn = autoFlow(async (input) => await callApi(input))
//! }
//! ```
//!
//! becomes
//!
//! ```text
//! import * as mobx_keystone_1 from "mobx-keystone";
//! class Test {
//!   @mobx_keystone_1.modelFlow
//!   fn = mobx_keystone_1._async(function* (this: Test, input) {
//!     return yield* mobx_keystone_1._await(callApi(input));
//!   });
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{create_transformer, AutoflowTransformer, TransformOptions, TransformOutcome};
pub use domain::{AsyncQualifierProbe, Fold, IdentityNamer, SyntaxFlagProbe, Visit};

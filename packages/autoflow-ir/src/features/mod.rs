//! Feature modules
//!
//! Each feature is a vertical slice with `domain/` (models, traits),
//! `ports/` (external interfaces), `application/` (use cases) and
//! `infrastructure/` (implementations).
//!
//! - `parsing`  : TypeScript source → syntax tree (tree-sitter)
//! - `autoflow` : async members → mobx-keystone flows, class identity
//! - `printing` : syntax tree → TypeScript source

pub mod autoflow;
pub mod parsing;
pub mod printing;

//! Triple-slash reference directives
//!
//! `/// <reference path="..." />`, `types="..."` and `lib="..."` are only
//! directives when they precede every statement; later ones are plain
//! comments.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REFERENCE_DIRECTIVE: Regex = Regex::new(
        r#"^///\s*<reference\s+(path|types|lib)\s*=\s*["']([^"']*)["'][^>]*/>"#
    )
    .expect("reference directive pattern is valid");
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDirectives {
    pub paths: Vec<String>,
    pub types: Vec<String>,
    pub libs: Vec<String>,
}

impl ReferenceDirectives {
    /// Scan the leading comment block of `source`
    pub fn scan(source: &str) -> Self {
        let mut directives = Self::default();
        let mut in_block_comment = false;

        for line in source.lines() {
            let line = line.trim();
            if in_block_comment {
                in_block_comment = !line.contains("*/");
                continue;
            }
            if line.is_empty() || line.starts_with("#!") {
                continue;
            }
            if line.starts_with("/*") {
                in_block_comment = !line.contains("*/");
                continue;
            }
            if !line.starts_with("//") {
                break;
            }

            if let Some(caps) = REFERENCE_DIRECTIVE.captures(line) {
                let value = caps[2].to_string();
                match &caps[1] {
                    "path" => directives.paths.push(value),
                    "types" => directives.types.push(value),
                    _ => directives.libs.push(value),
                }
            }
        }

        directives
    }
}

//! Opacity migration: rewrite deprecated `.withOpacity(x)` calls to
//! `.withValues(alpha: x)`.

use regex::Captures;

use crate::core::migrate::rules::RewriteRule;
use crate::core::migrate::scan::ExclusionConfig;

/// File-name suffixes this migration rewrites.
pub fn extensions() -> Vec<String> {
    vec![".dart".to_string()]
}

/// The opacity rewrite, a single rule.
///
/// The argument group stops at the first closing parenthesis, so the rule
/// cannot see past nested calls; plain values and operator expressions
/// pass through verbatim. Purely lexical, like every rule here.
pub fn rules() -> Vec<RewriteRule> {
    vec![RewriteRule::map(
        "withOpacity",
        r"\.withOpacity\s*\(\s*([^)]+?)\s*\)",
        |caps: &Captures| format!(".withValues(alpha: {})", caps[1].trim()),
    )]
}

pub fn exclusions() -> ExclusionConfig {
    ExclusionConfig::flutter(&[])
}

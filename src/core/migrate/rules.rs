//! Ordered regex rewrite rules applied to full file contents.
//!
//! A rule list is fixed at configuration time and applied sequentially:
//! each rule runs a single leftmost, non-overlapping `replace_all` pass
//! over the output of the previous rule. Matching is purely lexical; rules
//! have no awareness of Dart syntax, string literals, or block comments.

use regex::{Captures, Regex};

// ============================================================================
// Types
// ============================================================================

/// How a rule turns a match into replacement text.
pub enum Replacement {
    /// Literal text, expanded with `${n}` capture-group syntax.
    Template(String),
    /// Computed from the captures. Must return normally for any input the
    /// rule's pattern can match.
    Map(fn(&Captures) -> String),
}

/// One pattern-to-replacement rewrite.
///
/// Replacement text must never re-match any pattern in the same rule list;
/// that property is what makes a whole list idempotent.
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replace: Replacement,
}

impl RewriteRule {
    /// Builds a rule with a template replacement.
    ///
    /// Panics on an invalid pattern, so only statically known patterns
    /// belong here.
    pub fn template(name: &'static str, pattern: &str, template: impl Into<String>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replace: Replacement::Template(template.into()),
        }
    }

    /// Builds a rule whose replacement is computed per match.
    pub fn map(name: &'static str, pattern: &str, map: fn(&Captures) -> String) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replace: Replacement::Map(map),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replaces every non-overlapping match in `text`.
    ///
    /// Returns the rewritten text and the match count.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut count = 0usize;
        let result = self.pattern.replace_all(text, |caps: &Captures| {
            count += 1;
            match &self.replace {
                Replacement::Template(template) => {
                    let mut expanded = String::new();
                    caps.expand(template, &mut expanded);
                    expanded
                }
                Replacement::Map(map) => map(caps),
            }
        });
        (result.into_owned(), count)
    }
}

// ============================================================================
// Rule list application
// ============================================================================

/// Applies every rule in order, each over the previous rule's output.
///
/// Returns the final text and the sum of match counts across all rules.
/// The count feeds reporting only; it never affects control flow.
pub fn apply_rules(rules: &[RewriteRule], text: &str) -> (String, usize) {
    let mut current = text.to_string();
    let mut total = 0usize;

    for rule in rules {
        let (rewritten, count) = rule.apply(&current);
        current = rewritten;
        total += count;
    }

    (current, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_returns_text_unchanged_with_zero_count() {
        let rules = vec![RewriteRule::template("widen", r"\bnarrow\b", "wide")];

        let (result, count) = apply_rules(&rules, "nothing to see here");

        assert_eq!(result, "nothing to see here");
        assert_eq!(count, 0);
    }

    #[test]
    fn template_expands_capture_groups() {
        let rule = RewriteRule::template("swap", r"(\w+)=(\w+)", "${2}=${1}");

        let (result, count) = rule.apply("a=b c=d");

        assert_eq!(result, "b=a d=c");
        assert_eq!(count, 2);
    }

    #[test]
    fn map_replacement_computes_from_captures() {
        let rule = RewriteRule::map("shout", r"say\((\w+)\)", |caps| {
            format!("shout({})", caps[1].to_uppercase())
        });

        let (result, count) = rule.apply("say(hello) and say(bye)");

        assert_eq!(result, "shout(HELLO) and shout(BYE)");
        assert_eq!(count, 2);
    }

    #[test]
    fn rules_apply_in_order_over_intermediate_text() {
        let rules = vec![
            RewriteRule::template("first", "alpha", "beta"),
            RewriteRule::template("second", "beta", "gamma"),
        ];

        let (result, count) = apply_rules(&rules, "alpha");

        assert_eq!(result, "gamma");
        assert_eq!(count, 2);
    }

    #[test]
    fn count_sums_across_rules() {
        let rules = vec![
            RewriteRule::template("dots", r"\.", ";"),
            RewriteRule::template("dashes", "-", "_"),
        ];

        let (result, count) = apply_rules(&rules, "a.b-c.d");

        assert_eq!(result, "a;b_c;d");
        assert_eq!(count, 3);
    }
}

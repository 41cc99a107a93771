//! Theme migration: rename `AppColors` / `AppColorsLight` references to the
//! unified `AppTheme`, rewrite the corresponding imports, and optionally
//! insert one-time theme initialization into the app entry point.

use std::path::PathBuf;

use regex::Regex;

use crate::core::migrate::patch::EntryPointPatch;
use crate::core::migrate::rules::RewriteRule;
use crate::core::migrate::scan::ExclusionConfig;

/// The theme definition files themselves must keep their old identifiers,
/// and lock/metadata files are never rewrite targets.
const THEME_SKIP_FILES: &[&str] = &[
    "app_colors.dart",
    "app_colors_light.dart",
    "app_theme.dart",
    "pubspec.lock",
    ".packages",
];

/// Guard string proving theme initialization is already wired up.
const INIT_MARKER: &str = "AppTheme.init";

/// File-name suffixes this migration rewrites.
pub fn extensions() -> Vec<String> {
    vec![".dart".to_string()]
}

/// The rename rule list, in application order.
///
/// Import rewrites are listed before the identifier renames; the two groups
/// match disjoint text (quoted snake_case paths vs `AppColors.`-style
/// prefixes), so their relative order cannot change the result. The comment
/// rule stays a dedicated pattern: it is a line-comment heuristic, not a
/// comment parser, and block comments or string literals containing `//`
/// are outside its reach.
pub fn rules() -> Vec<RewriteRule> {
    vec![
        RewriteRule::template(
            "app_colors import",
            r#"import\s+['"].*app_colors\.dart['"];?"#,
            "import 'package:your_app/core/theme/app_theme.dart';",
        ),
        RewriteRule::template(
            "app_colors_light import",
            r#"import\s+['"].*app_colors_light\.dart['"];?"#,
            "import 'package:your_app/core/theme/app_theme.dart';",
        ),
        RewriteRule::template("AppColors prefix", r"\bAppColors\.", "AppTheme."),
        RewriteRule::template("AppColorsLight prefix", r"\bAppColorsLight\.", "AppTheme."),
        RewriteRule::template(
            "comment references",
            r"(//.*?)(AppColors|AppColorsLight)\.",
            "${1}AppTheme.",
        ),
    ]
}

pub fn exclusions() -> ExclusionConfig {
    ExclusionConfig::flutter(THEME_SKIP_FILES)
}

/// One-shot initialization insert after the first widget build signature
/// in `lib/main.dart`.
pub fn entry_point_patch() -> EntryPointPatch {
    EntryPointPatch {
        file: PathBuf::from("lib/main.dart"),
        marker: INIT_MARKER.to_string(),
        anchor: Regex::new(r"Widget build\(BuildContext context\) \{").unwrap(),
        insert: "\n    // Initialize theme\n    AppTheme.init(context);\n".to_string(),
    }
}

/// Follow-up guidance surfaced in the summary and the JSON payload.
pub fn hints() -> Vec<String> {
    vec![
        "Replace 'your_app' in the rewritten imports with the real package name".to_string(),
        "Run the app and verify theming still looks right".to_string(),
        "Delete the backup directory once the changes are confirmed".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::migrate::rules::apply_rules;

    #[test]
    fn renames_both_color_prefixes() {
        let (result, count) = apply_rules(
            &rules(),
            "color: AppColors.primary,\nborder: AppColorsLight.border,",
        );

        assert_eq!(result, "color: AppTheme.primary,\nborder: AppTheme.border,");
        assert_eq!(count, 2);
    }

    #[test]
    fn leaves_unprefixed_identifiers_alone() {
        let input = "class MyAppColors {}\nAppColorsLightest.shade;";

        let (result, count) = apply_rules(&rules(), input);

        assert_eq!(result, input);
        assert_eq!(count, 0);
    }

    #[test]
    fn rewrites_imports_to_the_canonical_theme_path() {
        let input = "import 'package:old_app/core/theme/app_colors.dart';\n\
                     import 'package:old_app/core/theme/app_colors_light.dart';\n";

        let (result, count) = apply_rules(&rules(), input);

        assert_eq!(
            result,
            "import 'package:your_app/core/theme/app_theme.dart';\n\
             import 'package:your_app/core/theme/app_theme.dart';\n"
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn comment_rule_rewrites_line_comment_references() {
        let comment_rule = rules()
            .into_iter()
            .find(|rule| rule.name() == "comment references")
            .unwrap();

        let (result, count) = comment_rule.apply("// falls back to AppColors.primary");

        assert_eq!(result, "// falls back to AppTheme.primary");
        assert_eq!(count, 1);
    }

    #[test]
    fn full_list_is_idempotent_on_realistic_source() {
        let input = "import 'package:old_app/app_colors.dart';\n\
                     // tint: AppColorsLight.border\n\
                     final c = AppColors.primary;\n";

        let (first, count) = apply_rules(&rules(), input);
        let (second, recount) = apply_rules(&rules(), &first);

        assert!(count > 0);
        assert_eq!(first, second);
        assert_eq!(recount, 0);
    }

    #[test]
    fn patch_preset_targets_the_flutter_entry_point() {
        let patch = entry_point_patch();

        assert_eq!(patch.file, PathBuf::from("lib/main.dart"));
        assert!(patch.insert.contains("AppTheme.init(context);"));
        assert!(patch
            .anchor
            .is_match("  Widget build(BuildContext context) {"));
    }

    #[test]
    fn exclusions_protect_the_theme_definition_files() {
        let config = exclusions();

        assert!(config.should_skip(std::path::Path::new("lib/theme/app_colors.dart")));
        assert!(config.should_skip(std::path::Path::new("lib/theme/app_theme.dart")));
        assert!(!config.should_skip(std::path::Path::new("lib/theme/extensions.dart")));
    }
}

//! Plan validation: unknown-key detection with Levenshtein suggestions
//! and parameter range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never make a plan unusable.

use super::PlanConfig;
use crate::types::ParamField;
use std::collections::HashSet;

/// Rates above this many °/100 ft are unusual for conventional tools.
const AGGRESSIVE_RATE: f64 = 10.0;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, "; did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `PlanConfig`.
///
/// Parameter keys come from `ParamField::ALL`; the remaining sections are
/// listed by hand and must follow any field added in plan_config.rs.
pub fn known_config_keys() -> HashSet<String> {
    let fixed: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        "well.rig",
        "well.profile",
        // [parameters]
        "parameters",
        // [render]
        "render",
        "render.width",
        "render.height",
        "render.margin",
        "render.samples_per_arc",
        "render.tick_count",
        // [report]
        "report",
        "report.precision",
        "report.length_unit",
    ];

    fixed
        .iter()
        .map(|k| (*k).to_string())
        .chain(ParamField::ALL.iter().map(|f| format!("parameters.{}", f.key())))
        .collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// A table `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve alphabetically so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<String>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.clone())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown plan keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown plan key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Parameter Range Validation
// ============================================================================

/// Validate parameter values on a parsed plan.
///
/// Returns (errors, warnings). The solvers enforce the geometric
/// preconditions; this pass only rejects values no solver could use and
/// flags ones that are legal but unusual.
pub fn validate_physical_ranges(config: &PlanConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let p = &config.parameters;

    for field in ParamField::ALL {
        if let Some(v) = p.raw(field).filter(|v| !v.is_finite()) {
            errors.push(format!("parameters.{} = {v} must be a finite number", field.key()));
        }
    }

    for field in [ParamField::BuildRate, ParamField::DropRate] {
        if let Some(rate) = p.get(field).filter(|r| *r > AGGRESSIVE_RATE) {
            warnings.push(ValidationWarning {
                field: format!("parameters.{}", field.key()),
                message: format!(
                    "{} = {rate:.2}°/100 is above the typical range (0-{AGGRESSIVE_RATE})",
                    field.key()
                ),
                suggestion: None,
            });
        }
    }

    if let Some(alpha) = p.final_inclination.filter(|a| *a >= 90.0) {
        warnings.push(ValidationWarning {
            field: "parameters.final_inclination".to_string(),
            message: format!("final_inclination = {alpha:.1}° is horizontal or beyond"),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("build_rate", "build_rate"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("kickof_tvd", "kickoff_tvd"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("α2", "a2"), 1);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [parameters]
            kickoff_tvd = 1000.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"parameters".to_string()));
        assert!(keys.contains(&"parameters.kickoff_tvd".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[parameters]
kickof_tvd = 1000.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "parameters.kickof_tvd");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("parameters.kickoff_tvd"));
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[well]
name = "Test-1"
profile = "build_drop"

[parameters]
kickoff_tvd = 1000.0
end_of_drop_tvd = 8000.0
surface_east = 0.0

[render]
samples_per_arc = 40

[report]
length_unit = "m"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[survey]\nstations = 3\n");
        assert!(warnings.iter().any(|w| w.field == "survey"));
        assert!(warnings.iter().any(|w| w.field == "survey.stations"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_known_keys_covers_every_parameter() {
        let known = known_config_keys();
        for field in ParamField::ALL {
            assert!(known.contains(&format!("parameters.{}", field.key())), "{field}");
        }
        assert!(known.contains("render.tick_count"));
        assert!(known.contains("report.precision"));
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&PlanConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_non_finite_parameter_is_error() {
        let mut config = PlanConfig::default();
        config.parameters.target_tvd = Some(f64::INFINITY);
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("target_tvd")));
    }

    #[test]
    fn test_aggressive_rate_warns() {
        let mut config = PlanConfig::default();
        config.parameters.drop_rate = Some(15.0);
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "parameters.drop_rate"));
    }
}

//! Identifier scraping over the whole buffer.
//!
//! Pattern-based and deliberately shallow: assignment targets, function
//! parameter names and class base lists.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Scrape pattern {pattern:?} unavailable: {e}");
            None
        }
    }
}

lazy_static! {
    static ref ASSIGNMENT_RE: Option<Regex> = compile(r"(\w+)\s*=");
    static ref DEF_PARAMS_RE: Option<Regex> = compile(r"def\s+\w+\s*\(([^)]*)\)");
    static ref FUNCTION_PARAMS_RE: Option<Regex> = compile(r"function\s*\w*\s*\(([^)]*)\)");
    static ref CLASS_BASES_RE: Option<Regex> = compile(r"class\s+\w+\s*\(([^)]*)\)");
}

/// Distinct identifiers found in `code`, sorted.
pub fn scrape_identifiers(code: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    if let Some(re) = ASSIGNMENT_RE.as_ref() {
        names.extend(re.captures_iter(code).map(|cap| cap[1].to_string()));
    }

    for re in [&*DEF_PARAMS_RE, &*FUNCTION_PARAMS_RE, &*CLASS_BASES_RE]
        .into_iter()
        .flatten()
    {
        for cap in re.captures_iter(code) {
            names.extend(split_params(&cap[1]));
        }
    }
    names
}

/// Names from a comma separated parameter or base list. Splat parameters are
/// skipped; annotations and defaults are cut off at the first non-word char.
fn split_params(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty() && !param.starts_with('*'))
        .filter_map(|param| {
            let name: String = param
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '.')
                .collect();
            (!name.is_empty()).then_some(name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(code: &str) -> Vec<String> {
        scrape_identifiers(code).into_iter().collect()
    }

    #[test]
    fn test_assignments_and_params() {
        let code = "total = 0\ndef add(first, second: int = 2, *args, **kw):\n    total += first\n";
        // `int =` inside the default value is picked up like any assignment.
        assert_eq!(names(code), vec!["first", "int", "second", "total"]);
    }

    #[test]
    fn test_class_bases_keep_dotted_names() {
        let code = "class Handler(base.Handler, metaclass=Meta):\n    pass\n";
        let found = names(code);
        assert!(found.contains(&"base.Handler".to_string()));
        assert!(found.contains(&"metaclass".to_string()));
    }

    #[test]
    fn test_javascript_functions() {
        let code = "function go(speed, dir) {}\nconst run = function (far) {};\n";
        let found = names(code);
        for expected in ["speed", "dir", "far", "run"] {
            assert!(found.contains(&expected.to_string()), "{expected}");
        }
    }

    #[test]
    fn test_nothing_to_scrape() {
        assert!(scrape_identifiers("print('hi')\n").is_empty());
        assert!(scrape_identifiers("").is_empty());
    }
}

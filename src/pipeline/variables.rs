//! `{{name}}` placeholder substitution.

use std::collections::HashMap;

use crate::model::KeyValue;

/// Replaces every `{{name}}` whose name is in `variables` with its value.
///
/// Single left-to-right pass: inserted values are never rescanned, and
/// placeholders for unknown names are left as written.
pub fn substitute(text: &str, variables: &HashMap<String, String>) -> String {
    if variables.is_empty() || !text.contains("{{") {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let resolved = after
            .find("}}")
            .and_then(|end| variables.get(&after[..end]).map(|value| (end, value)));

        match resolved {
            Some((end, value)) => {
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Substitutes the values of key/value rows. Keys are left alone.
pub fn substitute_values(rows: &[KeyValue], variables: &HashMap<String, String>) -> Vec<KeyValue> {
    rows.iter()
        .map(|row| KeyValue {
            value: substitute(&row.value, variables),
            ..row.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let v = vars(&[("host", "api.example.com"), ("id", "7")]);
        assert_eq!(
            substitute("https://{{host}}/users/{{id}}?again={{id}}", &v),
            "https://api.example.com/users/7?again=7"
        );
    }

    #[test]
    fn test_unknown_placeholders_are_untouched() {
        let v = vars(&[("known", "yes")]);
        assert_eq!(
            substitute("{{known}} {{unknown}} {{ known }}", &v),
            "yes {{unknown}} {{ known }}"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let v = vars(&[("a", "{{b}}"), ("b", "deep")]);
        assert_eq!(substitute("{{a}}", &v), "{{b}}");

        let v = vars(&[("loop", "{{loop}}")]);
        assert_eq!(substitute("x{{loop}}y", &v), "x{{loop}}y");
    }

    #[test]
    fn test_empty_variables_return_input() {
        assert_eq!(substitute("{{token}}", &HashMap::new()), "{{token}}");
    }

    #[test]
    fn test_stray_braces() {
        let v = vars(&[("a", "1")]);
        assert_eq!(substitute("{{{a}}}", &v), "{1}");
        assert_eq!(substitute("{{a", &v), "{{a");
        assert_eq!(substitute("{{x {{a}}", &v), "{{x 1");
        assert_eq!(substitute("héllo {{a}} wörld", &v), "héllo 1 wörld");
    }

    #[test]
    fn test_substitute_values_keeps_keys() {
        let v = vars(&[("k", "v")]);
        let rows = vec![KeyValue::new("{{k}}", "{{k}}")];
        let out = substitute_values(&rows, &v);
        assert_eq!(out[0].key, "{{k}}");
        assert_eq!(out[0].value, "v");
        assert_eq!(out[0].id, rows[0].id);
    }
}

//! Template body variable substitution
//!
//! Replaces `{{key}}` placeholders from a string map. Used for previews:
//! unknown placeholders stay in place so the agent can see what is still
//! unfilled.

use std::collections::BTreeMap;

/// Replace every `{{key}}` whose key is present in `vars`.
///
/// Keys are trimmed, so `{{ name }}` and `{{name}}` are equivalent.
pub fn render_variables(body: &str, vars: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match vars.get(key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(&after[..end]);
                        result.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // unterminated placeholder, keep the tail verbatim
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

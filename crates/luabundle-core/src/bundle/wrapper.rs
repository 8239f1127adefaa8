use luabundle_runtime::module::escape_lua_string;
use regex::Regex;
use std::sync::LazyLock;

static EXPORT_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\s+(\w+)\s*$").expect("export tail pattern is valid"));

/// Module body with its trailing `return <name>` removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrippedBody<'a> {
    pub body: &'a str,
    /// Identifier the removed statement returned, if there was one
    pub export: Option<&'a str>,
}

/// Trim `source` and strip a single trailing `return <identifier>`.
pub fn strip_export_tail(source: &str) -> StrippedBody<'_> {
    let trimmed = source.trim();
    match EXPORT_TAIL.captures(trimmed) {
        Some(caps) => {
            let start = caps.get(0).map_or(trimmed.len(), |m| m.start());
            StrippedBody {
                body: trimmed[..start].trim_end(),
                export: caps.get(1).map(|m| m.as_str()),
            }
        }
        None => StrippedBody {
            body: trimmed,
            export: None,
        },
    }
}

/// Wrap a module body into a deferred registry entry.
///
/// The body is spliced verbatim; only its first line picks up the factory's
/// indentation. The factory always ends by returning the value bound to
/// `name`.
pub fn wrap_module(name: &str, body: &str) -> String {
    format!(
        "\nmodules[\"{key}\"] = {{\n    fn = function()\n        {body}\n        return {name}\n    end\n}}\n",
        key = escape_lua_string(name),
    )
}

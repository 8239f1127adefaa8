//! Module registry runtime for bundled output.

/// Name of the registry lookup function every rewritten `require` resolves to.
pub const LOAD_MODULE_FN: &str = "LoadModule";

/// Name of the deferred constructor wrapping the library in the universal artifact.
pub const BUNDLE_CONSTRUCTOR: &str = "LibraryBundle";

/// Lazy registry prelude. `LoadModule` runs a module's factory at most once
/// and hands out the cached result afterwards. Unknown names yield `nil`.
pub const REGISTRY_PRELUDE: &str = r#"local Library = {}
local modules = {}

local function LoadModule(name)
    if not modules[name] then return nil end
    if modules[name].cached then return modules[name].cached end

    local moduleFn = modules[name].fn
    local result = moduleFn()
    modules[name].cached = result
    return result
end
"#;

/// Render the registry lookup for `name`, quoting it as a Lua string literal.
pub fn load_module_call(name: &str) -> String {
    format!("{}(\"{}\")", LOAD_MODULE_FN, escape_lua_string(name))
}

/// Escape `value` for use inside a double-quoted Lua string.
pub fn escape_lua_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

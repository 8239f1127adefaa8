//! Textual rewrite of `require(...)` call sites into registry lookups.
//!
//! Resolution is a substring match against the declared module names,
//! longest name first, so `require(script.Parent.KeybindList)` resolves to
//! `KeybindList` rather than `Keybind`. Sites that match nothing are left
//! untouched.

use luabundle_runtime::module::load_module_call;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static REQUIRE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brequire\([^)]+\)").expect("require pattern is valid"));

/// Declared module names ordered by descending length.
///
/// The sort is stable: names of equal length keep declaration order, which
/// makes equal-length collisions resolve to the earlier declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    names: Vec<String>,
}

/// Outcome of matching one call site against the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Rewrite the site to load this module
    Module(&'a str),
    /// The site quotes a module name as a string literal; leave it alone
    Literal(&'a str),
    /// No declared name occurs in the site
    Unresolved,
}

impl CandidateSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { names }
    }

    /// Match `site` against the candidates, longest first.
    ///
    /// The first name occurring in the site decides: a quoted occurrence
    /// (`"Name"`) exempts the site, anything else resolves to that name.
    pub fn resolve(&self, site: &str) -> Resolution<'_> {
        for name in &self.names {
            if !site.contains(name.as_str()) {
                continue;
            }
            if site.contains(&format!("\"{name}\"")) {
                return Resolution::Literal(name);
            }
            return Resolution::Module(name);
        }
        Resolution::Unresolved
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Rewritten module text plus what happened to each call site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub source: String,
    /// Modules loaded by the rewritten sites, in source order
    pub resolved: Vec<String>,
    /// Sites left as-is because they quote a module name
    pub literal: Vec<String>,
    /// Sites left as-is because no module name matched
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    candidates: CandidateSet,
}

impl ReferenceRewriter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: CandidateSet::new(names),
        }
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Rewrite every resolvable `require(...)` site in one module's source.
    pub fn rewrite(&self, source: &str) -> Rewrite {
        let mut resolved = Vec::new();
        let mut literal = Vec::new();
        let mut unresolved = Vec::new();

        let rewritten = REQUIRE_CALL.replace_all(source, |caps: &Captures<'_>| {
            let site = &caps[0];
            match self.candidates.resolve(site) {
                Resolution::Module(name) => {
                    resolved.push(name.to_string());
                    load_module_call(name)
                }
                Resolution::Literal(_) => {
                    literal.push(site.to_string());
                    site.to_string()
                }
                Resolution::Unresolved => {
                    unresolved.push(site.to_string());
                    site.to_string()
                }
            }
        });

        Rewrite {
            source: rewritten.into_owned(),
            resolved,
            literal,
            unresolved,
        }
    }
}

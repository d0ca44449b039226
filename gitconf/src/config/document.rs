//! In-memory configuration documents.
//!
//! A [`ConfigDocument`] maps `section → key → [values]`. Section and key
//! names are normalized (quotes stripped, lower-cased); values are stored
//! verbatim. Within one key the values are kept in insertion order, which is
//! also the priority order: the last value is the effective one.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::config::parser::RawEntry;
use crate::config::scope::Scope;
use crate::error::{Error, Result};

/// A single configuration value together with its scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValue {
    value: String,
    scope: Scope,
}

impl ConfigValue {
    /// Create a value with an explicit scope.
    #[must_use]
    pub fn new(value: impl Into<String>, scope: Scope) -> Self {
        Self {
            value: value.into(),
            scope,
        }
    }

    /// The stored text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the value came from.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }
}

pub(crate) type KeyValues = BTreeMap<String, Vec<ConfigValue>>;

/// Scoped key/value store for one file or one merge result.
///
/// # Examples
///
/// ```
/// use gitconf::ConfigDocument;
///
/// let mut doc = ConfigDocument::new();
/// doc.add("Remote.origin.URL", "https://example.com/repo.git").unwrap();
/// doc.add("remote.origin.fetch", "+refs/heads/*:refs/remotes/origin/*").unwrap();
///
/// assert_eq!(doc.get("remote.origin.url"), Some("https://example.com/repo.git"));
/// assert_eq!(doc.get("\"REMOTE\".\"ORIGIN\".\"URL\""), doc.get("remote.origin.url"));
/// assert_eq!(doc.get("remote.origin.pushurl"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: BTreeMap<String, KeyValues>,
}

/// Strip quote characters from every dot-separated component.
fn dequote_key(name: &str) -> String {
    if !name.contains(['"', '\'']) {
        return name.to_string();
    }
    name.split('.')
        .map(|part| part.trim_matches(['"', '\'']))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a dotted variable name into normalized `(section, key)`.
///
/// The key is the last component; everything before it is the section
/// (including any subsection). Returns `None` when either part is empty.
///
/// # Examples
///
/// ```
/// use gitconf::config::document::split_key;
///
/// assert_eq!(
///     split_key("Remote.\"Hello World\".URL"),
///     Some(("remote.hello world".to_string(), "url".to_string()))
/// );
/// assert_eq!(split_key("nosection"), None);
/// ```
#[must_use]
pub fn split_key(name: &str) -> Option<(String, String)> {
    let name = dequote_key(name).to_lowercase();
    let (section, key) = name.rsplit_once('.')?;
    if section.is_empty() || key.is_empty() {
        return None;
    }
    Some((section.to_string(), key.to_string()))
}

fn require_key(name: &str) -> Result<(String, String)> {
    split_key(name).ok_or_else(|| Error::InvalidKey {
        key: name.to_string(),
    })
}

impl ConfigDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from tokenizer output, tagging every value
    /// [`Scope::SELF_`].
    #[must_use]
    pub fn from_entries(entries: Vec<RawEntry>) -> Self {
        let mut doc = Self::new();
        for entry in entries {
            if let Some((section, key)) = split_key(&entry.key) {
                doc.push(section, key, ConfigValue::new(entry.value, Scope::SELF_));
            }
        }
        doc
    }

    fn push(&mut self, section: String, key: String, value: ConfigValue) {
        self.sections
            .entry(section)
            .or_default()
            .entry(key)
            .or_default()
            .push(value);
    }

    fn values_mut(&mut self, name: &str) -> Option<&mut Vec<ConfigValue>> {
        let (section, key) = split_key(name)?;
        self.sections.get_mut(&section)?.get_mut(&key)
    }

    /// Append a value with scope [`Scope::SELF_`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `name` has no section part.
    pub fn add(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let (section, key) = require_key(name)?;
        self.push(section, key, ConfigValue::new(value, Scope::SELF_));
        Ok(())
    }

    /// Append several values, in order, with scope [`Scope::SELF_`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `name` has no section part.
    pub fn add_all<I, S>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (section, key) = require_key(name)?;
        let list = self
            .sections
            .entry(section)
            .or_default()
            .entry(key)
            .or_default();
        list.extend(
            values
                .into_iter()
                .map(|v| ConfigValue::new(v, Scope::SELF_)),
        );
        Ok(())
    }

    /// Replace the most recent [`Scope::SELF_`] value, or append one.
    ///
    /// Values from other scopes are never touched, so setting a key that is
    /// only defined globally adds a local override instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `name` has no section part.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let (section, key) = require_key(name)?;
        let list = self
            .sections
            .entry(section)
            .or_default()
            .entry(key)
            .or_default();
        match list.iter_mut().rev().find(|v| v.scope == Scope::SELF_) {
            Some(existing) => existing.value = value.into(),
            None => list.push(ConfigValue::new(value, Scope::SELF_)),
        }
        Ok(())
    }

    /// Remove the most recent [`Scope::SELF_`] value. Returns whether a
    /// value was removed.
    pub fn unset(&mut self, name: &str) -> bool {
        let Some(list) = self.values_mut(name) else {
            return false;
        };
        match list.iter().rposition(|v| v.scope == Scope::SELF_) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every [`Scope::SELF_`] value. Returns whether any value was
    /// removed.
    pub fn unset_all(&mut self, name: &str) -> bool {
        let Some(list) = self.values_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|v| v.scope != Scope::SELF_);
        list.len() != before
    }

    /// All stored values of a key with their scopes, lowest priority first.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<&[ConfigValue]> {
        let (section, key) = split_key(name)?;
        let list = self.sections.get(&section)?.get(&key)?;
        if list.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    /// All values of a key, lowest priority first. `None` if undefined.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Option<Vec<&str>> {
        self.get_raw(name)
            .map(|list| list.iter().map(ConfigValue::value).collect())
    }

    /// The effective (last) value of a key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_raw(name)
            .and_then(<[ConfigValue]>::last)
            .map(ConfigValue::value)
    }

    /// Interpret the effective value as a boolean.
    ///
    /// Accepts `yes`/`true`/`on` and `no`/`false`/`off` in any case; the
    /// empty string is false. `default` is returned only when the key is
    /// undefined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBooleanValue`] for any other text.
    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        match value.to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" => Ok(true),
            "no" | "false" | "off" | "" => Ok(false),
            _ => Err(Error::NotBooleanValue {
                key: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn get_number<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        value.parse().map_err(|source| Error::InvalidInteger {
            key: name.to_string(),
            value: value.to_string(),
            source,
        })
    }

    /// Interpret the effective value as a base-10 `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteger`] on malformed or out-of-range text.
    pub fn get_int(&self, name: &str, default: i32) -> Result<i32> {
        self.get_number(name, default)
    }

    /// Interpret the effective value as a base-10 `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteger`] on malformed or out-of-range text.
    pub fn get_int64(&self, name: &str, default: i64) -> Result<i64> {
        self.get_number(name, default)
    }

    /// Interpret the effective value as a base-10 `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInteger`] on malformed or out-of-range text.
    pub fn get_uint64(&self, name: &str, default: u64) -> Result<u64> {
        self.get_number(name, default)
    }

    /// Append every value of `other`, re-tagged with `scope`.
    ///
    /// The include bit of each value is preserved; the precedence bits are
    /// replaced. Merged values land after existing ones, so the merge order
    /// is the precedence order.
    pub fn merge(&mut self, other: &Self, scope: Scope) -> &mut Self {
        for (section, keys) in &other.sections {
            let target = self.sections.entry(section.clone()).or_default();
            for (key, values) in keys {
                target.entry(key.clone()).or_default().extend(
                    values
                        .iter()
                        .map(|v| ConfigValue::new(v.value.clone(), v.scope.rebase(scope))),
                );
            }
        }
        self
    }

    /// Sorted list of `section.key` names that have at least one value.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|(section, keys)| {
                keys.iter()
                    .filter(|(_, values)| !values.is_empty())
                    .map(move |(key, _)| format!("{section}.{key}"))
            })
            .collect()
    }

    /// Sorted section names (subsections dot-joined).
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Whether the document holds no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections
            .values()
            .all(|keys| keys.values().all(Vec::is_empty))
    }

    pub(crate) fn iter_sections(&self) -> impl Iterator<Item = (&String, &KeyValues)> {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse;

    fn parsed(data: &str) -> ConfigDocument {
        ConfigDocument::from_entries(parse(data.as_bytes()).unwrap())
    }

    /// system (with one include), global and repository documents merged
    /// in precedence order.
    fn layered() -> ConfigDocument {
        let mut sys = ConfigDocument::new();
        sys.add("sect1.Name1", "value-1.1.1").unwrap();
        sys.add("sect1.Name2", "value-1.1.2").unwrap();

        let mut inc = ConfigDocument::new();
        inc.add("sect1.Name3", "value-0.1.3").unwrap();
        inc.add("sect2.name1", "value-0.2.1").unwrap();
        sys.merge(&inc, Scope::INCLUDE);

        let mut global = ConfigDocument::new();
        global.add("sect1.name2", "value-2.1.2").unwrap();
        global.add("sect1.name3", "value-2.1.3").unwrap();
        global.add("sect1.name4", "value-2.1.4").unwrap();
        global.add("sect3.name1", "value-2.3.1").unwrap();

        let mut repo = ConfigDocument::new();
        repo.add("sect1.name2", "value-3.1.2").unwrap();
        repo.add("sect1.name3", "value-3.1.3").unwrap();
        repo.add("sect1.name4", "value-3.1.4.1").unwrap();
        repo.add("sect1.name4", "value-3.1.4.2").unwrap();

        let mut all = ConfigDocument::new();
        all.merge(&sys, Scope::SYSTEM)
            .merge(&global, Scope::GLOBAL)
            .merge(&repo, Scope::SELF_);
        all
    }

    #[test]
    fn test_subsection_lookup() {
        let doc = parsed("[a \"b\"]\n\tc = d\n");
        assert_eq!(doc.get("a.b.c"), Some("d"));
    }

    #[test]
    fn test_case_insensitive_names() {
        let doc = parsed("[remote \"hello world\"]\n\turl = test\n");
        assert_eq!(doc.get("remote.hello world.url"), Some("test"));
        assert_eq!(doc.get("remote.\"hello world\".url"), Some("test"));
        assert_eq!(doc.get("\"remote.hello world\".url"), Some("test"));
        assert_eq!(doc.get("\"remote.hello world.url\""), Some("test"));
        assert_eq!(doc.get("REMOTE.Hello World.URL"), Some("test"));
    }

    #[test]
    fn test_values_are_preserved() {
        let doc = parsed("[ab \"cd\"]\n\tvalue1 = x\n\tvalue2 = x y\n\tvalue3  = a \\\"quote\n");
        assert_eq!(doc.get("ab.cd.value1"), Some("x"));
        assert_eq!(doc.get("ab.cd.value2"), Some("x y"));
        assert_eq!(doc.get("ab.cd.value3"), Some("a \"quote"));
    }

    #[test]
    fn test_get_all() {
        let doc = parsed(
            "[remote \"origin\"]\n\turl = https://example.com/my/repo.git\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n\tfetch = +refs/tags/*:refs/tags/*",
        );
        assert_eq!(doc.get("remote.origin.fetch"), Some("+refs/tags/*:refs/tags/*"));
        assert_eq!(
            doc.get_all("remote.origin.fetch"),
            Some(vec![
                "+refs/heads/*:refs/remotes/origin/*",
                "+refs/tags/*:refs/tags/*"
            ])
        );
        assert_eq!(doc.get_all("remote.origin.missing"), None);
    }

    #[test]
    fn test_empty_string_is_defined() {
        let doc = parsed("[a]\n\tb =\n");
        assert_eq!(doc.get("a.b"), Some(""));
        assert_eq!(doc.get_all("a.b"), Some(vec![""]));
    }

    #[test]
    fn test_get_bool() {
        let doc = parsed(
            "[a]\n\tt1 = true\n\tt2 = yes\n\tt3 = ON\n\tf1 = false\n\tf2 = no\n\tf3 = off\n\tf4 =\n\tx1 = 1\n\tx2 = nothing",
        );
        assert!(doc.get_bool("a.t1", false).unwrap());
        assert!(doc.get_bool("a.t2", false).unwrap());
        assert!(doc.get_bool("a.t3", false).unwrap());
        assert!(!doc.get_bool("a.t4", false).unwrap());
        assert!(!doc.get_bool("a.f1", true).unwrap());
        assert!(!doc.get_bool("a.f2", true).unwrap());
        assert!(!doc.get_bool("a.f3", true).unwrap());
        assert!(!doc.get_bool("a.f4", true).unwrap());
        assert!(doc.get_bool("a.f5", true).unwrap());
        assert!(matches!(
            doc.get_bool("a.x1", true),
            Err(Error::NotBooleanValue { .. })
        ));
        assert!(matches!(
            doc.get_bool("a.x2", true),
            Err(Error::NotBooleanValue { .. })
        ));
    }

    #[test]
    fn test_get_int() {
        let doc = parsed("[a]\n\ti1 = 1\n\ti2 = 100\n\ti3 = abc\n\ti4 = 99999999999\n\ti5 = -3");
        assert_eq!(doc.get_int("a.i1", 0).unwrap(), 1);
        assert_eq!(doc.get_int64("a.i2", 0).unwrap(), 100);
        assert_eq!(doc.get_uint64("a.i2", 0).unwrap(), 100);
        assert!(matches!(
            doc.get_int("a.i3", 0),
            Err(Error::InvalidInteger { .. })
        ));
        assert_eq!(doc.get_int("a.missing", 6700).unwrap(), 6700);
        assert!(doc.get_int("a.i4", 0).is_err());
        assert_eq!(doc.get_int64("a.i4", 0).unwrap(), 99_999_999_999);
        assert!(doc.get_uint64("a.i5", 0).is_err());
    }

    #[test]
    fn test_merge_appends_after_existing() {
        let mut doc = parsed("[a]\n\tb = value-b\n\tc = value-c");
        let other = parsed("[a]\n\tc = other-c\n\td = other-d");

        doc.merge(&other, Scope::INCLUDE);
        assert_eq!(doc.get("a.b"), Some("value-b"));
        assert_eq!(doc.get("a.c"), Some("other-c"));
        assert_eq!(doc.get("a.d"), Some("other-d"));
        assert_eq!(doc.get_all("a.c"), Some(vec!["value-c", "other-c"]));
    }

    #[test]
    fn test_precedence_system_global_self() {
        let mut sys = ConfigDocument::new();
        sys.add("test.foo", "sys").unwrap();
        let mut global = ConfigDocument::new();
        global.add("test.foo", "glob").unwrap();
        let repo = ConfigDocument::new();

        let mut all = ConfigDocument::new();
        all.merge(&sys, Scope::SYSTEM)
            .merge(&global, Scope::GLOBAL)
            .merge(&repo, Scope::SELF_);
        assert_eq!(all.get("test.foo"), Some("glob"));
        assert_eq!(all.get_all("test.foo"), Some(vec!["sys", "glob"]));
    }

    #[test]
    fn test_merged_scopes() {
        let all = layered();
        let rendered: Vec<String> = all
            .keys()
            .iter()
            .flat_map(|k| {
                all.get_raw(k)
                    .unwrap()
                    .iter()
                    .map(move |v| format!("{k} = {} ({})", v.value(), v.scope()))
            })
            .collect();
        assert_eq!(
            rendered,
            vec![
                "sect1.name1 = value-1.1.1 (system)",
                "sect1.name2 = value-1.1.2 (system)",
                "sect1.name2 = value-2.1.2 (global)",
                "sect1.name2 = value-3.1.2 (self)",
                "sect1.name3 = value-0.1.3 (system-inc)",
                "sect1.name3 = value-2.1.3 (global)",
                "sect1.name3 = value-3.1.3 (self)",
                "sect1.name4 = value-2.1.4 (global)",
                "sect1.name4 = value-3.1.4.1 (self)",
                "sect1.name4 = value-3.1.4.2 (self)",
                "sect2.name1 = value-0.2.1 (system-inc)",
                "sect3.name1 = value-2.3.1 (global)",
            ]
        );
    }

    #[test]
    fn test_set_unset() {
        let mut all = layered();

        assert!(!all.unset("sect1.name0"));
        assert_eq!(all.get("sect1.name0"), None);

        assert_eq!(all.get("sect1.name2"), Some("value-3.1.2"));
        all.set("sect1.name2", "value-3.1.2.2").unwrap();
        assert_eq!(all.get("sect1.name2"), Some("value-3.1.2.2"));
        assert!(all.unset("sect1.name2"));
        assert_eq!(all.get("sect1.name2"), Some("value-2.1.2"));
        assert!(!all.unset("sect1.name2"));
        assert_eq!(all.get("sect1.name2"), Some("value-2.1.2"));

        assert_eq!(
            all.get_all("sect1.name4"),
            Some(vec!["value-2.1.4", "value-3.1.4.1", "value-3.1.4.2"])
        );
        assert!(all.unset_all("sect1.name4"));
        assert_eq!(all.get_all("sect1.name4"), Some(vec!["value-2.1.4"]));
    }

    #[test]
    fn test_set_appends_override_when_only_global() {
        let mut global = ConfigDocument::new();
        global.add("user.name", "global user").unwrap();
        let mut all = ConfigDocument::new();
        all.merge(&global, Scope::GLOBAL);

        all.set("user.name", "local user").unwrap();
        let raw = all.get_raw("user.name").unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].scope(), Scope::GLOBAL);
        assert_eq!(raw[1].scope(), Scope::SELF_);
        assert_eq!(all.get("user.name"), Some("local user"));
    }

    #[test]
    fn test_emptied_key_is_absent() {
        let mut doc = ConfigDocument::new();
        doc.add("a.b", "c").unwrap();
        assert!(doc.unset("a.b"));
        assert_eq!(doc.get("a.b"), None);
        assert_eq!(doc.get_all("a.b"), None);
        assert!(doc.keys().is_empty());
        assert!(doc.is_empty());
        assert!(doc.get_bool("a.b", true).unwrap());
    }

    #[test]
    fn test_invalid_key() {
        let mut doc = ConfigDocument::new();
        assert!(matches!(
            doc.add("nosection", "x"),
            Err(Error::InvalidKey { .. })
        ));
        assert!(doc.set(".key", "x").is_err());
        assert!(doc.set("section.", "x").is_err());
        assert_eq!(doc.get("nosection"), None);
    }

    #[test]
    fn test_add_all_keeps_order() {
        let mut doc = ConfigDocument::new();
        doc.add_all("a.b", ["1", "2", "3"]).unwrap();
        assert_eq!(doc.get_all("a.b"), Some(vec!["1", "2", "3"]));
        assert_eq!(doc.get("a.b"), Some("3"));
    }

    #[test]
    fn test_keys_and_sections_sorted() {
        let doc = parsed("[z]\n\tb = 1\n[a \"x\"]\n\tk = 2\n[a]\n\tz = 3\n\ty = 4\n");
        assert_eq!(doc.keys(), vec!["a.x.k", "a.y", "a.z", "z.b"]);
        assert_eq!(doc.sections().collect::<Vec<_>>(), vec!["a", "a.x", "z"]);
    }
}

//! Identities and the scopes that issue them.
//!
//! A scope guarantees uniqueness of the ids it hands out. [`LocalScope`]
//! accepts proposed ids and disambiguates collisions; [`IntegerScope`]
//! ignores proposals and counts.

use std::{
    collections::HashSet,
    fmt::{Debug, Display, Formatter},
};

use crate::error::IdentityError;

/// An id together with the name of the scope that issued it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    scope: String,
    id: String,
}

impl Identity {
    pub(crate) fn new(scope: &str, id: String) -> Self {
        Self {
            scope: scope.to_string(),
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope_name(&self) -> &str {
        &self.scope
    }

    /// `scope:id`, unique across scopes.
    pub fn universal_id(&self) -> String {
        format!("{}:{}", self.scope, self.id)
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// A namespace issuing unique ids.
pub trait IdentityScope: Debug {
    fn name(&self) -> &str;

    /// Issue a fresh identity. `proposed` is used verbatim when the scope
    /// accepts proposals and it is free, otherwise a variant of it.
    fn new_id(&mut self, proposed: &str) -> Identity;

    fn contains(&self, id: &str) -> bool;

    fn add_id(&mut self, id: &str) -> Result<(), IdentityError>;

    fn remove_id(&mut self, id: &str) -> Result<(), IdentityError>;

    /// Change `identity` to `new_id`, keeping the scope consistent.
    fn rename(&mut self, identity: &mut Identity, new_id: &str) -> Result<(), IdentityError> {
        let _ = (identity, new_id);
        Err(IdentityError::RenameUnsupported {
            scope: self.name().to_string(),
        })
    }
}

/// Return `proposed` if `taken` rejects it, otherwise the first free variant
/// obtained by incrementing a trailing number (appending `1` if there is
/// none).
pub fn unique_string(proposed: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(proposed) {
        return proposed.to_string();
    }
    let stem = proposed.trim_end_matches(|c: char| c.is_ascii_digit());
    let mut counter: u64 = proposed[stem.len()..].parse().unwrap_or(0);
    loop {
        counter += 1;
        let candidate = format!("{stem}{counter}");
        if !taken(&candidate) {
            return candidate;
        }
    }
}

/// A scope that honours proposed ids and supports renaming.
#[derive(Debug, Clone)]
pub struct LocalScope {
    name: String,
    ids: HashSet<String>,
}

impl LocalScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ids: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl IdentityScope for LocalScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_id(&mut self, proposed: &str) -> Identity {
        let id = unique_string(proposed, |s| self.ids.contains(s));
        self.ids.insert(id.clone());
        Identity::new(&self.name, id)
    }

    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn add_id(&mut self, id: &str) -> Result<(), IdentityError> {
        if !self.ids.insert(id.to_string()) {
            return Err(IdentityError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    fn remove_id(&mut self, id: &str) -> Result<(), IdentityError> {
        if !self.ids.remove(id) {
            return Err(IdentityError::UnknownId(id.to_string()));
        }
        Ok(())
    }

    fn rename(&mut self, identity: &mut Identity, new_id: &str) -> Result<(), IdentityError> {
        if !self.ids.contains(identity.id()) {
            return Err(IdentityError::UnknownId(identity.id().to_string()));
        }
        if self.ids.contains(new_id) {
            return Err(IdentityError::DuplicateId(new_id.to_string()));
        }
        self.ids.remove(identity.id());
        self.ids.insert(new_id.to_string());
        identity.id = new_id.to_string();
        Ok(())
    }
}

/// A scope issuing consecutive decimal ids. Proposals are ignored.
#[derive(Debug, Clone)]
pub struct IntegerScope {
    name: String,
    next: u64,
}

impl IntegerScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next: 0,
        }
    }
}

impl IdentityScope for IntegerScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_id(&mut self, _proposed: &str) -> Identity {
        let id = self.next.to_string();
        self.next += 1;
        Identity::new(&self.name, id)
    }

    fn contains(&self, id: &str) -> bool {
        id.parse::<u64>().is_ok_and(|n| n < self.next)
    }

    fn add_id(&mut self, _id: &str) -> Result<(), IdentityError> {
        Err(IdentityError::Unsupported {
            scope: self.name.clone(),
            operation: "add_id",
        })
    }

    fn remove_id(&mut self, _id: &str) -> Result<(), IdentityError> {
        Err(IdentityError::Unsupported {
            scope: self.name.clone(),
            operation: "remove_id",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_string_increments_trailing_number() {
        let taken: HashSet<&str> = ["node0", "node1", "a"].into_iter().collect();
        assert_eq!(unique_string("node0", |s| taken.contains(s)), "node2");
        assert_eq!(unique_string("a", |s| taken.contains(s)), "a1");
        assert_eq!(unique_string("free", |s| taken.contains(s)), "free");
    }

    #[test]
    fn test_local_scope_disambiguates() {
        let mut scope = LocalScope::new("S");
        let a = scope.new_id("x");
        let b = scope.new_id("x");
        assert_eq!(a.id(), "x");
        assert_eq!(b.id(), "x1");
        assert_eq!(b.universal_id(), "S:x1");
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn test_local_scope_rename() {
        let mut scope = LocalScope::new("S");
        let mut a = scope.new_id("a");
        scope.new_id("b");
        assert_eq!(
            scope.rename(&mut a, "b"),
            Err(IdentityError::DuplicateId("b".to_string()))
        );
        scope.rename(&mut a, "c").unwrap();
        assert_eq!(a.id(), "c");
        assert!(scope.contains("c"));
        assert!(!scope.contains("a"));
        assert_eq!(scope.new_id("a").id(), "a");
    }

    #[test]
    fn test_integer_scope() {
        let mut scope = IntegerScope::new("I");
        assert_eq!(scope.new_id("whatever").id(), "0");
        let mut one = scope.new_id("x");
        assert_eq!(one.id(), "1");
        assert!(scope.contains("1"));
        assert!(!scope.contains("2"));
        assert!(matches!(
            scope.rename(&mut one, "z"),
            Err(IdentityError::RenameUnsupported { .. })
        ));
        assert!(scope.remove_id("0").is_err());
    }
}

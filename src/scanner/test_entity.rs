use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A test function found in a `_test.go` file.
///
/// Serializes as `{"name":..,"file":..,"pkg":..}` in that key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestEntity {
    name: String,
    file: String,
    #[serde(rename = "pkg")]
    package: String,
}

impl TestEntity {
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            package: package.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Package and name concatenated with no separator.
    pub fn sort_key(&self) -> String {
        format!("{}{}", self.package, self.name)
    }

    /// Byte-wise comparison of the concatenated sort keys, without
    /// allocating them. `("ab", "c")` and `("a", "bc")` compare equal.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        let lhs = self.package.bytes().chain(self.name.bytes());
        let rhs = other.package.bytes().chain(other.name.bytes());
        lhs.cmp(rhs)
    }
}

impl fmt::Display for TestEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.package, self.name, self.file)
    }
}

/// Stable sort by [`TestEntity::cmp_key`]; entities with equal keys keep
/// their relative order.
pub fn sort_tests(tests: &mut [TestEntity]) {
    tests.sort_by(TestEntity::cmp_key);
}

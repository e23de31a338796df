use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::defaults::TC_ID;
use crate::error::TestCodeError;

/// A 4-digit identifier that makes generated entities unique per test case.
///
/// Derived from a `category-method-testcase` code such as `110-010-001`:
/// `(category / 10 - 1) * 500 + (method / 10 - 1) * 50 + testcase`,
/// zero padded to four digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCode(String);

impl TestCode {
    /// Parse a dashed three-part code into its derived test code.
    pub fn parse(code: &str) -> Result<Self, TestCodeError> {
        let parts: Vec<&str> = code.split('-').collect();
        if parts.len() != 3 {
            return Err(TestCodeError::InvalidFormat(code.to_string()));
        }

        let category: i64 = parts[0]
            .parse()
            .map_err(|_| TestCodeError::InvalidCategory(parts[0].to_string()))?;
        let method: i64 = parts[1]
            .parse()
            .map_err(|_| TestCodeError::InvalidMethod(parts[1].to_string()))?;
        let testcase: i64 = parts[2]
            .parse()
            .map_err(|_| TestCodeError::InvalidTestcase(parts[2].to_string()))?;

        let id = Self::compute_id(category, method, testcase)
            .ok_or_else(|| TestCodeError::OutOfRange(code.to_string()))?;
        Ok(Self::from_id(id))
    }

    /// The numeric testcase id before formatting, `None` on overflow.
    pub fn compute_id(category: i64, method: i64, testcase: i64) -> Option<i64> {
        let category = (category / 10).checked_sub(1)?.checked_mul(500)?;
        let method = (method / 10).checked_sub(1)?.checked_mul(50)?;
        category.checked_add(method)?.checked_add(testcase)
    }

    pub fn from_id(id: i64) -> Self {
        Self(format!("{:04}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TestCode {
    fn default() -> Self {
        Self(TC_ID.to_string())
    }
}

impl fmt::Display for TestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TestCode {
    type Err = TestCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TestCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

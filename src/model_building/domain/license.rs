/// License value object wrapping an SPDX-like license id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct License(String);

impl License {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for License {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Copyright value object wrapping a single copyright statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Copyright(String);

impl Copyright {
    pub fn new(statement: &str) -> Self {
        Self(statement.to_string())
    }

    pub fn statement(&self) -> &str {
        &self.0
    }
}

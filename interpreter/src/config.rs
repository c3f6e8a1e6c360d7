// Runtime configuration for the tree-walking interpreter

/// Default cap on nested blocks and parenthesized expressions during evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub max_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RuntimeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        assert_eq!(RuntimeConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn override_depth() {
        let config = RuntimeConfig::default().with_max_depth(8);
        assert_eq!(config.max_depth, 8);
    }
}

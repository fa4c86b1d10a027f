//! Machine configuration.

use std::str::FromStr;

/// What reading a never-written cell (other than the accumulator) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UninitPolicy {
    /// Fail with `UninitializedCellAccess`.
    #[default]
    Fail,
    /// Materialize 0 in the cell and emit a trace warning.
    Zero,
}

impl FromStr for UninitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(UninitPolicy::Fail),
            "zero" => Ok(UninitPolicy::Zero),
            other => Err(format!("unknown uninitialized-cell policy '{}' (expected fail or zero)", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Shown in the trace when a run starts.
    pub name: Option<String>,
    /// Emit per-instruction trace lines.
    pub verbose: bool,
    pub uninit: UninitPolicy,
}

impl MachineConfig {
    /// Defaults overridden by `RAM_UNINIT` (`fail`/`zero`) and `RAM_VERBOSE=1`.
    ///
    /// Unrecognized values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = MachineConfig::default();
        if let Some(policy) = var("RAM_UNINIT").and_then(|v| v.parse().ok()) {
            config.uninit = policy;
        }
        config.verbose = var("RAM_VERBOSE").is_some_and(|v| v == "1");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("zero".parse::<UninitPolicy>(), Ok(UninitPolicy::Zero));
        assert_eq!("FAIL".parse::<UninitPolicy>(), Ok(UninitPolicy::Fail));
        assert!("random".parse::<UninitPolicy>().is_err());
    }

    #[test]
    fn test_from_vars() {
        let config = MachineConfig::from_vars(|name| match name {
            "RAM_UNINIT" => Some("zero".into()),
            "RAM_VERBOSE" => Some("1".into()),
            _ => None,
        });
        assert_eq!(config.uninit, UninitPolicy::Zero);
        assert!(config.verbose);

        let config = MachineConfig::from_vars(|_| Some("bogus".into()));
        assert_eq!(config, MachineConfig::default());
    }
}

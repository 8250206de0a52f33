use std::fmt::Display;
use serde::{Deserialize, Serialize};
use super::ConfigError;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReadScheme {
    /// Rows are activated one after another
    Sequential,

    /// All rows are activated at once and the column current is summed
    #[default]
    Parallel,
}

/// Raw mode switches as they come from the configuration file.
/// At most one of them may be set.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModeFlags {
    pub conventional_sequential: bool,
    pub conventional_parallel: bool,
    pub bnn_sequential: bool,
    pub xnor_sequential: bool,
    pub bnn_parallel: bool,
    pub xnor_parallel: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    ConventionalSequential,
    ConventionalParallel,
    /// BNN or XNOR network, row-by-row read
    BinarySequential,
    /// BNN or XNOR network, all rows at once
    BinaryParallel,
    DefaultParallel,
    DefaultSequential,
}

impl ModeFlags {
    fn set_flags(&self) -> Vec<&'static str> {
        [
            ("conventional_sequential", self.conventional_sequential),
            ("conventional_parallel", self.conventional_parallel),
            ("bnn_sequential", self.bnn_sequential),
            ("xnor_sequential", self.xnor_sequential),
            ("bnn_parallel", self.bnn_parallel),
            ("xnor_parallel", self.xnor_parallel),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

impl Mode {
    /// Resolve the operating mode. 
    /// 
    /// No flag falls back to the default mode of `scheme`, more than one flag is an error.
    pub fn select(flags: &ModeFlags, scheme: ReadScheme) -> Result<Self, ConfigError> {
        let set = flags.set_flags();
        match set.as_slice() {
            [] => Ok(match scheme {
                ReadScheme::Parallel => Self::DefaultParallel,
                ReadScheme::Sequential => Self::DefaultSequential,
            }),
            [name] => Ok(match *name {
                "conventional_sequential" => Self::ConventionalSequential,
                "conventional_parallel" => Self::ConventionalParallel,
                "bnn_sequential" | "xnor_sequential" => Self::BinarySequential,
                _ => Self::BinaryParallel,
            }),
            _ => Err(ConfigError::AmbiguousMode(set)),
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::ConventionalParallel | Self::BinaryParallel | Self::DefaultParallel)
    }

    pub fn is_conventional(&self) -> bool {
        matches!(self, Self::ConventionalSequential | Self::ConventionalParallel)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConventionalSequential => write!(f, "conventional sequential"),
            Self::ConventionalParallel => write!(f, "conventional parallel"),
            Self::BinarySequential => write!(f, "BNN/XNOR sequential"),
            Self::BinaryParallel => write!(f, "BNN/XNOR parallel"),
            Self::DefaultParallel => write!(f, "default parallel"),
            Self::DefaultSequential => write!(f, "default sequential"),
        }
    }
}

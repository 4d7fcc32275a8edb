//! Analysis passes
//!
//! Each pass is a pure function of a parsed file. Passes never see a file
//! that failed to parse: the orchestrator leaves their slots at
//! `Default::default()` instead.

pub mod accessibility;
pub mod debug_points;
pub mod helpers;
pub mod hooks;
pub mod imports;
pub mod performance;
pub mod syntax;

pub use accessibility::AccessibilityPass;
pub use debug_points::DebugPointsPass;
pub use hooks::{HookUsage, HooksPass, HooksReport};
pub use imports::{ImportInfo, ImportsPass, ImportsReport};
pub use performance::PerformancePass;
pub use syntax::SyntaxPass;

use serde::Serialize;

use crate::parser::ParsedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassName {
    Syntax,
    Lint,
    Imports,
    Hooks,
    Performance,
    Accessibility,
    DebugPoints,
}

impl PassName {
    /// Section order of the rendered report.
    pub const REPORT_ORDER: [PassName; 7] = [
        PassName::Syntax,
        PassName::Lint,
        PassName::Imports,
        PassName::Hooks,
        PassName::Performance,
        PassName::Accessibility,
        PassName::DebugPoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PassName::Syntax => "syntax",
            PassName::Lint => "lint",
            PassName::Imports => "imports",
            PassName::Hooks => "hooks",
            PassName::Performance => "performance",
            PassName::Accessibility => "accessibility",
            PassName::DebugPoints => "debug-points",
        }
    }
}

impl std::fmt::Display for PassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassMetadata {
    pub name: PassName,
    pub description: &'static str,
}

pub trait Pass {
    type Output: Default;

    fn metadata(&self) -> &PassMetadata;
    fn run(&self, file: &ParsedFile) -> Self::Output;
}

#[macro_export]
macro_rules! declare_pass {
    (
        $name:ident,
        name = $pass_name:ident,
        description = $desc:literal
    ) => {
        pub struct $name {
            metadata: $crate::passes::PassMetadata,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    metadata: $crate::passes::PassMetadata {
                        name: $crate::passes::PassName::$pass_name,
                        description: $desc,
                    },
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

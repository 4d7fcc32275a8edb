//! Optimisation suggestions derived from a finished analysis.

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Extra};
use crate::passes::HooksReport;

/// More `useState` calls than this in one file suggests a reducer.
const STATE_HOOK_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: &'static str,
    pub priority: Priority,
}

pub fn suggest_optimizations(performance: &[Diagnostic], hooks: &HooksReport) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let rerender_concern = performance
        .iter()
        .any(|d| matches!(d.extra, Some(Extra::Prop { .. })));
    if rerender_concern {
        suggestions.push(Suggestion {
            message: "Consider using React.memo to prevent unnecessary re-renders",
            priority: Priority::High,
        });
    }

    if hooks.uses("useEffect") {
        suggestions.push(Suggestion {
            message: "Consider using useCallback for function props to optimize re-renders",
            priority: Priority::Medium,
        });
    }

    if hooks.count("useState") > STATE_HOOK_THRESHOLD {
        suggestions.push(Suggestion {
            message: "Consider using useReducer for complex state management",
            priority: Priority::Medium,
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsedFile;
    use crate::passes::{HooksPass, Pass, PerformancePass};

    fn suggest(code: &str) -> Vec<Suggestion> {
        let file = ParsedFile::from_source("App.jsx", code);
        let performance = PerformancePass::new().run(&file);
        let hooks = HooksPass::new().run(&file);
        suggest_optimizations(&performance, &hooks)
    }

    #[test]
    fn clean_component_gets_no_suggestions() {
        assert!(suggest("export const App = () => <main />;").is_empty());
    }

    #[test]
    fn inline_props_suggest_memo() {
        let suggestions = suggest("export const App = () => <Box sx={{ p: 1 }} />;");

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, Priority::High);
        assert!(suggestions[0].message.contains("React.memo"));
    }

    #[test]
    fn effects_suggest_use_callback() {
        let suggestions = suggest("function App() { useEffect(() => {}, []); }");

        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].message.contains("useCallback"));
    }

    #[test]
    fn reducer_needs_more_than_three_state_hooks() {
        let three = suggest("function F() { useState(); useState(); useState(); }");
        let four = suggest("function F() { useState(); useState(); useState(); useState(); }");

        assert!(three.is_empty());
        assert_eq!(four.len(), 1);
        assert!(four[0].message.contains("useReducer"));
    }
}

//! Task-phase inference over the recent tool-call window.
//!
//! Tool-name signal drives the phase; a run of consecutive failures
//! overrides it and forces `Debugging`.

use mentor_core::Phase;

/// Broad classification of a tool by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Read,
    Write,
    Test,
    Plan,
    Deploy,
    Other,
}

/// Classify a tool name into its phase signal.
pub fn classify_tool(tool: &str) -> ToolKind {
    let name = tool.to_lowercase();
    if name.contains("test") {
        return ToolKind::Test;
    }
    if name.contains("deploy") || name.contains("publish") || name.contains("release") {
        return ToolKind::Deploy;
    }
    if name.contains("plan") || name.contains("todo") || name.contains("task") {
        return ToolKind::Plan;
    }
    if name.contains("edit")
        || name.contains("write")
        || name.contains("patch")
        || name.contains("create")
    {
        return ToolKind::Write;
    }
    if name.contains("read")
        || name.contains("grep")
        || name.contains("glob")
        || name.contains("search")
        || name.contains("find")
        || name.contains("ls")
        || name.contains("cat")
    {
        return ToolKind::Read;
    }
    ToolKind::Other
}

/// Infer the current phase from the recent tool window and the failure
/// counter. The failure override has the highest priority.
pub fn infer_phase(
    recent_tools: &[&str],
    consecutive_failures: u32,
    failure_threshold: u32,
    current: Phase,
) -> Phase {
    if consecutive_failures >= failure_threshold {
        return Phase::Debugging;
    }

    let mut reads = 0usize;
    let mut writes = 0usize;
    let mut tests = 0usize;
    let mut plans = 0usize;
    let mut deploys = 0usize;
    for tool in recent_tools {
        match classify_tool(tool) {
            ToolKind::Read => reads += 1,
            ToolKind::Write => writes += 1,
            ToolKind::Test => tests += 1,
            ToolKind::Plan => plans += 1,
            ToolKind::Deploy => deploys += 1,
            ToolKind::Other => {}
        }
    }

    // Listed least-specific first; `max_by_key` keeps the last maximum,
    // so ties resolve toward the more specific phase.
    let counts = [
        (reads, Phase::Exploration),
        (plans, Phase::Planning),
        (writes, Phase::Implementation),
        (tests, Phase::Testing),
        (deploys, Phase::Deployment),
    ];
    let (best_count, best_phase) = counts
        .iter()
        .copied()
        .max_by_key(|(count, _)| *count)
        .unwrap_or((0, current));
    if best_count == 0 {
        current
    } else {
        best_phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_heavy_window_is_exploration() {
        let tools = ["grep", "read_file", "glob", "edit_file"];
        assert_eq!(infer_phase(&tools, 0, 2, Phase::Planning), Phase::Exploration);
    }

    #[test]
    fn write_heavy_window_is_implementation() {
        let tools = ["edit_file", "write_file", "read_file"];
        assert_eq!(
            infer_phase(&tools, 0, 2, Phase::Exploration),
            Phase::Implementation
        );
    }

    #[test]
    fn test_runner_window_is_testing() {
        let tools = ["run_tests", "run_tests", "edit_file"];
        assert_eq!(
            infer_phase(&tools, 0, 2, Phase::Implementation),
            Phase::Testing
        );
    }

    #[test]
    fn failures_override_tool_signal() {
        let tools = ["read_file", "grep", "glob"];
        assert_eq!(infer_phase(&tools, 2, 2, Phase::Exploration), Phase::Debugging);
    }

    #[test]
    fn one_failure_does_not_override() {
        let tools = ["read_file", "grep"];
        assert_eq!(infer_phase(&tools, 1, 2, Phase::Exploration), Phase::Exploration);
    }

    #[test]
    fn empty_window_keeps_current_phase() {
        assert_eq!(infer_phase(&[], 0, 2, Phase::Testing), Phase::Testing);
    }
}

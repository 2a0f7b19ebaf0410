// Replay scripts: a JSON array of navigation steps driven through a shell

use route_tabs::{AddOutcome, RemoveOutcome, Route, Shell};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Navigate(Route),
    Close(usize),
    Activate(usize),
}

pub fn parse_script(data: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(data)
}

/// Apply each step and describe what happened, one line per step.
pub fn run_script(shell: &mut Shell, steps: Vec<Step>) -> Vec<String> {
    steps
        .into_iter()
        .map(|step| match step {
            Step::Navigate(route) => {
                let target = if route.full_path.is_empty() {
                    route.path.clone()
                } else {
                    route.full_path.clone()
                };
                match shell.navigate(route) {
                    AddOutcome::Inserted(i) => format!("navigate {}: opened tab {}", target, i),
                    AddOutcome::Activated(i) => format!("navigate {}: switched to tab {}", target, i),
                    AddOutcome::Adopted(i) => format!("navigate {}: restored tabs, active {}", target, i),
                    AddOutcome::Vetoed => format!("navigate {}: not a tab", target),
                }
            }
            Step::Close(index) => match shell.close(index) {
                RemoveOutcome::Removed(route) => format!("close {}: closed {}", index, route.path),
                RemoveOutcome::Vetoed => format!("close {}: tab is pinned", index),
                RemoveOutcome::OutOfRange => format!("close {}: no such tab", index),
            },
            Step::Activate(index) => {
                if shell.activate(index) {
                    format!("activate {}: ok", index)
                } else {
                    format!("activate {}: no such tab", index)
                }
            }
        })
        .collect()
}

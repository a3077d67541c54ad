// tasks.rs - Planning of matrix variants to compute and write

use crate::core::{Correction, Normalization};
use crate::error::Result;
use std::fmt;

/// Near-miss spelling of `joint` that is skipped without producing a task
const JOIN_NEAR_MISS: &str = "join";

/// One matrix variant to compute and persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Plain mutual information
    Base,
    Norm(Normalization),
    Corr(Correction),
}

impl Task {
    /// Filename suffix placed between the output prefix and the extension
    pub fn suffix(&self) -> String {
        match self {
            Task::Base => String::new(),
            Task::Norm(norm) => format!("_norm_{}", norm.name()),
            Task::Corr(corr) => format!("_corr_{}", corr.name()),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Base => write!(f, "mutual information"),
            Task::Norm(norm) => write!(f, "'{}' normalization", norm),
            Task::Corr(corr) => write!(f, "'{}' correction", corr),
        }
    }
}

/// Turn requested normalization and correction names into an ordered task list.
///
/// The base task always comes first. A requested `joint` normalization is emitted
/// once, ahead of every other normalization. The literal `join` is ignored. Other
/// names keep their order and repeats.
pub fn plan_tasks(
    normalization: Option<&[String]>,
    correction: Option<&[String]>,
) -> Result<Vec<Task>> {
    let mut tasks = vec![Task::Base];

    if let Some(names) = normalization {
        let joint = Normalization::Joint.name();
        if names.iter().any(|name| name == joint) {
            tasks.push(Task::Norm(Normalization::Joint));
        }
        for name in names {
            if name == JOIN_NEAR_MISS || name == joint {
                continue;
            }
            tasks.push(Task::Norm(name.parse()?));
        }
    }

    if let Some(names) = correction {
        for name in names {
            tasks.push(Task::Corr(name.parse()?));
        }
    }

    Ok(tasks)
}

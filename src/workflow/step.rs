use serde::{Deserialize, Serialize};

/// Stage of the guided search flow, in the order the UI walks through them
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    #[default]
    Search,
    Filter,
    Map,
    Save,
    Results,
}

impl WorkflowStep {
    pub const ORDER: [WorkflowStep; 5] = [
        WorkflowStep::Search,
        WorkflowStep::Filter,
        WorkflowStep::Map,
        WorkflowStep::Save,
        WorkflowStep::Results,
    ];

    /// Progress shown when the step is entered directly
    pub fn progress(self) -> u8 {
        match self {
            WorkflowStep::Search => 0,
            WorkflowStep::Filter => 25,
            WorkflowStep::Map => 50,
            WorkflowStep::Save => 75,
            WorkflowStep::Results => 100,
        }
    }

    fn position(self) -> usize {
        match self {
            WorkflowStep::Search => 0,
            WorkflowStep::Filter => 1,
            WorkflowStep::Map => 2,
            WorkflowStep::Save => 3,
            WorkflowStep::Results => 4,
        }
    }

    /// Following step, `None` at the end of the flow
    pub fn next(self) -> Option<WorkflowStep> {
        Self::ORDER.get(self.position() + 1).copied()
    }

    /// Preceding step, `None` at the start of the flow
    pub fn previous(self) -> Option<WorkflowStep> {
        self.position()
            .checked_sub(1)
            .and_then(|index| Self::ORDER.get(index).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Search => "search",
            WorkflowStep::Filter => "filter",
            WorkflowStep::Map => "map",
            WorkflowStep::Save => "save",
            WorkflowStep::Results => "results",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowStep {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|step| step.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown workflow step: {value}"))
    }
}

/// Progress value while a search is in flight
pub const SEARCH_IN_FLIGHT_PROGRESS: u8 = 80;

/// Progress added by each filter edit
pub const FILTER_EDIT_INCREMENT: u8 = 10;

pub const MAX_PROGRESS: u8 = 100;

/// Current step plus the 0..=100 completion indicator.
///
/// Step and progress are only guaranteed to agree right after a direct step
/// change (`set`, `advance`, `retreat`). Filter edits bump progress without
/// moving the step, and the panel toggles move the step without touching
/// progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepTracker {
    step: WorkflowStep,
    progress: u8,
}

impl StepTracker {
    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Jump to `step` and reset progress from the fixed mapping
    pub fn set(&mut self, step: WorkflowStep) {
        self.step = step;
        self.progress = step.progress();
    }

    /// Move one step forward; no-op at `Results`
    pub fn advance(&mut self) -> bool {
        match self.step.next() {
            Some(step) => {
                self.set(step);
                true
            }
            None => false,
        }
    }

    /// Move one step back; no-op at `Search`
    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.set(step);
                true
            }
            None => false,
        }
    }

    /// Change the step while leaving progress untouched
    pub fn enter(&mut self, step: WorkflowStep) {
        self.step = step;
    }

    pub fn bump(&mut self, amount: u8) {
        self.progress = self.progress.saturating_add(amount).min(MAX_PROGRESS);
    }

    pub fn begin_search(&mut self) {
        self.step = WorkflowStep::Results;
        self.progress = SEARCH_IN_FLIGHT_PROGRESS;
    }

    pub fn finish_search(&mut self) {
        self.progress = MAX_PROGRESS;
    }
}

//! Configuration knobs for the expansion engine and the top-level decision
//! procedure (§6/§7).

/// Options controlling [`crate::expand::expand`] (§4.3).
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    /// Whether the analytic cut rule (rule 4) is applied at all.
    pub enable_cuts: bool,
    /// Whether cuts are restricted by the coalition side-conditions
    /// C11/C12/C21/C22, or left unrestricted (cut on every `D`/`C`
    /// sub-formula candidate).
    pub restricted_cuts: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            enable_cuts: true,
            restricted_cuts: true,
        }
    }
}

/// The progress tags an observer may be notified of while
/// [`crate::decide::decide`] runs a formula through the three tableau
/// phases (§6: `"construction" | "prestate-elim" | "state-elim" |
/// "verdict"`), each split into a started/finished pair except `verdict`,
/// which fires once with the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    /// `"construction"` (Phase 1, rules SR/DR) has begun.
    ConstructionStarted,
    /// `"construction"` has finished; the pretableau has this many nodes.
    ConstructionFinished { prestates: usize, states: usize },
    /// `"prestate-elim"` (Phase 2, rule PR) has begun.
    PrestateElimStarted,
    /// `"prestate-elim"` has finished; the initial tableau has this many
    /// states.
    PrestateElimFinished { states: usize },
    /// `"state-elim"` (Phase 3, rules E1/E2) has begun.
    StateElimStarted,
    /// `"state-elim"` has finished; this many states survived.
    StateElimFinished { states_remaining: usize },
    /// `"verdict"`: the final satisfiability result.
    Verdict { satisfiable: bool },
}

/// A progress observer. Invoked from the driver only, never from inside a
/// `catch_unwind`: a panicking observer is a caller bug and is allowed to
/// propagate (§7).
pub type ProgressFn = Box<dyn FnMut(ProgressStage)>;

/// Options controlling [`crate::decide::decide`] (§6/§7).
pub struct DecideOptions {
    /// Whether the analytic cut rule is applied during expansion.
    pub enable_cuts: bool,
    /// Whether cuts are restricted by the coalition side-conditions.
    pub restricted_cuts: bool,
    /// Defensive cap on the number of states/prestates/edges the tableau
    /// may grow to before the driver aborts with
    /// [`crate::error::TableauError::InternalLimit`]. `None` (the default)
    /// means no cap.
    pub node_limit: Option<usize>,
    /// Optional progress observer.
    pub on_progress: Option<ProgressFn>,
}

impl DecideOptions {
    pub(crate) fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            enable_cuts: self.enable_cuts,
            restricted_cuts: self.restricted_cuts,
        }
    }
}

impl Default for DecideOptions {
    fn default() -> Self {
        DecideOptions {
            enable_cuts: true,
            restricted_cuts: true,
            node_limit: None,
            on_progress: None,
        }
    }
}

impl std::fmt::Debug for DecideOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecideOptions")
            .field("enable_cuts", &self.enable_cuts)
            .field("restricted_cuts", &self.restricted_cuts)
            .field("node_limit", &self.node_limit)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let expand = ExpandOptions::default();
        assert!(expand.enable_cuts);
        assert!(expand.restricted_cuts);

        let decide = DecideOptions::default();
        assert!(decide.enable_cuts);
        assert!(decide.restricted_cuts);
        assert!(decide.node_limit.is_none());
        assert!(decide.on_progress.is_none());
    }
}

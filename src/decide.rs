//! Top-level decision procedure: the `decide` driver of §6, wiring the
//! three tableau phases together with progress notification and the
//! optional resource cap of §7.

use tracing::info;

use crate::core::formula::Formula;
use crate::error::{Result, TableauError};
use crate::options::{DecideOptions, ProgressFn, ProgressStage};
use crate::result::TableauResult;
use crate::tableau::construction::construct;
use crate::tableau::prestate_elim::eliminate_prestates;
use crate::tableau::state_elim::eliminate_states;
use crate::tableau::Pretableau;

/// Runs θ through construction, prestate elimination, and state elimination,
/// returning the verdict and every graph artifact (§4.5).
///
/// Never returns an error for an unsatisfiable or contradictory formula —
/// only for a caller bug (an `InvariantViolation` surfaced from a
/// constructor) or an exceeded `node_limit` (§7).
pub fn decide(theta: &Formula, mut options: DecideOptions) -> Result<TableauResult> {
    let mut on_progress = options.on_progress.take();
    let expand_options = options.expand_options();

    notify(&mut on_progress, ProgressStage::ConstructionStarted);
    let pretableau = construct(theta, expand_options);
    check_node_limit(&pretableau, options.node_limit)?;
    notify(
        &mut on_progress,
        ProgressStage::ConstructionFinished {
            prestates: pretableau.prestates.len(),
            states: pretableau.states.len(),
        },
    );
    info!(
        prestates = pretableau.prestates.len(),
        states = pretableau.states.len(),
        "pretableau constructed"
    );

    notify(&mut on_progress, ProgressStage::PrestateElimStarted);
    let initial_tableau = eliminate_prestates(&pretableau);
    notify(
        &mut on_progress,
        ProgressStage::PrestateElimFinished {
            states: initial_tableau.states.len(),
        },
    );

    notify(&mut on_progress, ProgressStage::StateElimStarted);
    let (final_tableau, elimination_trace) = eliminate_states(&initial_tableau);
    notify(
        &mut on_progress,
        ProgressStage::StateElimFinished {
            states_remaining: final_tableau.states.len(),
        },
    );
    info!(
        removed = elimination_trace.len(),
        remaining = final_tableau.states.len(),
        "state elimination finished"
    );

    let result = TableauResult::from_phases(
        theta.clone(),
        pretableau,
        initial_tableau,
        final_tableau,
        elimination_trace,
    );
    notify(
        &mut on_progress,
        ProgressStage::Verdict { satisfiable: result.satisfiable },
    );

    Ok(result)
}

/// Invoked from the driver only, never from inside a `catch_unwind`: a
/// panicking observer is a caller bug and is allowed to propagate (§7).
fn notify(on_progress: &mut Option<ProgressFn>, stage: ProgressStage) {
    if let Some(callback) = on_progress {
        callback(stage);
    }
}

fn check_node_limit(pretableau: &Pretableau, limit: Option<usize>) -> Result<()> {
    let Some(limit) = limit else {
        return Ok(());
    };
    let size = pretableau.prestates.len()
        + pretableau.states.len()
        + pretableau.dashed_edges.len()
        + pretableau.solid_edges.len();
    if size > limit {
        return Err(TableauError::InternalLimit(format!(
            "pretableau size {size} exceeds configured node_limit {limit}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::Agent;

    #[test]
    fn atom_is_satisfiable() {
        let p = Formula::atom("p");
        let result = decide(&p, DecideOptions::default()).unwrap();
        assert!(result.satisfiable);
    }

    #[test]
    fn contradiction_is_unsatisfiable_with_empty_final_tableau() {
        let p = Formula::atom("p");
        let theta = Formula::and(p.clone(), p.negate());
        let result = decide(&theta, DecideOptions::default()).unwrap();
        assert!(!result.satisfiable);
        assert!(result.final_tableau.states.is_empty());
    }

    #[test]
    fn node_limit_zero_always_trips() {
        let p = Formula::atom("p");
        let options = DecideOptions {
            node_limit: Some(0),
            ..DecideOptions::default()
        };
        let err = decide(&p, options).unwrap_err();
        assert!(matches!(err, TableauError::InternalLimit(_)));
    }

    #[test]
    fn progress_observer_is_invoked_in_order() {
        let a = Agent::new("a");
        let p = Formula::atom("p");
        let theta = Formula::k(a, p);
        let stages = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let recorded = stages.clone();
        let options = DecideOptions {
            on_progress: Some(Box::new(move |stage| recorded.borrow_mut().push(stage))),
            ..DecideOptions::default()
        };
        decide(&theta, options).unwrap();
        let recorded = stages.borrow();
        assert!(matches!(recorded[0], ProgressStage::ConstructionStarted));
        assert!(matches!(recorded[1], ProgressStage::ConstructionFinished { .. }));
        assert!(matches!(recorded[2], ProgressStage::PrestateElimStarted));
        assert!(matches!(recorded[3], ProgressStage::PrestateElimFinished { .. }));
        assert!(matches!(recorded[4], ProgressStage::StateElimStarted));
        assert!(matches!(recorded[5], ProgressStage::StateElimFinished { .. }));
        assert!(matches!(recorded[6], ProgressStage::Verdict { .. }));
    }
}

//! Hand-tuned static evaluation.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Side, LAST_PIT, PITS_PER_SIDE, WIN_THRESHOLD};

use super::Evaluator;

/// Weights for [`HeuristicEvaluator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per stone of kazan lead.
    pub kazan: f64,

    /// Returned as-is (positive or negative) once a kazan reaches 82.
    pub decisive: f64,

    /// Flat value of owning a tuzdyk.
    pub tuzdyk_base: f64,

    /// Extra tuzdyk value per step towards the middle pit (index 4).
    pub tuzdyk_center: f64,

    /// Per opponent pit holding exactly two stones that could still become our tuzdyk.
    pub tuzdyk_threat: f64,

    /// Per stone left in a pit.
    pub material: f64,

    /// Multiplier on `material` for pits 3, 4 and 5.
    pub center_material: f64,

    /// Per opponent pit with an odd count (one more stone makes it capturable).
    pub odd_pit: f64,

    /// Per legal move of difference.
    pub mobility: f64,

    /// Board stone count below which the late-game kazan term applies.
    pub endgame_threshold: u32,

    /// Additional weight per stone of kazan lead in the late game.
    pub endgame_kazan: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            kazan: 10.0,
            decisive: 10_000.0,
            tuzdyk_base: 25.0,
            tuzdyk_center: 3.0,
            tuzdyk_threat: 8.0,
            material: 0.3,
            center_material: 1.2,
            odd_pit: 0.5,
            mobility: 1.5,
            endgame_threshold: 50,
            endgame_kazan: 5.0,
        }
    }
}

impl EvalWeights {
    /// Value of a tuzdyk at `index`; pits near the middle are worth more.
    #[must_use]
    pub fn tuzdyk_value(&self, index: usize) -> f64 {
        let centrality = 4.0 - (4.0 - index as f64).abs();
        self.tuzdyk_base + centrality * self.tuzdyk_center
    }
}

/// Weighted sum of kazan lead, tuzdyks, material and mobility.
#[derive(Clone, Debug, Default)]
pub struct HeuristicEvaluator {
    weights: EvalWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl Evaluator for HeuristicEvaluator {
    fn score(&self, state: &GameState, perspective: Side) -> f64 {
        let w = &self.weights;
        let me = perspective;
        let opp = me.opponent();

        if state.kazan[me] >= WIN_THRESHOLD {
            return w.decisive;
        }
        if state.kazan[opp] >= WIN_THRESHOLD {
            return -w.decisive;
        }

        let lead = f64::from(state.kazan_lead(me));
        let mut score = lead * w.kazan;

        if let Some(index) = state.tuzdyk[me] {
            score += w.tuzdyk_value(index);
        }
        if let Some(index) = state.tuzdyk[opp] {
            score -= w.tuzdyk_value(index);
        }

        if state.tuzdyk[me].is_none() {
            let threats = (0..LAST_PIT)
                .filter(|&i| state.pits[opp][i] == 2 && state.can_create_tuzdyk(me, i))
                .count();
            score += threats as f64 * w.tuzdyk_threat;
        }

        for i in 0..PITS_PER_SIDE {
            let mine = f64::from(state.pits[me][i]);
            let theirs = state.pits[opp][i];
            let factor = if (3..=5).contains(&i) { w.center_material } else { 1.0 };

            score += (mine - f64::from(theirs)) * w.material * factor;
            if theirs % 2 == 1 {
                score += w.odd_pit;
            }
        }

        let mobility = state.legal_moves(me).len() as f64 - state.legal_moves(opp).len() as f64;
        score += mobility * w.mobility;

        if state.stones_on_board() < w.endgame_threshold {
            score += lead * w.endgame_kazan;
        }

        score
    }
}

//! Computes which figures the rubber band currently covers.
//!
//! Figures whose bounds overlap the band but fail the exact hit test are kept
//! as holdovers and re-tested on later frames without another broad-phase
//! query.

use crate::figure::{FigureId, FigureLayer};
use eframe::egui::Rect;
use std::collections::HashSet;

/// The result of one frame: figures hit by the band and the retained misses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSets {
    pub fresh: HashSet<FigureId>,
    pub holdovers: HashSet<FigureId>,
}

/// Changes between two consecutive frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDelta {
    /// Figures hit now but not on the previous frame.
    pub entered: Vec<FigureId>,
    /// Figures hit on the previous frame but not now.
    pub exited: Vec<FigureId>,
}

impl FrameDelta {
    pub fn between(previous: &HashSet<FigureId>, fresh: &HashSet<FigureId>) -> Self {
        let mut entered: Vec<FigureId> = fresh.difference(previous).copied().collect();
        let mut exited: Vec<FigureId> = previous.difference(fresh).copied().collect();
        entered.sort_unstable();
        exited.sort_unstable();
        Self { entered, exited }
    }

    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FigureSetDiffer;

impl FigureSetDiffer {
    /// Produces the exact set of figures hit by `rect`.
    ///
    /// `holdovers` is left untouched; the updated holdovers are part of the
    /// returned [`FrameSets`].
    pub fn recompute(
        &self,
        layer: &dyn FigureLayer,
        rect: Rect,
        holdovers: &HashSet<FigureId>,
    ) -> FrameSets {
        let mut fresh = HashSet::new();
        let mut missed = HashSet::new();

        for candidate in layer.intersected_figures(rect) {
            let figure = layer.undecorated(candidate);
            if layer.hit(figure, rect) {
                fresh.insert(figure);
            } else {
                missed.insert(figure);
            }
        }

        for &figure in holdovers {
            if fresh.contains(&figure) {
                continue;
            }
            if layer.hit(figure, rect) {
                fresh.insert(figure);
            } else {
                missed.insert(figure);
            }
        }

        log::trace!(
            "band {:?}: {} hit, {} held over",
            rect,
            fresh.len(),
            missed.len()
        );

        FrameSets {
            fresh,
            holdovers: missed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::InteractorRef;
    use eframe::egui;
    use std::cell::Cell;

    /// Layer whose broad phase returns a fixed list and whose hit test is a
    /// closure, counting broad-phase queries.
    struct StubLayer {
        candidates: Vec<FigureId>,
        decorators: Vec<(FigureId, FigureId)>,
        hits: Box<dyn Fn(FigureId, Rect) -> bool>,
        queries: Cell<usize>,
    }

    impl FigureLayer for StubLayer {
        fn intersected_figures(&self, _region: Rect) -> Vec<FigureId> {
            self.queries.set(self.queries.get() + 1);
            self.candidates.clone()
        }

        fn hit(&self, figure: FigureId, region: Rect) -> bool {
            (self.hits)(figure, region)
        }

        fn decorated_figure(&self, figure: FigureId) -> Option<FigureId> {
            self.decorators
                .iter()
                .find(|(decorator, _)| *decorator == figure)
                .map(|(_, base)| *base)
        }

        fn interactor(&self, _figure: FigureId) -> Option<InteractorRef> {
            None
        }
    }

    fn rect(w: f32) -> Rect {
        Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(w, w))
    }

    #[test]
    fn splits_candidates_into_hits_and_holdovers() {
        let layer = StubLayer {
            candidates: vec![FigureId(1), FigureId(2)],
            decorators: vec![],
            hits: Box::new(|f, _| f == FigureId(1)),
            queries: Cell::new(0),
        };

        let sets = FigureSetDiffer.recompute(&layer, rect(10.0), &HashSet::new());
        assert_eq!(sets.fresh, HashSet::from([FigureId(1)]));
        assert_eq!(sets.holdovers, HashSet::from([FigureId(2)]));
    }

    #[test]
    fn holdovers_are_retested_without_broad_phase() {
        // Figure 7 only hits once the band is wider than 20.
        let layer = StubLayer {
            candidates: vec![],
            decorators: vec![],
            hits: Box::new(|f, r| f == FigureId(7) && r.width() > 20.0),
            queries: Cell::new(0),
        };
        let holdovers = HashSet::from([FigureId(7)]);

        let small = FigureSetDiffer.recompute(&layer, rect(10.0), &holdovers);
        assert!(small.fresh.is_empty());
        assert_eq!(small.holdovers, holdovers);

        let large = FigureSetDiffer.recompute(&layer, rect(30.0), &small.holdovers);
        assert_eq!(large.fresh, HashSet::from([FigureId(7)]));
        assert!(large.holdovers.is_empty());
        assert_eq!(layer.queries.get(), 2);
    }

    #[test]
    fn decorators_resolve_to_base_figure() {
        let layer = StubLayer {
            candidates: vec![FigureId(100)],
            decorators: vec![(FigureId(100), FigureId(10)), (FigureId(10), FigureId(1))],
            hits: Box::new(|f, _| f == FigureId(1)),
            queries: Cell::new(0),
        };

        let sets = FigureSetDiffer.recompute(&layer, rect(5.0), &HashSet::new());
        assert_eq!(sets.fresh, HashSet::from([FigureId(1)]));
    }

    #[test]
    fn delta_reports_sorted_transitions() {
        let previous = HashSet::from([FigureId(3), FigureId(1), FigureId(2)]);
        let fresh = HashSet::from([FigureId(2), FigureId(5), FigureId(4)]);
        let delta = FrameDelta::between(&previous, &fresh);

        assert_eq!(delta.entered, vec![FigureId(4), FigureId(5)]);
        assert_eq!(delta.exited, vec![FigureId(1), FigureId(3)]);
        assert!(FrameDelta::between(&fresh, &fresh).is_empty());
    }
}

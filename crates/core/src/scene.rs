//! In-memory figure layer.
//!
//! A [`Scene`] holds rectangle and ellipse figures, decorators wrapping other
//! figures, and the interactors figures belong to. Scenes are described in
//! JSON:
//!
//! ```json
//! {
//!   "interactors": [{ "id": 1, "name": "nodes", "mode": "multiple" }],
//!   "figures": [
//!     { "id": 1, "shape": { "rect": { "x": 10, "y": 10, "width": 40, "height": 20 } }, "interactor": 1 },
//!     { "id": 2, "shape": { "rect": { "x": 8, "y": 8, "width": 44, "height": 24 } }, "decorates": 1 }
//!   ]
//! }
//! ```
//!
//! The broad phase is a linear scan over top-level figures, each tested with
//! the union of its own bounds and those of every figure it wraps.

use crate::error::{AppError, Result};
use crate::figure::{
    FigureId, FigureLayer, Interactor, InteractorId, InteractorRef, SelectionModel,
    SharedSelectionModel,
};
use crate::geometry::{ellipse_overlaps, overlaps};
use crate::model::{BasicSelectionModel, SelectionMode};
use eframe::egui::{self, Rect};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Axis-aligned bounds as written in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn to_rect(self) -> Rect {
        Rect::from_min_size(egui::pos2(self.x, self.y), egui::vec2(self.width, self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rect(Bounds),
    /// Ellipse inscribed in the bounds.
    Ellipse(Bounds),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(b) | Shape::Ellipse(b) => b.to_rect(),
        }
    }

    pub fn hit(&self, region: Rect) -> bool {
        match self {
            Shape::Rect(b) => overlaps(b.to_rect(), region),
            Shape::Ellipse(b) => ellipse_overlaps(b.to_rect(), region),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractorDescription {
    pub id: InteractorId,
    #[serde(default)]
    pub name: String,
    /// Whether the interactor carries a selection model.
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default)]
    pub mode: SelectionMode,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureDescription {
    pub id: FigureId,
    pub shape: Shape,
    #[serde(default)]
    pub interactor: Option<InteractorId>,
    /// The figure this one decorates.
    #[serde(default)]
    pub decorates: Option<FigureId>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Serialized form of a [`Scene`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub interactors: Vec<InteractorDescription>,
    #[serde(default)]
    pub figures: Vec<FigureDescription>,
}

/// Interactor living in a scene.
pub struct SceneInteractor {
    id: InteractorId,
    name: String,
    model: RefCell<Option<Rc<RefCell<BasicSelectionModel>>>>,
}

impl SceneInteractor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> Option<Rc<RefCell<BasicSelectionModel>>> {
        self.model.borrow().clone()
    }
}

impl Interactor for SceneInteractor {
    fn id(&self) -> InteractorId {
        self.id
    }

    fn selection_model(&self) -> Option<SharedSelectionModel> {
        self.model().map(|m| m as SharedSelectionModel)
    }
}

pub struct Scene {
    figures: Vec<FigureDescription>,
    index: HashMap<FigureId, usize>,
    decorated: HashSet<FigureId>,
    interactors: Vec<Rc<SceneInteractor>>,
}

impl Scene {
    /// Loads and validates a scene file.
    ///
    /// # Errors
    /// - [`AppError::SceneNotFound`] if `path` does not exist
    /// - [`AppError::Json`] if the file is not a scene description
    /// - [`AppError::InvalidScene`] if the description is inconsistent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::SceneNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let description: SceneDescription = serde_json::from_str(&content)?;
        let scene = Self::from_description(description)?;
        log::info!(
            "loaded {} figures and {} interactors from {}",
            scene.figures.len(),
            scene.interactors.len(),
            path.display()
        );
        Ok(scene)
    }

    pub fn from_description(description: SceneDescription) -> Result<Self> {
        let mut interactors: Vec<Rc<SceneInteractor>> = Vec::new();
        for desc in description.interactors {
            if interactors.iter().any(|i| i.id == desc.id) {
                return Err(AppError::scene(format!("duplicate interactor {}", desc.id)));
            }
            let model = desc.selectable.then(|| BasicSelectionModel::shared(desc.mode));
            interactors.push(Rc::new(SceneInteractor {
                id: desc.id,
                name: desc.name,
                model: RefCell::new(model),
            }));
        }

        let mut index = HashMap::new();
        for (i, figure) in description.figures.iter().enumerate() {
            if index.insert(figure.id, i).is_some() {
                return Err(AppError::scene(format!("duplicate figure {}", figure.id)));
            }
            let bounds = figure.shape.bounds();
            if !(bounds.width() >= 0.0 && bounds.height() >= 0.0) {
                return Err(AppError::scene(format!("figure {} has invalid size", figure.id)));
            }
        }

        let mut decorated = HashSet::new();
        for figure in &description.figures {
            if let Some(owner) = figure.interactor {
                if !interactors.iter().any(|i| i.id == owner) {
                    return Err(AppError::scene(format!(
                        "figure {} refers to unknown interactor {}",
                        figure.id, owner
                    )));
                }
            }
            if let Some(inner) = figure.decorates {
                if !index.contains_key(&inner) {
                    return Err(AppError::scene(format!(
                        "figure {} decorates unknown figure {}",
                        figure.id, inner
                    )));
                }
                if !decorated.insert(inner) {
                    return Err(AppError::scene(format!("figure {} is decorated twice", inner)));
                }
            }
        }

        let scene = Self {
            figures: description.figures,
            index,
            decorated,
            interactors,
        };
        scene.check_decorator_cycles()?;
        Ok(scene)
    }

    fn check_decorator_cycles(&self) -> Result<()> {
        for figure in &self.figures {
            let mut seen = HashSet::from([figure.id]);
            let mut current = figure.decorates;
            while let Some(inner) = current {
                if !seen.insert(inner) {
                    return Err(AppError::scene(format!(
                        "decorator cycle through figure {}",
                        figure.id
                    )));
                }
                current = self.figure(inner).and_then(|f| f.decorates);
            }
        }
        Ok(())
    }

    /// Small scene used when no scene file is given.
    pub fn demo() -> Result<Self> {
        let rect = |x, y, width, height| Shape::Rect(Bounds { x, y, width, height });
        let ellipse = |x, y, width, height| Shape::Ellipse(Bounds { x, y, width, height });
        let figure = |id: u64,
                      shape: Shape,
                      interactor: Option<u64>,
                      decorates: Option<u64>,
                      label: &str| FigureDescription {
            id: FigureId(id),
            shape,
            interactor: interactor.map(InteractorId),
            decorates: decorates.map(FigureId),
            label: Some(label.to_string()),
        };

        let description = SceneDescription {
            interactors: vec![
                InteractorDescription {
                    id: InteractorId(1),
                    name: "nodes".into(),
                    selectable: true,
                    mode: SelectionMode::Multiple,
                },
                InteractorDescription {
                    id: InteractorId(2),
                    name: "markers".into(),
                    selectable: true,
                    mode: SelectionMode::Multiple,
                },
                InteractorDescription {
                    id: InteractorId(3),
                    name: "labels".into(),
                    selectable: false,
                    mode: SelectionMode::Multiple,
                },
            ],
            figures: vec![
                figure(1, rect(80.0, 80.0, 120.0, 60.0), Some(1), None, "source"),
                figure(2, rect(320.0, 90.0, 120.0, 60.0), Some(1), None, "filter"),
                figure(3, rect(560.0, 80.0, 120.0, 60.0), Some(1), None, "sink"),
                figure(4, ellipse(120.0, 260.0, 160.0, 160.0), Some(2), None, "star A"),
                figure(5, ellipse(400.0, 300.0, 90.0, 90.0), Some(2), None, "star B"),
                figure(6, rect(600.0, 300.0, 80.0, 80.0), Some(2), None, "marker"),
                figure(7, rect(592.0, 292.0, 96.0, 96.0), None, Some(6), "halo"),
                figure(8, rect(80.0, 480.0, 200.0, 24.0), Some(3), None, "caption"),
            ],
        };

        Self::from_description(description)
    }

    pub fn figure(&self, id: FigureId) -> Option<&FigureDescription> {
        self.index.get(&id).map(|&i| &self.figures[i])
    }

    pub fn figures(&self) -> impl Iterator<Item = &FigureDescription> {
        self.figures.iter()
    }

    pub fn figure_ids(&self) -> impl Iterator<Item = FigureId> + '_ {
        self.figures.iter().map(|f| f.id)
    }

    pub fn interactors(&self) -> impl Iterator<Item = InteractorRef> + '_ {
        self.interactors.iter().map(|i| i.clone() as InteractorRef)
    }

    pub fn scene_interactor(&self, id: InteractorId) -> Option<&Rc<SceneInteractor>> {
        self.interactors.iter().find(|i| i.id == id)
    }

    pub fn model_of(&self, id: InteractorId) -> Option<Rc<RefCell<BasicSelectionModel>>> {
        self.scene_interactor(id).and_then(|i| i.model())
    }

    /// Replaces the selection model of an interactor.
    pub fn set_model(&self, id: InteractorId, model: Rc<RefCell<BasicSelectionModel>>) {
        if let Some(interactor) = self.scene_interactor(id) {
            *interactor.model.borrow_mut() = Some(model);
        }
    }

    /// Bounds of `figure` joined with the bounds of every figure it wraps.
    fn reach(&self, figure: &FigureDescription) -> Rect {
        let mut bounds = figure.shape.bounds();
        let mut current = figure.decorates;
        while let Some(inner) = current.and_then(|id| self.figure(id)) {
            bounds = bounds.union(inner.shape.bounds());
            current = inner.decorates;
        }
        bounds
    }

    /// Selected figures of an interactor, in ascending id order.
    pub fn selection_of(&self, id: InteractorId) -> Vec<FigureId> {
        self.model_of(id)
            .map(|m| m.borrow().selection().collect())
            .unwrap_or_default()
    }

    /// Returns true if the owner of `figure` has it selected.
    pub fn is_selected(&self, figure: FigureId) -> bool {
        let base = self.undecorated(figure);
        self.figure(base)
            .and_then(|f| f.interactor)
            .and_then(|owner| self.model_of(owner))
            .is_some_and(|m| m.borrow().contains(base))
    }
}

impl FigureLayer for Scene {
    fn intersected_figures(&self, region: Rect) -> Vec<FigureId> {
        self.figures
            .iter()
            .filter(|f| !self.decorated.contains(&f.id))
            .filter(|f| overlaps(self.reach(f), region))
            .map(|f| f.id)
            .collect()
    }

    fn hit(&self, figure: FigureId, region: Rect) -> bool {
        match self.figure(figure) {
            Some(f) => match f.decorates {
                Some(inner) => self.hit(inner, region),
                None => f.shape.hit(region),
            },
            None => false,
        }
    }

    fn decorated_figure(&self, figure: FigureId) -> Option<FigureId> {
        self.figure(figure).and_then(|f| f.decorates)
    }

    fn interactor(&self, figure: FigureId) -> Option<InteractorRef> {
        let owner = self.figure(figure)?.interactor?;
        self.scene_interactor(owner).map(|i| i.clone() as InteractorRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rect_figure(id: u64, x: f32, y: f32) -> FigureDescription {
        FigureDescription {
            id: FigureId(id),
            shape: Shape::Rect(Bounds { x, y, width: 10.0, height: 10.0 }),
            interactor: None,
            decorates: None,
            label: None,
        }
    }

    fn band(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(egui::pos2(x0, y0), egui::pos2(x1, y1))
    }

    #[test]
    fn demo_scene_is_consistent() {
        let scene = Scene::demo().unwrap();
        assert_eq!(scene.figure_ids().count(), 8);
        assert_eq!(scene.interactors().count(), 3);
        assert!(scene.model_of(InteractorId(3)).is_none());
    }

    #[test]
    fn broad_phase_skips_wrapped_figures() {
        let scene = Scene::demo().unwrap();
        let hits = scene.intersected_figures(band(590.0, 290.0, 700.0, 400.0));
        assert_eq!(hits, vec![FigureId(7)]);
        assert_eq!(scene.undecorated(FigureId(7)), FigureId(6));
        assert!(scene.hit(FigureId(7), band(590.0, 290.0, 700.0, 400.0)));
    }

    #[test]
    fn broad_phase_reaches_base_outside_small_decorator() {
        let base = rect_figure(1, 20.0, 20.0);
        let mut badge = rect_figure(2, 24.0, 24.0);
        badge.shape = Shape::Rect(Bounds { x: 24.0, y: 24.0, width: 2.0, height: 2.0 });
        badge.decorates = Some(FigureId(1));
        let scene = Scene::from_description(SceneDescription {
            interactors: vec![],
            figures: vec![base, badge],
        })
        .unwrap();

        let region = band(0.0, 0.0, 22.0, 22.0);
        assert!(scene.hit(FigureId(1), region));
        assert_eq!(scene.intersected_figures(region), vec![FigureId(2)]);
        assert_eq!(scene.undecorated(FigureId(2)), FigureId(1));
    }

    #[test]
    fn rejects_nan_size() {
        let mut figure = rect_figure(1, 0.0, 0.0);
        figure.shape = Shape::Rect(Bounds { x: 0.0, y: 0.0, width: f32::NAN, height: 10.0 });
        let description = SceneDescription {
            interactors: vec![],
            figures: vec![figure],
        };
        assert!(matches!(Scene::from_description(description), Err(AppError::InvalidScene(_))));
    }

    #[test]
    fn rejects_duplicate_figures() {
        let description = SceneDescription {
            interactors: vec![],
            figures: vec![rect_figure(1, 0.0, 0.0), rect_figure(1, 20.0, 0.0)],
        };
        assert!(matches!(Scene::from_description(description), Err(AppError::InvalidScene(_))));
    }

    #[test]
    fn rejects_unknown_references() {
        let mut figure = rect_figure(1, 0.0, 0.0);
        figure.interactor = Some(InteractorId(9));
        let description = SceneDescription {
            interactors: vec![],
            figures: vec![figure],
        };
        assert!(matches!(Scene::from_description(description), Err(AppError::InvalidScene(_))));

        let mut figure = rect_figure(1, 0.0, 0.0);
        figure.decorates = Some(FigureId(2));
        let description = SceneDescription {
            interactors: vec![],
            figures: vec![figure],
        };
        assert!(matches!(Scene::from_description(description), Err(AppError::InvalidScene(_))));
    }

    #[test]
    fn rejects_decorator_cycles() {
        let mut a = rect_figure(1, 0.0, 0.0);
        let mut b = rect_figure(2, 0.0, 0.0);
        a.decorates = Some(FigureId(2));
        b.decorates = Some(FigureId(1));
        let description = SceneDescription {
            interactors: vec![],
            figures: vec![a, b],
        };
        assert!(matches!(Scene::from_description(description), Err(AppError::InvalidScene(_))));
    }

    #[test]
    fn loads_scene_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "interactors": [{{ "id": 1, "mode": "single" }}],
                 "figures": [{{ "id": 4, "shape": {{ "ellipse": {{ "x": 0, "y": 0, "width": 10, "height": 10 }} }}, "interactor": 1 }}] }}"#
        )
        .unwrap();

        let scene = Scene::load(file.path()).unwrap();
        assert_eq!(scene.model_of(InteractorId(1)).unwrap().borrow().mode(), SelectionMode::Single);
        assert!(matches!(scene.figure(FigureId(4)).unwrap().shape, Shape::Ellipse(_)));
    }

    #[test]
    fn missing_scene_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(Scene::load(&path), Err(AppError::SceneNotFound(p)) if p == path));
    }

    #[test]
    fn selection_state_is_visible_through_decorators() {
        let scene = Scene::demo().unwrap();
        scene
            .model_of(InteractorId(2))
            .unwrap()
            .borrow_mut()
            .add(FigureId(6));
        assert!(scene.is_selected(FigureId(7)));
        assert!(!scene.is_selected(FigureId(1)));
    }
}

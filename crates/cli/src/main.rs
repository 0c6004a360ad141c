use anyhow::{Context, Result};
use clap::Parser;
use rubberband_core::{
    config::Config,
    init,
    scene::Scene,
    ui, DragContext, DragSessionController, FigureLayer, Interactor, Modifiers, MouseFilter,
    PointerButton, PointerEvent, RecordingSurface,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file to load (defaults to RUBBERBAND_SCENE, then a built-in demo)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Replay a gesture script instead of opening the canvas
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Print the covered figures after every replayed step
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Override the select filter, e.g. "primary"
    #[arg(long)]
    select_filter: Option<MouseFilter>,

    /// Override the toggle filter, e.g. "primary+ctrl"
    #[arg(long)]
    toggle_filter: Option<MouseFilter>,

    /// List the figures of the scene and exit
    #[arg(long)]
    list_figures: bool,
}

/// Pointer position plus button and modifiers, as written in gesture scripts.
#[derive(Deserialize, Debug, Clone, Copy)]
struct StepPoint {
    x: f32,
    y: f32,
    #[serde(default)]
    button: PointerButton,
    #[serde(default)]
    modifiers: Modifiers,
}

impl StepPoint {
    fn event(self) -> PointerEvent {
        PointerEvent::at(self.x, self.y)
            .with_button(self.button)
            .with_modifiers(self.modifiers)
    }
}

/// One step of a gesture script.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum GestureStep {
    Press(StepPoint),
    Drag(StepPoint),
    Release(StepPoint),
}

fn main() -> Result<()> {
    // Setup
    init();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Load config and apply command line overrides
    let mut config = Config::load().context("Failed to load configuration")?;
    let mut builder = Config::builder()
        .with_select_filter(args.select_filter.unwrap_or(config.select_filter))
        .with_toggle_filter(args.toggle_filter.unwrap_or(config.toggle_filter))
        .with_consume_events(config.consume_events);
    if let Some(path) = args.scene.clone().or(config.scene_path.take()) {
        builder = builder.with_scene_path(path);
    }
    let config = builder.build().context("Invalid filter overrides")?;

    let scene = match &config.scene_path {
        Some(path) => Scene::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => Scene::demo().context("Failed to build demo scene")?,
    };

    // Handle --list-figures
    if args.list_figures {
        list_figures(&scene);
        return Ok(());
    }

    match &args.replay {
        Some(script) => replay(&scene, &config, script, args.verbose),
        None => {
            let area = ui::run_selection_canvas(scene, config)?;
            match area {
                Some(rect) => println!(
                    "Last selected area: {:.1}x{:.1} at ({:.1}, {:.1})",
                    rect.width(),
                    rect.height(),
                    rect.min.x,
                    rect.min.y
                ),
                None => println!("No area selected"),
            }
            Ok(())
        }
    }
}

fn list_figures(scene: &Scene) {
    println!("Figures:");
    for figure in scene.figures() {
        let bounds = figure.shape.bounds();
        let owner = figure
            .interactor
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        let kind = match figure.decorates {
            Some(inner) => format!("decorates {}", inner),
            None => owner,
        };
        println!(
            "  {} {:<10} ({:.0}, {:.0}) {:.0}x{:.0}  {}",
            figure.id,
            figure.label.as_deref().unwrap_or(""),
            bounds.min.x,
            bounds.min.y,
            bounds.width(),
            bounds.height(),
            kind
        );
    }
}

/// Replays a gesture script against the scene and prints the selections.
fn replay(scene: &Scene, config: &Config, script: &Path, verbose: bool) -> Result<()> {
    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read gesture script {}", script.display()))?;
    let steps: Vec<GestureStep> =
        serde_json::from_str(&content).context("Gesture script is not a list of steps")?;

    let mut controller = DragSessionController::new(config);
    for interactor in scene.interactors() {
        controller.add_selection_interactor(interactor);
    }
    let mut surface = RecordingSurface::new();

    for (n, step) in steps.iter().enumerate() {
        let mut ctx = DragContext::new(scene as &dyn FigureLayer, &mut surface);
        match *step {
            GestureStep::Press(p) => controller.press(&mut p.event(), &mut ctx),
            GestureStep::Drag(p) => controller.drag(&mut p.event(), &mut ctx),
            GestureStep::Release(p) => controller.release(&mut p.event(), &mut ctx),
        }

        if verbose {
            let mut covered: Vec<_> = controller.current_figures().into_iter().collect();
            covered.sort();
            let covered: Vec<String> = covered.iter().map(|f| f.to_string()).collect();
            println!(
                "step {:>3} {:?}: mode {:?}, covering [{}]",
                n + 1,
                step,
                controller.mode(),
                covered.join(", ")
            );
        }
        let dirty = surface.take_dirty();
        log::debug!("step {} repainted {:?}", n + 1, dirty);
    }

    println!("Selections:");
    for interactor in scene.interactors() {
        let id = interactor.id();
        let name = scene
            .scene_interactor(id)
            .map(|i| i.name().to_string())
            .unwrap_or_default();
        match scene.model_of(id) {
            Some(_) => {
                let figures: Vec<String> =
                    scene.selection_of(id).iter().map(|f| f.to_string()).collect();
                println!("  {} {}: [{}]", id, name, figures.join(", "));
            }
            None => println!("  {} {}: not selectable", id, name),
        }
    }
    if let Some(area) = controller.selected_area() {
        println!(
            "Area: {:.1}x{:.1} at ({:.1}, {:.1})",
            area.width(),
            area.height(),
            area.min.x,
            area.min.y
        );
    }

    Ok(())
}

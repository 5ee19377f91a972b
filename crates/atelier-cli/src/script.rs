//! Scripted input sessions
//!
//! A script is a TOML file of `[[step]]` tables replayed against an editor in
//! order. Gizmo steps are written in world terms (`grab` a handle, `drag` it by
//! an offset, `turn` a ring) and converted to viewport pixels through the
//! editor's camera, so scripts do not depend on the viewport size.

use atelier_core::lighting::{DisplayMode, FloorPreset};
use atelier_core::{AtelierError, Color, EntityId, ObjectKind, Result, Vec3};
use atelier_store::{Entity, ToolMode, TransformPatch};
use atelier_viewport::{Editor, Frame, GizmoAxis, PointerOutcome};
use serde::{Deserialize, Serialize};

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_frames() -> u32 {
    1
}

/// One scripted action. Objects are addressed by their index in store order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Add {
        kind: ObjectKind,
    },
    Select {
        #[serde(default)]
        index: Option<usize>,
    },
    Tool {
        mode: ToolMode,
    },
    Reset,
    Update {
        index: usize,
        #[serde(default)]
        position: Option<Vec3>,
        #[serde(default)]
        rotation: Option<Vec3>,
        #[serde(default)]
        scale: Option<Vec3>,
        #[serde(default)]
        uniform_scale: Option<f32>,
        #[serde(default)]
        color: Option<Color>,
    },
    Remove {
        index: usize,
    },
    /// Press and release over a world point
    Click {
        at: Vec3,
    },
    PointerDown {
        x: f32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    /// Press on a gizmo handle
    Grab {
        axis: GizmoAxis,
    },
    /// Move the pointer to the grab point plus a world offset
    Drag {
        offset: Vec3,
    },
    /// Move the pointer to a ring point this many radians past the grab point
    Turn {
        angle: f32,
    },
    Release,
    Cancel,
    Wheel {
        steps: f32,
    },
    Tick {
        #[serde(default = "default_dt")]
        dt: f32,
        #[serde(default = "default_frames")]
        frames: u32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Light {
        #[serde(default)]
        intensity: Option<f32>,
        #[serde(default)]
        temperature: Option<f64>,
    },
    Wall {
        color: Color,
    },
    Mode {
        mode: DisplayMode,
    },
    Floor {
        preset: FloorPreset,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Add { .. } => "add",
            Step::Select { .. } => "select",
            Step::Tool { .. } => "tool",
            Step::Reset => "reset",
            Step::Update { .. } => "update",
            Step::Remove { .. } => "remove",
            Step::Click { .. } => "click",
            Step::PointerDown { .. } => "pointer-down",
            Step::PointerMove { .. } => "pointer-move",
            Step::PointerUp => "pointer-up",
            Step::Grab { .. } => "grab",
            Step::Drag { .. } => "drag",
            Step::Turn { .. } => "turn",
            Step::Release => "release",
            Step::Cancel => "cancel",
            Step::Wheel { .. } => "wheel",
            Step::Tick { .. } => "tick",
            Step::Resize { .. } => "resize",
            Step::Light { .. } => "light",
            Step::Wall { .. } => "wall",
            Step::Mode { .. } => "mode",
            Step::Floor { .. } => "floor",
        }
    }
}

/// A parsed script file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AtelierError::ScriptError(e.to_string()))
    }
}

/// What one step did
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PointerOutcome>,
    /// Refused or invalid steps are reported and the script continues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final state after a script ran
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub tool_mode: ToolMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<EntityId>,
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

/// Handle grabbed by the last `grab` step
#[derive(Debug, Clone, Copy)]
struct Grip {
    axis: GizmoAxis,
    anchor: glam::Vec3,
}

/// Replays steps against an editor
pub struct ScriptRunner {
    editor: Editor,
    grip: Option<Grip>,
}

impl ScriptRunner {
    pub fn new(editor: Editor) -> Self {
        Self { editor, grip: None }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Run every step, collecting a report per step
    pub fn run(&mut self, script: &Script) -> Vec<StepReport> {
        script
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let mut report = StepReport {
                    index,
                    action: step.name(),
                    entity: None,
                    outcome: None,
                    error: None,
                };
                match self.apply(step) {
                    Ok((entity, outcome)) => {
                        report.entity = entity;
                        report.outcome = outcome;
                    }
                    Err(e) => {
                        log::warn!("Step {} ({}) failed: {}", index, step.name(), e);
                        report.error = Some(e.to_string());
                    }
                }
                report
            })
            .collect()
    }

    /// Summarize the editor state
    pub fn report(&self, steps: Vec<StepReport>, with_frame: bool) -> RunReport {
        let store = self.editor.store();
        RunReport {
            steps,
            tool_mode: store.effective_tool_mode(),
            selected: store.selected_id(),
            entities: store.entities().to_vec(),
            frame: with_frame.then(|| self.editor.frame()),
        }
    }

    fn apply(&mut self, step: &Step) -> Result<(Option<EntityId>, Option<PointerOutcome>)> {
        let editor = &mut self.editor;
        match step {
            Step::Add { kind } => return Ok((Some(editor.add_object(*kind)?), None)),
            Step::Select { index } => {
                let id = index.map(|i| self.entity_at(i)).transpose()?;
                self.editor.select(id)?;
                return Ok((id, None));
            }
            Step::Tool { mode } => editor.set_tool_mode(*mode)?,
            Step::Reset => editor.reset_selected()?,
            Step::Update {
                index,
                position,
                rotation,
                scale,
                uniform_scale,
                color,
            } => {
                let id = self.entity_at(*index)?;
                let mut patch = TransformPatch::new();
                patch.position = *position;
                patch.rotation = *rotation;
                patch.scale = *scale;
                patch.color = *color;
                if let Some(factor) = uniform_scale {
                    patch = patch.with_uniform_scale(*factor);
                }
                self.editor.update_object(id, &patch);
                return Ok((Some(id), None));
            }
            Step::Remove { index } => {
                let id = self.entity_at(*index)?;
                self.editor.remove_object(id);
                return Ok((Some(id), None));
            }
            Step::Click { at } => {
                let [x, y] = self.screen(glam::Vec3::from(*at))?;
                let outcome = self.editor.pointer_down(x, y)?;
                self.editor.pointer_up()?;
                return Ok((None, Some(outcome)));
            }
            Step::PointerDown { x, y } => return Ok((None, Some(editor.pointer_down(*x, *y)?))),
            Step::PointerMove { x, y } => return Ok((None, Some(editor.pointer_move(*x, *y)?))),
            Step::PointerUp => return Ok((None, Some(editor.pointer_up()?))),
            Step::Grab { axis } => {
                let anchor = editor.handle_anchor(*axis).ok_or_else(|| {
                    AtelierError::ScriptError(format!("no '{}' handle to grab", axis))
                })?;
                let [x, y] = self.screen(anchor)?;
                let outcome = self.editor.pointer_down(x, y)?;
                if matches!(outcome, PointerOutcome::DragStarted { .. }) {
                    self.grip = Some(Grip {
                        axis: *axis,
                        anchor,
                    });
                }
                return Ok((None, Some(outcome)));
            }
            Step::Drag { offset } => {
                let grip = self.grip()?;
                let [x, y] = self.screen(grip.anchor + glam::Vec3::from(*offset))?;
                return Ok((None, Some(self.editor.pointer_move(x, y)?)));
            }
            Step::Turn { angle } => {
                let grip = self.grip()?;
                let point = self
                    .editor
                    .ring_point(grip.axis, *angle)
                    .ok_or_else(|| AtelierError::ScriptError("grabbed handle is not a ring".into()))?;
                let [x, y] = self.screen(point)?;
                return Ok((None, Some(self.editor.pointer_move(x, y)?)));
            }
            Step::Release => {
                self.grip = None;
                return Ok((None, Some(self.editor.pointer_up()?)));
            }
            Step::Cancel => {
                self.grip = None;
                return Ok((None, Some(self.editor.cancel()?)));
            }
            Step::Wheel { steps } => editor.wheel(*steps),
            Step::Tick { dt, frames } => {
                for _ in 0..*frames {
                    editor.tick(*dt);
                }
            }
            Step::Resize { width, height } => editor.resize(*width, *height),
            Step::Light {
                intensity,
                temperature,
            } => {
                let presentation = editor.presentation_mut();
                if let Some(intensity) = intensity {
                    presentation.set_light_intensity(*intensity);
                }
                if let Some(kelvin) = temperature {
                    presentation.set_light_temperature(*kelvin);
                }
            }
            Step::Wall { color } => editor.presentation_mut().wall_color = *color,
            Step::Mode { mode } => editor.presentation_mut().mode = *mode,
            Step::Floor { preset } => editor.presentation_mut().floor = *preset,
        }
        Ok((None, None))
    }

    fn entity_at(&self, index: usize) -> Result<EntityId> {
        self.editor
            .store()
            .entities()
            .get(index)
            .map(|e| e.id)
            .ok_or_else(|| AtelierError::ScriptError(format!("no object at index {}", index)))
    }

    fn grip(&self) -> Result<Grip> {
        self.grip
            .ok_or_else(|| AtelierError::ScriptError("nothing grabbed".into()))
    }

    fn screen(&self, point: glam::Vec3) -> Result<[f32; 2]> {
        self.editor
            .world_to_screen(point)
            .ok_or_else(|| AtelierError::ScriptError(format!("{:?} is behind the camera", point)))
    }
}

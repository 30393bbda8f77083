//! Frame-loop owner: lifecycle, input handling, tick then render.
//!
//! The host calls [`AnimationDriver::frame`] once per display refresh. The
//! driver holds the only reference to the field; input callbacks just queue
//! events that are applied at the top of the next frame.

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::api::error::{DataSourceError, FieldError};
use crate::api::source::DataSource;
use crate::api::types::{FieldEvent, IdeaRecord, Selection};
use crate::core::rng::Rng;
use crate::core::time::TickClock;
use crate::field::state::FieldState;
use crate::graph::proximity::ProximityGraph;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::pipeline::{FrameStats, RenderPipeline};
use crate::renderer::surface::RenderSurface;
use crate::view::parallax::Parallax;
use crate::view::picker::pick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
}

/// Result of one `frame` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The driver is not running; nothing was ticked or drawn.
    Stopped,
    /// Running, but no field yet (data not loaded); rendering skipped.
    Idle,
    /// The field advanced `ticks` times and one frame was drawn.
    Rendered { ticks: u32, stats: FrameStats },
    /// Tick or render failed; the driver stopped itself.
    Failed,
}

pub struct AnimationDriver {
    config: FieldConfig,
    state: DriverState,
    /// Whether host input is accepted (listeners attached).
    listening: bool,
    field: Option<FieldState>,
    /// Records delivered before a surface was known.
    pending: Option<Vec<IdeaRecord>>,
    surface_size: Option<Vec2>,
    loading: bool,
    rng: Rng,
    clock: TickClock,
    input: InputQueue,
    parallax: Parallax,
    graph: ProximityGraph,
    pipeline: RenderPipeline,
    selection: Option<Selection>,
    events: Vec<FieldEvent>,
    last_error: Option<FieldError>,
}

impl AnimationDriver {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            state: DriverState::Stopped,
            listening: false,
            field: None,
            pending: None,
            surface_size: None,
            loading: true,
            rng: Rng::new(config.seed),
            clock: TickClock::new(config.fixed_dt(), config.max_catch_up_ticks),
            input: InputQueue::new(),
            parallax: Parallax::new(&config.parallax),
            graph: ProximityGraph::new(&config.edges),
            pipeline: RenderPipeline::new(&config),
            selection: None,
            events: Vec::new(),
            last_error: None,
            config,
        }
    }

    // -- Lifecycle --

    /// Attach to `surface` and enter `Running`. Seeds the field if records
    /// already arrived. Starting while running is a no-op.
    pub fn start<S: RenderSurface + ?Sized>(&mut self, surface: &S) -> Result<(), FieldError> {
        if self.state == DriverState::Running {
            return Ok(());
        }
        let (width, height) = (surface.width(), surface.height());
        FieldError::check_surface(width, height)?;

        self.surface_size = Some(Vec2::new(width, height));
        if let Some(records) = self.pending.take() {
            self.seed(records)?;
        } else if let Some(field) = self.field.as_mut() {
            field.resize(width, height)?;
        }

        self.clock.reset();
        self.last_error = None;
        self.listening = true;
        self.state = DriverState::Running;
        log::info!("idea field started on {}x{} surface", width, height);
        Ok(())
    }

    /// Detach input and stop ticking. Idempotent; once this returns no
    /// further frame ticks or draws.
    pub fn stop(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        self.state = DriverState::Stopped;
        self.listening = false;
        self.input.clear();
        log::info!("idea field stopped");
    }

    // -- Data --

    /// Install a data source result. Failures degrade to an empty field and
    /// leave the loading indicator on.
    pub fn load(&mut self, result: Result<Vec<IdeaRecord>, DataSourceError>) -> Result<(), FieldError> {
        let records = match result {
            Ok(records) => {
                self.loading = false;
                records
            }
            Err(err) => {
                log::warn!("idea source failed, showing an empty field: {}", err);
                self.loading = true;
                Vec::new()
            }
        };

        if self.surface_size.is_some() {
            self.seed(records)
        } else {
            self.pending = Some(records);
            Ok(())
        }
    }

    /// Fetch from `source` and rebuild the field from the result.
    pub fn refresh_from<D: DataSource + ?Sized>(&mut self, source: &mut D) -> Result<(), FieldError> {
        let result = source.fetch_records();
        self.load(result)
    }

    fn seed(&mut self, records: Vec<IdeaRecord>) -> Result<(), FieldError> {
        let size = match self.surface_size {
            Some(size) => size,
            None => return Ok(()),
        };
        let field = FieldState::initialize(records, size.x, size.y, &self.config, &mut self.rng)?;
        let count = field.len();
        self.field = Some(field);
        self.clear_selection();
        self.events.push(FieldEvent::Seeded { count });
        log::info!("seeded {} ideas on {}x{}", count, size.x, size.y);
        Ok(())
    }

    // -- Input --

    /// Queue a host input event. Dropped while stopped.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.listening {
            self.input.push(event);
        } else {
            log::debug!("input ignored while stopped: {:?}", event);
        }
    }

    fn handle_input<S: RenderSurface + ?Sized>(&mut self, event: InputEvent, surface: &mut S) -> Result<(), FieldError> {
        match event {
            InputEvent::PointerMove { x, y } => {
                if let Some(size) = self.surface_size {
                    self.parallax.set_pointer(Parallax::normalize(Vec2::new(x, y), size.x, size.y));
                }
            }
            InputEvent::PointerLeave => self.parallax.reset_pointer(),
            InputEvent::PointerDown { x, y } => self.select_at(Vec2::new(x, y)),
            InputEvent::Resize { width, height } => {
                if FieldError::check_surface(width, height).is_err() {
                    log::warn!("ignoring resize to {}x{}", width, height);
                    return Ok(());
                }
                surface.resize(width, height);
                self.surface_size = Some(Vec2::new(width, height));
                if let Some(field) = self.field.as_mut() {
                    field.resize(width, height)?;
                }
                log::debug!("resized to {}x{}", width, height);
            }
        }
        Ok(())
    }

    fn select_at(&mut self, pointer: Vec2) {
        let Some(field) = self.field.as_ref() else {
            return;
        };
        match pick(pointer, field.particles(), &self.parallax, self.config.pick_margin) {
            Some(index) => {
                let record = field.particles()[index].record().clone();
                log::debug!("selected idea {} ({})", record.id, index);
                let selection = Selection { index, record };
                self.selection = Some(selection.clone());
                self.events.push(FieldEvent::Selected(selection));
            }
            None => self.clear_selection(),
        }
    }

    fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.events.push(FieldEvent::SelectionCleared);
        }
    }

    // -- Frame --

    /// Run one display refresh: apply input, tick, render.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, frame_dt: f32, surface: &mut S) -> FrameOutcome {
        if self.state != DriverState::Running {
            return FrameOutcome::Stopped;
        }
        match self.step(frame_dt, surface) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("frame failed, stopping the field: {}", err);
                self.last_error = Some(err);
                self.stop();
                FrameOutcome::Failed
            }
        }
    }

    fn step<S: RenderSurface + ?Sized>(&mut self, frame_dt: f32, surface: &mut S) -> Result<FrameOutcome, FieldError> {
        for event in self.input.drain() {
            self.handle_input(event, surface)?;
        }
        self.parallax.update();

        let Some(field) = self.field.as_mut() else {
            return Ok(FrameOutcome::Idle);
        };

        let ticks = self.clock.advance(frame_dt);
        for _ in 0..ticks {
            field.tick(1.0)?;
        }
        field.project(&self.parallax);

        let edges = self.graph.rebuild(field.particles());
        let selected = self.selection.as_ref().map(|s| s.index);
        let stats = self.pipeline.render(surface, field, edges, selected)?;
        Ok(FrameOutcome::Rendered { ticks, stats })
    }

    // -- Accessors --

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// True until a data source delivers successfully.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn field(&self) -> Option<&FieldState> {
        self.field.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Take the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    /// The error that last stopped the driver, if any.
    pub fn last_error(&self) -> Option<&FieldError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }
}

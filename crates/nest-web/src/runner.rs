use nest_engine::{
    AnimationDriver, ConfigError, DataSourceError, DrawCommand, DrawList, FieldConfig, FieldError,
    FieldEvent, FrameOutcome, InputEvent, JsonSource, RenderSurface,
};

/// Wires the animation driver to a recording surface for the browser.
///
/// The page keeps one `FieldRunner` in a `thread_local!` and calls the free
/// `#[wasm_bindgen]` functions in `lib.rs`, because wasm-bindgen cannot
/// export a struct holding engine state across calls by reference.
pub struct FieldRunner {
    driver: AnimationDriver,
    draw_list: DrawList,
    /// Bumped whenever the selection changes so the page can poll cheaply.
    selection_version: u32,
}

impl FieldRunner {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            driver: AnimationDriver::new(config),
            draw_list: DrawList::new(0.0, 0.0),
            selection_version: 0,
        }
    }

    /// Build from a JSON config. An empty string means defaults.
    pub fn from_json(config_json: &str) -> Result<Self, ConfigError> {
        let config = if config_json.trim().is_empty() {
            FieldConfig::default()
        } else {
            FieldConfig::from_json(config_json)?
        };
        Ok(Self::new(config))
    }

    pub fn start(&mut self, width: f32, height: f32) -> Result<(), FieldError> {
        if !self.driver.is_running() {
            self.draw_list.resize(width, height);
        }
        self.driver.start(&self.draw_list)
    }

    /// Stop the driver and drop the last frame so nothing is replayed.
    pub fn stop(&mut self) {
        self.driver.stop();
        self.draw_list.begin_frame();
    }

    /// Run one display refresh into the draw list.
    pub fn frame(&mut self, dt: f32) -> FrameOutcome {
        self.draw_list.begin_frame();
        let outcome = self.driver.frame(dt, &mut self.draw_list);
        if outcome == FrameOutcome::Failed {
            self.draw_list.begin_frame();
        }
        self.absorb_events();
        outcome
    }

    pub fn load_records(&mut self, json: &str) -> Result<(), FieldError> {
        let result = JsonSource::parse(json);
        self.driver.load(result)?;
        self.absorb_events();
        Ok(())
    }

    /// The page's fetch failed; show an empty field and keep loading on.
    pub fn source_failed(&mut self, message: &str) -> Result<(), FieldError> {
        self.driver.load(Err(DataSourceError::Unavailable(message.to_string())))?;
        self.absorb_events();
        Ok(())
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.driver.push_input(event);
    }

    fn absorb_events(&mut self) {
        for event in self.driver.take_events() {
            match event {
                FieldEvent::Selected(_) | FieldEvent::SelectionCleared => {
                    self.selection_version = self.selection_version.wrapping_add(1);
                }
                FieldEvent::Seeded { .. } => {}
            }
        }
    }

    // ---- Draw buffer accessors ----

    pub fn draw_commands_ptr(&self) -> *const f32 {
        self.draw_list.as_ptr()
    }

    pub fn draw_command_count(&self) -> u32 {
        self.draw_list.len() as u32
    }

    pub fn command_floats(&self) -> &[f32] {
        self.draw_list.as_floats()
    }

    pub fn floats_per_command(&self) -> u32 {
        DrawCommand::FLOATS as u32
    }

    // ---- State accessors ----

    /// The selected record as JSON, or `null`.
    pub fn selection_json(&self) -> String {
        match self.driver.selection() {
            Some(selection) => serde_json::to_string(selection).unwrap_or_else(|e| {
                log::warn!("could not serialize selection: {}", e);
                "null".to_string()
            }),
            None => "null".to_string(),
        }
    }

    pub fn selection_version(&self) -> u32 {
        self.selection_version
    }

    /// 0 = stopped, 1 = running.
    pub fn state_code(&self) -> u32 {
        self.driver.is_running() as u32
    }

    pub fn is_loading(&self) -> bool {
        self.driver.is_loading()
    }

    pub fn particle_count(&self) -> u32 {
        self.driver.field().map_or(0, |f| f.len() as u32)
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }
}

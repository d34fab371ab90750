use crate::config::VisualizerConfig;
use crate::constants::NUDGE_STEP;
use crate::model::{clamp01, clamp_coupling, compute_energy_levels, EnergyLevels};
use crate::scan::AutoScan;

/// User intents, independent of where they came from (slider, button, key).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    ToggleAutoScan,
    SetDistortion(f32),
    NudgeDistortion(f32),
    SetCoupling(f32),
    NudgeCoupling(f32),
    Reset,
}

impl ControlAction {
    pub const DISTORTION_UP: Self = Self::NudgeDistortion(NUDGE_STEP);
    pub const DISTORTION_DOWN: Self = Self::NudgeDistortion(-NUDGE_STEP);
    pub const COUPLING_UP: Self = Self::NudgeCoupling(NUDGE_STEP);
    pub const COUPLING_DOWN: Self = Self::NudgeCoupling(-NUDGE_STEP);
}

/// Canonical parameter state: distortion, coupling and the auto-scan switch.
///
/// Manual distortion writes and the auto-scan oscillator never apply at the
/// same time: while `auto_play` is on, manual writes are rejected.
#[derive(Clone, Debug)]
pub struct Controller {
    distortion: f32,
    coupling: f32,
    auto_play: bool,
    scan: AutoScan,
    defaults: VisualizerConfig,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&VisualizerConfig::default(), 0.0)
    }
}

impl Controller {
    pub fn new(config: &VisualizerConfig, now_ms: f64) -> Self {
        Self {
            distortion: clamp01(config.initial_distortion),
            coupling: clamp_coupling(config.coupling),
            auto_play: config.auto_play,
            scan: AutoScan::with_time_constant(now_ms, config.scan_time_constant_ms),
            defaults: config.clone(),
        }
    }

    pub fn distortion(&self) -> f32 {
        self.distortion
    }

    pub fn coupling(&self) -> f32 {
        self.coupling
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn scan(&self) -> &AutoScan {
        &self.scan
    }

    /// Recompute the energy levels from the current parameters.
    pub fn levels(&self) -> EnergyLevels {
        compute_energy_levels(self.distortion, self.coupling)
    }

    /// Manual write. Returns `false` (and leaves state untouched) while auto-scan runs.
    pub fn set_distortion(&mut self, value: f32) -> bool {
        if self.auto_play {
            log::warn!("[controller] manual distortion ignored while auto-scan is on");
            return false;
        }
        self.distortion = clamp01(value);
        true
    }

    pub fn set_coupling(&mut self, value: f32) {
        self.coupling = clamp_coupling(value);
    }

    pub fn set_auto_play(&mut self, on: bool, now_ms: f64) {
        if on == self.auto_play {
            return;
        }
        self.auto_play = on;
        if on {
            self.scan.restart(now_ms);
        }
        log::info!("[scan] auto-scan {}", if on { "started" } else { "stopped" });
    }

    /// Flip auto-scan and return the new state.
    pub fn toggle_auto_play(&mut self, now_ms: f64) -> bool {
        self.set_auto_play(!self.auto_play, now_ms);
        self.auto_play
    }

    /// Advance the oscillator. Returns the new distortion when auto-scan drove it.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        if !self.auto_play {
            return None;
        }
        self.distortion = clamp01(self.scan.sample(now_ms));
        Some(self.distortion)
    }

    /// Apply a user intent. Returns whether any parameter changed.
    pub fn apply(&mut self, action: ControlAction, now_ms: f64) -> bool {
        match action {
            ControlAction::ToggleAutoScan => {
                self.toggle_auto_play(now_ms);
                true
            }
            ControlAction::SetDistortion(v) => self.set_distortion(v),
            ControlAction::NudgeDistortion(dv) => self.set_distortion(self.distortion + dv),
            ControlAction::SetCoupling(v) => {
                let before = self.coupling;
                self.set_coupling(v);
                before != self.coupling
            }
            ControlAction::NudgeCoupling(dv) => {
                let before = self.coupling;
                self.set_coupling(self.coupling + dv);
                before != self.coupling
            }
            ControlAction::Reset => {
                self.auto_play = false;
                self.distortion = clamp01(self.defaults.initial_distortion);
                self.coupling = clamp_coupling(self.defaults.coupling);
                self.set_auto_play(self.defaults.auto_play, now_ms);
                true
            }
        }
    }

    /// Label for the auto-scan toggle button.
    pub fn toggle_caption(&self) -> &'static str {
        if self.auto_play {
            "Stop auto-scan"
        } else {
            "Start auto-scan"
        }
    }

    pub fn distortion_label(&self) -> String {
        format!("Q3 distortion: {:.2}", self.distortion)
    }

    pub fn coupling_label(&self) -> String {
        format!("Coupling λ: {:.2}", self.coupling)
    }

    pub fn stabilization_label(&self) -> String {
        format!("ΔE ≈ -{:.1}", self.levels().stabilization_energy)
    }
}

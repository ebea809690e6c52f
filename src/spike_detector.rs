#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikePhase {
    Quiescent,
    Depolarized,
}

/// A spike is armed when the voltage reaches the threshold while rising and is emitted
/// once the voltage is back at or below the threshold while falling.
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    threshold: f64,
    phase: SpikePhase,
}

impl SpikeDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            phase: SpikePhase::Quiescent,
        }
    }

    #[cfg(test)]
    pub fn get_phase(&self) -> SpikePhase {
        self.phase
    }

    pub fn on_step(&mut self, v_old: f64, v_new: f64, dt: f64) -> bool {
        let slope = (v_new - v_old) / dt;

        match self.phase {
            SpikePhase::Quiescent if v_new >= self.threshold && slope > 0.0 => {
                self.phase = SpikePhase::Depolarized;
                false
            }
            SpikePhase::Depolarized if v_new <= self.threshold && slope < 0.0 => {
                self.phase = SpikePhase::Quiescent;
                true
            }
            _ => false,
        }
    }
}

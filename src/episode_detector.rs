use crate::{
    params::EpisodeParams,
    records::{ClassActivity, EpisodeRecord},
};

#[derive(Debug, Clone)]
pub struct EpisodeDetector {
    params: EpisodeParams,
    active_phase: bool,
    burst_count: usize,
    last_mean_activity: f64,
}

impl EpisodeDetector {
    pub fn new(params: &EpisodeParams, initial_mean_activity: f64) -> Self {
        Self {
            params: params.clone(),
            active_phase: false,
            burst_count: 0,
            last_mean_activity: initial_mean_activity,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_phase
    }

    pub fn get_burst_count(&self) -> usize {
        self.burst_count
    }

    pub fn on_step(
        &mut self,
        t: f64,
        dt: f64,
        mean_activity: f64,
        class_activity: ClassActivity,
    ) -> Option<EpisodeRecord> {
        let slope = (mean_activity - self.last_mean_activity) / dt;
        self.last_mean_activity = mean_activity;

        if !self.active_phase
            && mean_activity >= self.params.activity_threshold
            && slope > self.params.activity_slope_threshold
        {
            self.active_phase = true;
            log::debug!("active phase started at t = {:.4}", t);
            Some(EpisodeRecord::phase_start(t, class_activity))
        } else if self.active_phase && mean_activity < self.params.activity_threshold {
            self.active_phase = false;
            self.burst_count += 1;
            log::info!("burst {} ended at t = {:.4}", self.burst_count, t);
            Some(EpisodeRecord::phase_end(t, class_activity))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use float_cmp::assert_approx_eq;

    const DT: f64 = 0.01;

    const ACTIVITY: ClassActivity = ClassActivity {
        mean_exc: 0.4,
        mean_inh: 0.0,
    };

    fn detector() -> EpisodeDetector {
        EpisodeDetector::new(&EpisodeParams::default(), 0.01)
    }

    #[test]
    fn slow_rise_does_not_start_phase() {
        let mut sut = detector();
        let mut activity = 0.01;

        while activity < 0.5 {
            activity += 0.001;
            assert!(sut.on_step(0.0, DT, activity, ACTIVITY).is_none());
        }

        assert!(!sut.is_active());
    }

    #[test]
    fn phase_start_and_end() {
        let mut sut = detector();

        let start = sut.on_step(5.0, DT, 0.2, ACTIVITY).unwrap();
        assert!(start.is_phase_start());
        assert_approx_eq!(f64, start.signed_t, 5.0);
        assert_approx_eq!(f64, start.mean_exc_activity, 0.4);
        assert_eq!(sut.get_burst_count(), 0);

        assert!(sut.on_step(5.01, DT, 0.3, ACTIVITY).is_none());
        assert!(sut.on_step(5.02, DT, 0.18, ACTIVITY).is_none());

        let end = sut.on_step(5.03, DT, 0.17, ACTIVITY).unwrap();
        assert!(!end.is_phase_start());
        assert_approx_eq!(f64, end.signed_t, -5.03);
        assert_approx_eq!(f64, end.t(), 5.03);
        assert_eq!(sut.get_burst_count(), 1);
        assert!(!sut.is_active());
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut sut = detector();
        assert!(sut.on_step(1.0, DT, 0.0, ACTIVITY).is_none());
        assert_eq!(sut.get_burst_count(), 0);
    }

    #[test]
    fn burst_count_counts_phase_ends() {
        let mut sut = detector();
        let mut t = 0.0;

        for _ in 0..3 {
            assert!(sut.on_step(t, DT, 0.5, ACTIVITY).is_some());
            t += DT;
            assert!(sut.on_step(t, DT, 0.6, ACTIVITY).is_none());
            t += DT;
            assert!(sut.on_step(t, DT, 0.0, ACTIVITY).is_some());
            t += DT;
        }

        assert_eq!(sut.get_burst_count(), 3);
    }
}

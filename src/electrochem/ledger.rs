use super::{CellConfig, ElectrochemPoint, ElectrochemRow, PointLabel, StandardSolution};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Where the hidden sample concentration comes from.
pub trait SampleSource: Send {
    /// Draw a concentration in `[min, max]` mol/L.
    fn draw(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform draws from a random number generator.
pub struct RandomSample<R> {
    rng: R,
}

impl<R: Rng> RandomSample<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSample<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> SampleSource for RandomSample<R> {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        self.rng.random_range(min..=max)
    }
}

/// Replays a fixed list of concentrations, cycling when exhausted.
///
/// Values are clamped into the requested `[min, max]`, so a hidden sample
/// never falls outside the configured range. An empty list yields the midpoint.
#[derive(Debug, Clone)]
pub struct FixedSample {
    values: Vec<f64>,
    next: usize,
}

impl FixedSample {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl SampleSource for FixedSample {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        if self.values.is_empty() {
            return (min + max) / 2.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.max(min).min(max)
    }
}

/// EMF readings keyed by label: one per standard plus the unknown sample.
///
/// Re-recording a label overwrites its reading in place, so table order is
/// the order labels were first recorded.
pub struct ElectrochemLedger {
    config: CellConfig,
    points: Vec<ElectrochemPoint>,
    sample_concentration: f64,
    source: Box<dyn SampleSource>,
}

impl fmt::Debug for ElectrochemLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectrochemLedger")
            .field("config", &self.config)
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}

impl ElectrochemLedger {
    pub fn new(config: CellConfig, mut source: Box<dyn SampleSource>) -> Self {
        let sample_concentration = source.draw(config.sample_min_mol_l, config.sample_max_mol_l);
        Self {
            config,
            points: Vec::new(),
            sample_concentration,
            source,
        }
    }

    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    pub fn anode_concentration(&self) -> f64 {
        self.config.anode_concentration_mol_l
    }

    pub fn record_standard(&mut self, standard: StandardSolution) -> Result<ElectrochemRow> {
        let point = self.reading(PointLabel::Standard(standard), standard.concentration())?;
        Ok(self.upsert(point))
    }

    pub fn record_sample(&mut self) -> Result<ElectrochemRow> {
        let point = self.reading(PointLabel::Sample, self.sample_concentration)?;
        Ok(self.upsert(point))
    }

    /// Drop every reading and draw a new unknown.
    pub fn clear(&mut self) {
        self.points.clear();
        self.sample_concentration = self
            .source
            .draw(self.config.sample_min_mol_l, self.config.sample_max_mol_l);
    }

    pub fn rows(&self) -> Vec<ElectrochemRow> {
        self.points.iter().map(|p| self.row(p)).collect()
    }

    pub fn sample_emf(&self) -> Option<f64> {
        self.points.iter().find(|p| p.label.is_sample()).map(|p| p.emf)
    }

    pub fn standards_count(&self) -> usize {
        self.points.iter().filter(|p| !p.label.is_sample()).count()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The hidden ground truth, for grading a student's estimate.
    pub fn reveal_sample_concentration(&self) -> f64 {
        self.sample_concentration
    }

    pub(crate) fn points(&self) -> &[ElectrochemPoint] {
        &self.points
    }

    fn reading(&self, label: PointLabel, concentration: f64) -> Result<ElectrochemPoint> {
        let emf = self.config.nernst.emf(self.anode_concentration(), concentration)?;
        Ok(ElectrochemPoint {
            label,
            concentration,
            emf,
        })
    }

    fn upsert(&mut self, point: ElectrochemPoint) -> ElectrochemRow {
        match self.points.iter_mut().find(|p| p.label == point.label) {
            Some(existing) => *existing = point,
            None => self.points.push(point),
        }
        self.row(&point)
    }

    fn row(&self, point: &ElectrochemPoint) -> ElectrochemRow {
        if point.label.is_sample() {
            return ElectrochemRow {
                label: point.label,
                concentration: None,
                ratio: None,
                ln_ratio: None,
                emf: point.emf,
            };
        }
        let ratio = self.anode_concentration() / point.concentration;
        ElectrochemRow {
            label: point.label,
            concentration: Some(point.concentration),
            ratio: Some(ratio),
            ln_ratio: Some(ratio.ln()),
            emf: point.emf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electrochem::nernst_emf;
    use crate::error::LabError;
    use approx::assert_abs_diff_eq;
    use more_asserts::{assert_ge, assert_le};

    fn fixed_ledger(values: Vec<f64>) -> ElectrochemLedger {
        ElectrochemLedger::new(CellConfig::default(), Box::new(FixedSample::new(values)))
    }

    #[test]
    fn test_record_standard_overwrites_in_place() {
        let mut ledger = fixed_ledger(vec![0.02]);
        ledger.record_standard(StandardSolution::Hundredth).unwrap();
        ledger.record_standard(StandardSolution::Tenth).unwrap();
        ledger.record_standard(StandardSolution::Hundredth).unwrap();

        let rows = ledger.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, PointLabel::Standard(StandardSolution::Hundredth));
        assert_eq!(rows[1].label, PointLabel::Standard(StandardSolution::Tenth));
        assert_eq!(ledger.standards_count(), 2);
    }

    #[test]
    fn test_record_sample_overwrites_in_place() {
        let mut ledger = fixed_ledger(vec![0.02]);
        ledger.record_standard(StandardSolution::Tenth).unwrap();
        let first = ledger.record_sample().unwrap();
        ledger.record_standard(StandardSolution::Thousandth).unwrap();
        let second = ledger.record_sample().unwrap();

        let rows = ledger.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|r| r.label.is_sample()).count(), 1);
        assert_eq!(rows[1].label, PointLabel::Sample);
        assert_eq!(first.emf, second.emf);
        assert_eq!(ledger.standards_count(), 2);
    }

    #[test]
    fn test_fixed_sample_clamped_to_range() {
        let mut source = FixedSample::new(vec![0.5, 0.0001, 0.05]);
        assert_eq!(source.draw(0.001, 0.1), 0.1);
        assert_eq!(source.draw(0.001, 0.1), 0.001);
        assert_eq!(source.draw(0.001, 0.1), 0.05);
        assert_eq!(FixedSample::new(Vec::new()).draw(0.0, 0.1), 0.05);
    }

    #[test]
    fn test_standard_row_carries_ratio() {
        let mut ledger = fixed_ledger(vec![0.02]);
        let row = ledger.record_standard(StandardSolution::Thousandth).unwrap();

        assert_eq!(row.concentration, Some(0.001));
        assert_abs_diff_eq!(row.ratio.unwrap(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.ln_ratio.unwrap(), 100f64.ln(), epsilon = 1e-9);
        assert_abs_diff_eq!(row.emf, 1.10 - 0.012839 * 100f64.ln(), epsilon = 1e-5);
    }

    #[test]
    fn test_sample_row_hides_concentration() {
        let mut ledger = fixed_ledger(vec![0.02]);
        let row = ledger.record_sample().unwrap();

        assert_eq!(row.label, PointLabel::Sample);
        assert!(row.concentration.is_none() && row.ratio.is_none() && row.ln_ratio.is_none());
        assert_eq!(ledger.sample_emf(), Some(row.emf));
        assert_abs_diff_eq!(row.emf, nernst_emf(1.10, 8.314, 298.0, 2, 96485.0, 0.1, 0.02).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_clear_draws_new_sample() {
        let mut ledger = fixed_ledger(vec![0.02, 0.05]);
        ledger.record_standard(StandardSolution::Tenth).unwrap();
        ledger.record_sample().unwrap();
        assert_eq!(ledger.reveal_sample_concentration(), 0.02);

        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.sample_emf().is_none());
        assert_eq!(ledger.reveal_sample_concentration(), 0.05);
    }

    #[test]
    fn test_random_sample_stays_in_range() {
        let mut ledger = ElectrochemLedger::new(CellConfig::default(), Box::new(RandomSample::seeded(7)));
        for _ in 0..200 {
            let c = ledger.reveal_sample_concentration();
            assert_ge!(c, 0.001);
            assert_le!(c, 0.1);
            ledger.clear();
        }
    }

    #[test]
    fn test_invalid_hidden_sample_surfaces_domain_error() {
        // An unvalidated range that admits zero lets the draw through
        let config = CellConfig { sample_min_mol_l: 0.0, ..CellConfig::default() };
        let mut ledger = ElectrochemLedger::new(config, Box::new(FixedSample::constant(0.0)));
        assert!(matches!(ledger.record_sample(), Err(LabError::Domain { .. })));
        assert!(ledger.is_empty());
    }
}

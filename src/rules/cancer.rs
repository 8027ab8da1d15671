use super::{MAX_NEIGHBORS, RuleSpec, Transition};
use crate::{CellState, Error, Neighborhood, Result};
use rand::Rng;

/// Life-like rule with a third, cancerous state
///
/// Alive cells mutate into cancer with `mutation_chance` per generation, and
/// dead cells touching both cancerous and alive cells are overgrown with a
/// probability biased by `growth_rate`. Cancer starves without alive neighbors.
///
/// Cancerous cells are not part of the tracked population: a mutation reports
/// `-1` and cancer spreading into a dead cell reports `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancer {
    spec: RuleSpec,
    mutation_chance: f64,
    growth_rate: u8,
}

impl Cancer {
    pub fn new(spec: RuleSpec, mutation_chance: f64, growth_rate: u8) -> Result<Self> {
        if !(0.0..=1.0).contains(&mutation_chance) {
            return Err(Error::InvalidRuleParameter(format!(
                "mutation chance must be in [0, 1], got {mutation_chance}"
            )));
        }
        if !(1..=MAX_NEIGHBORS).contains(&growth_rate) {
            return Err(Error::InvalidRuleParameter(format!(
                "growth rate must be in [1, 8], got {growth_rate}"
            )));
        }
        Ok(Self {
            spec,
            mutation_chance,
            growth_rate,
        })
    }

    #[inline]
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }
    #[inline]
    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }
    #[inline]
    pub fn growth_rate(&self) -> u8 {
        self.growth_rate
    }

    /// `<mutation>-<growth>`, used to name output locations
    pub fn parameters_name(&self) -> String {
        format!("{:?}-{}", self.mutation_chance, self.growth_rate)
    }

    fn overgrows<R: Rng>(&self, cancerous_neighbors: u8, rng: &mut R) -> bool {
        let threshold = cancerous_neighbors.max(self.growth_rate);
        rng.random_range(0..=MAX_NEIGHBORS) < threshold
    }

    fn mutates<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < self.mutation_chance
    }

    /// Applies the first matching rule; random draws only happen once the
    /// deterministic part of a rule has matched
    pub fn next<R: Rng>(&self, cell: CellState, n: Neighborhood, rng: &mut R) -> Transition {
        match cell {
            CellState::Dead if n.cancerous > 0 && n.alive > 0 && self.overgrows(n.cancerous, rng) => {
                Transition::new(CellState::Cancerous, 0)
            }
            CellState::Dead if self.spec.birth.contains(n.alive) => {
                Transition::new(CellState::Alive, 1)
            }
            CellState::Alive if self.mutates(rng) => Transition::new(CellState::Cancerous, -1),
            CellState::Alive if !self.spec.survive.contains(n.alive) => {
                Transition::new(CellState::Dead, -1)
            }
            // starvation
            CellState::Cancerous if n.alive == 0 => Transition::new(CellState::Dead, 0),
            _ => Transition::unchanged(cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn n(alive: u8, cancerous: u8) -> Neighborhood {
        Neighborhood { alive, cancerous }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let spec = RuleSpec::conway();

        assert!(matches!(
            Cancer::new(spec, -0.1, 3),
            Err(Error::InvalidRuleParameter(_))
        ));
        assert!(matches!(
            Cancer::new(spec, 1.5, 3),
            Err(Error::InvalidRuleParameter(_))
        ));
        assert!(matches!(
            Cancer::new(spec, f64::NAN, 3),
            Err(Error::InvalidRuleParameter(_))
        ));
        assert!(matches!(
            Cancer::new(spec, 0.5, 0),
            Err(Error::InvalidRuleParameter(_))
        ));
        assert!(matches!(
            Cancer::new(spec, 0.5, 9),
            Err(Error::InvalidRuleParameter(_))
        ));
        assert!(Cancer::new(spec, 0.0, 1).is_ok());
        assert!(Cancer::new(spec, 1.0, 8).is_ok());
    }

    #[test]
    fn certain_mutation_turns_alive_cancerous() {
        let rule = Cancer::new(RuleSpec::conway(), 1.0, 1).unwrap();
        let mut rng = rng();

        for alive in 0..=8 {
            assert_eq!(
                rule.next(CellState::Alive, n(alive, 0), &mut rng),
                Transition::new(CellState::Cancerous, -1)
            );
        }
    }

    #[test]
    fn without_mutation_alive_follows_survival() {
        let rule = Cancer::new(RuleSpec::conway(), 0.0, 4).unwrap();
        let mut rng = rng();

        assert_eq!(
            rule.next(CellState::Alive, n(2, 3), &mut rng),
            Transition::unchanged(CellState::Alive)
        );
        assert_eq!(
            rule.next(CellState::Alive, n(1, 0), &mut rng),
            Transition::new(CellState::Dead, -1)
        );
    }

    #[test]
    fn cancer_starves_without_alive_neighbors() {
        let rule = Cancer::new(RuleSpec::conway(), 0.5, 8).unwrap();
        let mut rng = rng();

        assert_eq!(
            rule.next(CellState::Cancerous, n(0, 8), &mut rng),
            Transition::new(CellState::Dead, 0)
        );
        assert_eq!(
            rule.next(CellState::Cancerous, n(1, 0), &mut rng),
            Transition::unchanged(CellState::Cancerous)
        );
    }

    #[test]
    fn spread_needs_both_neighbor_kinds() {
        let rule = Cancer::new(RuleSpec::conway(), 0.0, 8).unwrap();
        let mut rng = rng();

        for _ in 0..100 {
            // only cancer nearby: nothing to feed on
            assert_eq!(
                rule.next(CellState::Dead, n(0, 3), &mut rng).state,
                CellState::Dead
            );
            // only alive nearby: plain birth
            assert_eq!(
                rule.next(CellState::Dead, n(3, 0), &mut rng),
                Transition::new(CellState::Alive, 1)
            );
        }
    }

    #[test]
    fn spread_probability_follows_growth_rate() {
        let rule = Cancer::new(RuleSpec::conway(), 0.0, 8).unwrap();
        let mut rng = rng();

        let trials = 9000;
        let spread = (0..trials)
            .filter(|_| rule.next(CellState::Dead, n(1, 1), &mut rng).state == CellState::Cancerous)
            .count();

        // draws in 0..=8 below 8 succeed 8 times out of 9
        assert!((7600..=8400).contains(&spread), "spread {spread} times");
    }

    #[test]
    fn failed_spread_falls_through_to_birth() {
        let rule = Cancer::new(RuleSpec::conway(), 0.0, 1).unwrap();
        let mut rng = rng();

        let outcomes: Vec<_> = (0..500)
            .map(|_| rule.next(CellState::Dead, n(3, 1), &mut rng))
            .collect();

        assert!(outcomes.contains(&Transition::new(CellState::Cancerous, 0)));
        assert!(outcomes.contains(&Transition::new(CellState::Alive, 1)));
        assert!(outcomes.iter().all(|t| t.state != CellState::Dead));
    }

    #[test]
    fn parameters_name_keeps_float_form() {
        let rule = Cancer::new(RuleSpec::conway(), 0.0, 1).unwrap();
        assert_eq!(rule.parameters_name(), "0.0-1");

        let rule = Cancer::new(RuleSpec::conway(), 0.25, 6).unwrap();
        assert_eq!(rule.parameters_name(), "0.25-6");
    }
}

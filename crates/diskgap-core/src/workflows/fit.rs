use crate::core::gap::kanagawa::{CarvedGap, carve_gap};
use crate::core::models::disk::Disk;
use crate::core::models::grid::RadialGrid;
use crate::core::models::planet::{Planet, PlanetSet};
use crate::core::models::profile::{RadialField, SurfaceDensityProfile};
use crate::engine::config::{GapModelConfig, TimeDomain};
use crate::engine::error::ModelError;
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Exponent of the heuristic time blend `t^0.2`.
const TIME_EXPONENT: f64 = 0.2;

/// Evolves `sig_ini` toward the profile carved by every planet in `planets`:
///
/// `result[i] = sig_ini[i] * (F[i] * t^0.2 + (1 - t^0.2))`, with `F` the
/// product of the planets' gap factors.
///
/// At `t = 0` the initial profile is returned unchanged.
pub fn multi_planet_fit(
    disk: &Disk,
    sig_ini: &SurfaceDensityProfile,
    time: f64,
    planets: &PlanetSet,
    config: &GapModelConfig,
) -> Result<SurfaceDensityProfile, ModelError> {
    run(disk, sig_ini, time, planets, config, &ProgressReporter::new())
}

/// Same as [`multi_planet_fit`], reporting per-planet progress to `reporter`.
#[instrument(skip_all, name = "multi_planet_fit", fields(planets = planets.len(), time = time))]
pub fn run(
    disk: &Disk,
    sig_ini: &SurfaceDensityProfile,
    time: f64,
    planets: &PlanetSet,
    config: &GapModelConfig,
    reporter: &ProgressReporter,
) -> Result<SurfaceDensityProfile, ModelError> {
    sig_ini.ensure_aligned(disk.grid())?;
    let weight = time_weight(time, config.time_domain)?;

    reporter.report(Progress::FitStart {
        planets: planets.len(),
    });

    let gaps = carve_all(disk, planets, config.smoothing, reporter)?;
    warn_on_overlapping_gaps(&gaps);

    let mut combined = vec![1.0; disk.grid().len()];
    for gap in &gaps {
        for (total, factor) in combined.iter_mut().zip(&gap.factors) {
            *total *= factor;
        }
    }

    // Only an unbounded time domain can push the blend below zero.
    let values = sig_ini
        .values()
        .iter()
        .zip(&combined)
        .map(|(&sigma, &factor)| sigma * (factor * weight + (1.0 - weight)).max(0.0))
        .collect();

    reporter.report(Progress::FitFinish);
    debug!(planets = gaps.len(), weight, "Gap profile evaluated.");

    SurfaceDensityProfile::new(values)
}

/// Entry point for callers holding plain arrays: validates the inputs into
/// the typed model and evaluates [`multi_planet_fit`].
///
/// `alpha` and `hp` accept either a scalar or a sequence aligned with `r`.
#[allow(clippy::too_many_arguments)]
pub fn fit_profile(
    r: &[f64],
    sig_ini: &[f64],
    time: f64,
    masses: &[f64],
    radii: &[f64],
    alpha: impl Into<RadialField>,
    hp: impl Into<RadialField>,
    stellar_mass: f64,
    config: &GapModelConfig,
) -> Result<Vec<f64>, ModelError> {
    let grid = RadialGrid::new(r.to_vec())?;
    let profile = SurfaceDensityProfile::new(sig_ini.to_vec())?;
    let planets = PlanetSet::from_parallel(masses, radii)?;
    let disk = Disk::new(grid, alpha, hp, stellar_mass)?;
    multi_planet_fit(&disk, &profile, time, &planets, config).map(SurfaceDensityProfile::into_vec)
}

fn time_weight(time: f64, domain: TimeDomain) -> Result<f64, ModelError> {
    if !time.is_finite() {
        return Err(ModelError::invalid("time", time, "must be finite"));
    }
    if time < 0.0 {
        return Err(ModelError::invalid("time", time, "must be non-negative"));
    }
    if time > domain.upper_bound() {
        return Err(ModelError::invalid(
            "time",
            time,
            "exceeds the configured time domain [0, 1]",
        ));
    }
    Ok(time.powf(TIME_EXPONENT))
}

fn carve_all(
    disk: &Disk,
    planets: &PlanetSet,
    smooth: Option<f64>,
    reporter: &ProgressReporter,
) -> Result<Vec<CarvedGap>, ModelError> {
    let carve = |(index, planet): (usize, &Planet)| -> Result<CarvedGap, ModelError> {
        let gap = carve_gap(disk, planet, smooth).map_err(|e| e.for_planet(index))?;
        reporter.report(Progress::PlanetCarved {
            index,
            factor_min: gap.params.factor_min,
        });
        Ok(gap)
    };

    #[cfg(not(feature = "parallel"))]
    let iterator = planets.as_slice().iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = planets.as_slice().par_iter().enumerate();

    iterator.map(carve).collect()
}

/// Index pairs of planets whose disturbed regions `a_p ± ΔR2` overlap.
fn overlapping_pairs(gaps: &[CarvedGap]) -> Vec<(usize, usize)> {
    gaps.iter()
        .enumerate()
        .tuple_combinations()
        .filter(|((_, first), (_, second))| first.params.overlaps(&second.params))
        .map(|((i, _), (j, _))| (i, j))
        .collect()
}

fn warn_on_overlapping_gaps(gaps: &[CarvedGap]) {
    for (i, j) in overlapping_pairs(gaps) {
        warn!(
            "Gaps of planets #{} and #{} overlap; their floors are multiplied.",
            i, j
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{AU, M_EARTH, M_JUP, M_SUN};
    use crate::core::gap::kanagawa::{gap_parameters, single_planet_gap_factor};
    use std::sync::Mutex;

    fn log_disk(n: usize) -> Disk {
        let grid = RadialGrid::logspace(0.3 * AU, 100.0 * AU, n).unwrap();
        let hp = RadialField::from_aspect_ratio(&grid, 0.05);
        Disk::new(grid, 1e-3, hp, M_SUN).unwrap()
    }

    fn power_law(disk: &Disk) -> SurfaceDensityProfile {
        SurfaceDensityProfile::from_fn(disk.grid(), |r| 1700.0 * (r / AU).powf(-1.0)).unwrap()
    }

    fn planets(pairs: &[(f64, f64)]) -> PlanetSet {
        pairs
            .iter()
            .map(|&(m, a)| Planet::new(m, a).unwrap())
            .collect()
    }

    #[test]
    fn zero_time_returns_initial_profile_exactly() {
        let disk = log_disk(200);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU), (0.3 * M_JUP, 30.0 * AU)]);
        let result =
            multi_planet_fit(&disk, &sig, 0.0, &set, &GapModelConfig::default()).unwrap();
        assert_eq!(result, sig);
    }

    #[test]
    fn full_time_applies_combined_factor() {
        let disk = log_disk(200);
        let sig = power_law(&disk);
        let planet = Planet::new(M_JUP, 5.0 * AU).unwrap();
        let set = PlanetSet::new(vec![planet]);
        let factors = single_planet_gap_factor(&disk, &planet, None).unwrap();

        let result =
            multi_planet_fit(&disk, &sig, 1.0, &set, &GapModelConfig::default()).unwrap();
        for ((got, s), f) in result.values().iter().zip(sig.values()).zip(&factors) {
            assert!((got - s * f).abs() <= 1e-12 * s);
        }
    }

    #[test]
    fn intermediate_time_blends_with_fifth_root_weight() {
        let disk = log_disk(100);
        let sig = power_law(&disk);
        let planet = Planet::new(M_JUP, 5.0 * AU).unwrap();
        let set = PlanetSet::new(vec![planet]);
        let factors = single_planet_gap_factor(&disk, &planet, None).unwrap();

        let t: f64 = 0.5;
        let w = t.powf(0.2);
        let result = multi_planet_fit(&disk, &sig, t, &set, &GapModelConfig::default()).unwrap();
        for ((got, s), f) in result.values().iter().zip(sig.values()).zip(&factors) {
            let expected = s * (f * w + (1.0 - w));
            assert!((got - expected).abs() <= 1e-12 * s);
        }
    }

    #[test]
    fn profile_far_from_every_planet_is_unchanged() {
        let disk = log_disk(300);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU), (M_JUP, 40.0 * AU)]);
        let edges: Vec<(f64, f64)> = set
            .iter()
            .map(|p| gap_parameters(&disk, p).unwrap().edges())
            .collect();

        let result =
            multi_planet_fit(&disk, &sig, 0.7, &set, &GapModelConfig::default()).unwrap();
        let mut checked = 0;
        for ((r, got), s) in disk.grid().iter().zip(result.values()).zip(sig.values()) {
            if edges.iter().all(|&(inner, outer)| r < inner || r > outer) {
                assert_eq!(got, s);
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn separated_planets_carve_independent_gaps() {
        let disk = log_disk(400);
        let sig = power_law(&disk);
        let config = GapModelConfig::default();
        let a = Planet::new(M_JUP, 3.0 * AU).unwrap();
        let b = Planet::new(M_JUP, 50.0 * AU).unwrap();
        let (b_inner, _) = gap_parameters(&disk, &b).unwrap().edges();
        let (_, a_outer) = gap_parameters(&disk, &a).unwrap().edges();
        assert!(a_outer < b_inner);

        let both =
            multi_planet_fit(&disk, &sig, 1.0, &PlanetSet::new(vec![a, b]), &config).unwrap();
        let only_a =
            multi_planet_fit(&disk, &sig, 1.0, &PlanetSet::new(vec![a]), &config).unwrap();
        let only_b =
            multi_planet_fit(&disk, &sig, 1.0, &PlanetSet::new(vec![b]), &config).unwrap();

        for (i, r) in disk.grid().iter().enumerate() {
            let expected = if r <= a_outer {
                only_a.values()[i]
            } else {
                only_b.values()[i]
            };
            assert_eq!(both.values()[i], expected);
        }
    }

    #[test]
    fn planet_order_does_not_change_the_result() {
        let disk = log_disk(200);
        let sig = power_law(&disk);
        let config = GapModelConfig::default();
        let forward = planets(&[(M_JUP, 5.0 * AU), (10.0 * M_EARTH, 20.0 * AU)]);
        let backward = planets(&[(10.0 * M_EARTH, 20.0 * AU), (M_JUP, 5.0 * AU)]);

        let a = multi_planet_fit(&disk, &sig, 0.4, &forward, &config).unwrap();
        let b = multi_planet_fit(&disk, &sig, 0.4, &backward, &config).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            assert!((x - y).abs() <= 1e-12 * x.abs().max(1e-300));
        }
    }

    #[test]
    fn empty_planet_set_returns_initial_profile() {
        let disk = log_disk(50);
        let sig = power_law(&disk);
        let result = multi_planet_fit(
            &disk,
            &sig,
            1.0,
            &PlanetSet::default(),
            &GapModelConfig::default(),
        )
        .unwrap();
        assert_eq!(result, sig);
    }

    #[test]
    fn negative_time_is_rejected() {
        let disk = log_disk(50);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU)]);
        let result = multi_planet_fit(&disk, &sig, -0.1, &set, &GapModelConfig::default());
        assert!(matches!(
            result,
            Err(ModelError::InvalidParameter {
                parameter: "time",
                ..
            })
        ));
    }

    #[test]
    fn nan_time_is_rejected() {
        let disk = log_disk(50);
        let sig = power_law(&disk);
        let result = multi_planet_fit(
            &disk,
            &sig,
            f64::NAN,
            &PlanetSet::default(),
            &GapModelConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn time_beyond_unity_depends_on_time_domain() {
        let disk = log_disk(100);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU)]);

        let strict = multi_planet_fit(&disk, &sig, 2.0, &set, &GapModelConfig::default());
        assert!(matches!(strict, Err(ModelError::InvalidParameter { .. })));

        let config = GapModelConfig::builder()
            .time_domain(TimeDomain::Unbounded)
            .build()
            .unwrap();
        let relaxed = multi_planet_fit(&disk, &sig, 1e6, &set, &config).unwrap();
        assert!(relaxed.values().iter().all(|&v| v >= 0.0));
        assert!(
            relaxed
                .values()
                .iter()
                .zip(sig.values())
                .all(|(v, s)| *v <= s * (1.0 + 1e-12))
        );
    }

    #[test]
    fn misaligned_initial_profile_is_a_shape_mismatch() {
        let disk = log_disk(50);
        let sig = SurfaceDensityProfile::new(vec![1.0; 49]).unwrap();
        let result = multi_planet_fit(
            &disk,
            &sig,
            0.5,
            &PlanetSet::default(),
            &GapModelConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ModelError::ShapeMismatch {
                expected: 50,
                found: 49,
                ..
            })
        ));
    }

    #[test]
    fn errors_name_the_offending_planet() {
        let disk = log_disk(50);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU), (M_JUP, 500.0 * AU)]);
        let err = multi_planet_fit(&disk, &sig, 0.5, &set, &GapModelConfig::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::OutOfDomain { .. }));
        assert_eq!(err.planet(), Some(1));
    }

    #[test]
    fn smoothing_from_config_is_applied() {
        let disk = log_disk(200);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU)]);
        let sharp =
            multi_planet_fit(&disk, &sig, 1.0, &set, &GapModelConfig::default()).unwrap();
        let config = GapModelConfig::builder().smoothing(2.0).build().unwrap();
        let smooth = multi_planet_fit(&disk, &sig, 1.0, &set, &config).unwrap();
        assert_ne!(sharp, smooth);
    }

    #[test]
    fn run_reports_every_planet() {
        let disk = log_disk(100);
        let sig = power_law(&disk);
        let set = planets(&[(M_JUP, 5.0 * AU), (M_JUP, 40.0 * AU)]);
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        run(&disk, &sig, 0.5, &set, &GapModelConfig::default(), &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&Progress::FitStart { planets: 2 }));
        assert_eq!(events.last(), Some(&Progress::FitFinish));
        let mut carved: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                Progress::PlanetCarved { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        carved.sort_unstable();
        assert_eq!(carved, vec![0, 1]);
    }

    #[test]
    fn overlapping_pairs_name_both_planets() {
        let disk = log_disk(200);
        let set = planets(&[(M_JUP, 5.0 * AU), (M_JUP, 6.0 * AU), (M_JUP, 60.0 * AU)]);
        let gaps = carve_all(&disk, &set, None, &ProgressReporter::new()).unwrap();
        assert_eq!(overlapping_pairs(&gaps), vec![(0, 1)]);
    }

    #[test]
    fn separated_gaps_have_no_overlapping_pairs() {
        let disk = log_disk(200);
        let set = planets(&[(M_JUP, 2.0 * AU), (M_JUP, 60.0 * AU)]);
        let gaps = carve_all(&disk, &set, None, &ProgressReporter::new()).unwrap();
        assert!(overlapping_pairs(&gaps).is_empty());
    }

    #[test]
    fn fit_profile_accepts_plain_arrays() {
        let r: Vec<f64> = [0.5, 1.0, 1.5, 2.0].iter().map(|x| x * AU).collect();
        let sig = vec![10.0, 8.0, 6.0, 4.0];
        let hp: Vec<f64> = r.iter().map(|x| 0.05 * x).collect();
        let result = fit_profile(
            &r,
            &sig,
            1.0,
            &[1e-3 * M_SUN],
            &[AU],
            1e-3,
            hp,
            M_SUN,
            &GapModelConfig::default(),
        )
        .unwrap();

        let ramp = 4.0 * 8.0f64.powf(-0.25) * 0.5 - 0.32;
        let expected = [10.0 * ramp, 8.0 / 129.0, 6.0 * ramp, 4.0];
        for (got, want) in result.iter().zip(expected) {
            assert!((got - want).abs() <= 1e-9 * want);
        }
    }

    #[test]
    fn fit_profile_rejects_mismatched_planet_arrays() {
        let r = [1.0, 2.0, 3.0];
        let result = fit_profile(
            &r,
            &[1.0, 1.0, 1.0],
            0.5,
            &[1e-3, 2e-3],
            &[2.0],
            1e-3,
            0.1,
            1.0,
            &GapModelConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ModelError::ShapeMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn fit_profile_rejects_zero_alpha() {
        let r = [1.0, 2.0, 3.0];
        let result = fit_profile(
            &r,
            &[1.0, 1.0, 1.0],
            0.5,
            &[1e-3],
            &[2.0],
            0.0,
            0.1,
            1.0,
            &GapModelConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ModelError::InvalidParameter {
                parameter: "alpha",
                ..
            })
        ));
    }
}

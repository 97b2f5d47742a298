//! Adaptive Gauss–Kronrod quadrature with a bounded, per-call workspace.
//!
//! Purpose
//! -------
//! Integrate a scalar function over a finite interval to a requested
//! absolute/relative accuracy by globally adaptive bisection (the QUADPACK
//! QAG strategy): at each step the subinterval with the largest error
//! estimate is bisected and re-estimated with a Gauss–Kronrod pair.
//!
//! Key behaviors
//! -------------
//! - Integrands are closures `FnMut(f64) -> Result<f64, E>`; the first error
//!   returned by the integrand aborts the integration and is handed back as
//!   [`QuadFailure::Integrand`] without any further evaluation.
//! - Non-finite integrand values abort with
//!   [`QuadError::NonFiniteIntegrand`] instead of poisoning the estimate.
//! - The number of subintervals never exceeds [`QuadTolerances::limit`], so
//!   every call terminates after a bounded number of evaluations.
//! - Roundoff and pathological-integrand detection follow QUADPACK: repeated
//!   non-improving bisections raise [`QuadError::RoundoffDetected`], and
//!   subintervals collapsing to machine precision raise
//!   [`QuadError::BadIntegrandBehaviour`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Bounds are finite with `lower <= upper`; `lower == upper` integrates to
//!   exactly zero without evaluating the integrand.
//! - An [`IntegrationWorkspace`] belongs to one integration at a time. It is
//!   cleared at the start of every call and may be reused sequentially, but
//!   it is never shared between concurrent integrations.
//!
//! Conventions
//! -----------
//! - `epsabs = 0` requests a purely relative tolerance; in that case
//!   `epsrel` must be at least `50·ε_mach`.
//! - The reported `abserr` is the QUADPACK-rescaled Kronrod–Gauss
//!   difference, summed over subintervals.
//!
//! Testing notes
//! -------------
//! - Unit tests integrate polynomials, trigonometric and Gaussian integrands
//!   with known values, check error surfacing for exhausted limits, invalid
//!   configuration, non-finite values and integrand errors, and verify that
//!   workspace reuse is bit-for-bit deterministic.
use crate::numerics::errors::{QuadError, QuadFailure, QuadResult};

/// Gauss–Kronrod rule used on each subinterval.
///
/// - `GaussKronrod15`: 7-point Gauss / 15-point Kronrod.
/// - `GaussKronrod21`: 10-point Gauss / 21-point Kronrod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadRule {
    GaussKronrod15,
    #[default]
    GaussKronrod21,
}

impl QuadRule {
    /// Kronrod abscissae (positive half, centre last), Kronrod weights, and
    /// Gauss weights for this rule.
    fn tables(&self) -> (&'static [f64], &'static [f64], &'static [f64]) {
        match self {
            QuadRule::GaussKronrod15 => (&XGK15, &WGK15, &WG15),
            QuadRule::GaussKronrod21 => (&XGK21, &WGK21, &WG21),
        }
    }

    /// Number of integrand evaluations per application of the rule.
    pub fn points(&self) -> usize {
        match self {
            QuadRule::GaussKronrod15 => 15,
            QuadRule::GaussKronrod21 => 21,
        }
    }
}

const XGK15: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.000_000_000_000_000_000_000_000_000_000_000,
];

const WGK15: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

const WG15: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

const XGK21: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.000_000_000_000_000_000_000_000_000_000_000,
];

const WGK21: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_600_525_478_048,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

const WG21: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

/// QuadTolerances — validated accuracy targets and subdivision budget.
///
/// Fields
/// ------
/// - `epsabs`: absolute tolerance (≥ 0).
/// - `epsrel`: relative tolerance (≥ 0; ≥ `50·ε_mach` when `epsabs == 0`).
/// - `limit`: maximum number of subintervals (≥ 1).
///
/// The integration succeeds once the summed error estimate drops below
/// `max(epsabs, epsrel·|I|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTolerances {
    pub epsabs: f64,
    pub epsrel: f64,
    pub limit: usize,
}

impl QuadTolerances {
    /// Construct validated tolerances.
    ///
    /// Errors
    /// ------
    /// - `QuadError::InvalidTolerance` for negative or non-finite tolerances,
    ///   or a relative tolerance too small to be met when `epsabs == 0`.
    /// - `QuadError::InvalidLimit` when `limit == 0`.
    pub fn new(epsabs: f64, epsrel: f64, limit: usize) -> QuadResult<Self> {
        if !epsabs.is_finite() || !epsrel.is_finite() || epsabs < 0.0 || epsrel < 0.0 {
            return Err(QuadError::InvalidTolerance {
                epsabs,
                epsrel,
                reason: "tolerances must be finite and non-negative",
            });
        }
        if epsabs <= 0.0 && epsrel < 50.0 * f64::EPSILON {
            return Err(QuadError::InvalidTolerance {
                epsabs,
                epsrel,
                reason: "relative tolerance is unreachable in double precision",
            });
        }
        if limit == 0 {
            return Err(QuadError::InvalidLimit { limit });
        }
        Ok(QuadTolerances { epsabs, epsrel, limit })
    }
}

/// One bisected piece of the integration domain with its local estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Subinterval {
    lower: f64,
    upper: f64,
    result: f64,
    abserr: f64,
}

/// IntegrationWorkspace — subinterval storage for one adaptive integration.
///
/// Purpose
/// -------
/// Hold the list of subintervals (bounds, local integral, local error) that
/// the adaptive strategy refines. The capacity is fixed at construction and
/// bounds the number of bisections of any integration run on it.
///
/// Notes
/// -----
/// - The workspace carries no state between calls: each integration clears
///   it first. Reusing one sequentially only saves the allocation.
/// - Concurrent integrations must each own their workspace.
#[derive(Debug, Clone)]
pub struct IntegrationWorkspace {
    intervals: Vec<Subinterval>,
    capacity: usize,
}

impl IntegrationWorkspace {
    /// Allocate a workspace able to hold `capacity` subintervals.
    pub fn new(capacity: usize) -> Self {
        IntegrationWorkspace { intervals: Vec::with_capacity(capacity), capacity }
    }

    /// Maximum number of subintervals.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of subintervals used by the last integration.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn clear(&mut self) {
        self.intervals.clear();
    }

    fn worst_index(&self) -> usize {
        let mut worst = 0;
        for (idx, interval) in self.intervals.iter().enumerate() {
            if interval.abserr > self.intervals[worst].abserr {
                worst = idx;
            }
        }
        worst
    }

    fn sum_results(&self) -> f64 {
        self.intervals.iter().map(|i| i.result).sum()
    }
}

/// QuadOutcome — converged integral estimate.
///
/// Fields
/// ------
/// - `value`: integral estimate.
/// - `abserr`: estimated absolute error (≤ the requested tolerance).
/// - `intervals`: number of subintervals in the final partition.
/// - `evaluations`: total number of integrand evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOutcome {
    pub value: f64,
    pub abserr: f64,
    pub intervals: usize,
    pub evaluations: usize,
}

/// Integrate `f` over `[lower, upper]` with a freshly allocated workspace.
///
/// Parameters
/// ----------
/// - `f`: integrand closure; returning `Err(e)` aborts with
///   `QuadFailure::Integrand(e)`.
/// - `lower`, `upper`: finite bounds with `lower <= upper`.
/// - `tolerances`: validated accuracy targets and subdivision limit.
/// - `rule`: Gauss–Kronrod pair used on each subinterval.
///
/// Returns
/// -------
/// `Result<QuadOutcome, QuadFailure<E>>`
///   - `Ok(QuadOutcome)` when the summed error estimate meets the tolerance.
///   - `Err(QuadFailure::Quadrature(_))` for invalid bounds, non-finite
///     integrand values, or non-convergence.
///   - `Err(QuadFailure::Integrand(_))` for the first integrand error.
pub fn integrate<F, E>(
    f: F, lower: f64, upper: f64, tolerances: &QuadTolerances, rule: QuadRule,
) -> Result<QuadOutcome, QuadFailure<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let mut workspace = IntegrationWorkspace::new(tolerances.limit);
    integrate_with(&mut workspace, f, lower, upper, tolerances, rule)
}

/// Integrate `f` over `[lower, upper]` using a caller-provided workspace.
///
/// Behaves exactly like [`integrate`]; the workspace must have capacity of
/// at least `tolerances.limit`, otherwise `QuadError::WorkspaceTooSmall` is
/// returned before any evaluation.
pub fn integrate_with<F, E>(
    workspace: &mut IntegrationWorkspace, mut f: F, lower: f64, upper: f64,
    tolerances: &QuadTolerances, rule: QuadRule,
) -> Result<QuadOutcome, QuadFailure<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    if workspace.capacity() < tolerances.limit {
        return Err(QuadError::WorkspaceTooSmall {
            capacity: workspace.capacity(),
            limit: tolerances.limit,
        }
        .into());
    }
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(QuadError::InvalidInterval { lower, upper }.into());
    }
    workspace.clear();
    if lower == upper {
        return Ok(QuadOutcome { value: 0.0, abserr: 0.0, intervals: 0, evaluations: 0 });
    }

    let QuadTolerances { epsabs, epsrel, limit } = *tolerances;
    let mut evaluations = 0;

    let first = apply_rule(&mut f, lower, upper, rule, &mut evaluations)?;
    workspace.intervals.push(Subinterval {
        lower,
        upper,
        result: first.result,
        abserr: first.abserr,
    });

    let tolerance = epsabs.max(epsrel * first.result.abs());
    let round_off = 50.0 * f64::EPSILON * first.resabs;

    if first.abserr <= round_off && first.abserr > tolerance {
        return Err(QuadError::RoundoffDetected {
            estimate: first.result,
            abserr: first.abserr,
        }
        .into());
    }
    if (first.abserr <= tolerance && first.abserr != first.resasc) || first.abserr == 0.0 {
        return Ok(QuadOutcome {
            value: first.result,
            abserr: first.abserr,
            intervals: 1,
            evaluations,
        });
    }
    if limit == 1 {
        return Err(QuadError::MaxSubdivisions {
            limit,
            estimate: first.result,
            abserr: first.abserr,
        }
        .into());
    }

    let mut area = first.result;
    let mut errsum = first.abserr;
    let mut roundoff_type1 = 0usize;
    let mut roundoff_type2 = 0usize;
    let mut iteration = 1usize;

    loop {
        let idx = workspace.worst_index();
        let current = workspace.intervals[idx];

        let a1 = current.lower;
        let b1 = 0.5 * (current.lower + current.upper);
        let a2 = b1;
        let b2 = current.upper;

        let left = apply_rule(&mut f, a1, b1, rule, &mut evaluations)?;
        let right = apply_rule(&mut f, a2, b2, rule, &mut evaluations)?;

        let area12 = left.result + right.result;
        let error12 = left.abserr + right.abserr;

        errsum += error12 - current.abserr;
        area += area12 - current.result;

        if left.resasc != left.abserr && right.resasc != right.abserr {
            let delta = current.result - area12;
            if delta.abs() <= 1.0e-5 * area12.abs() && error12 >= 0.99 * current.abserr {
                roundoff_type1 += 1;
            }
            if iteration >= 10 && error12 > current.abserr {
                roundoff_type2 += 1;
            }
        }

        workspace.intervals[idx] =
            Subinterval { lower: a1, upper: b1, result: left.result, abserr: left.abserr };
        workspace.intervals.push(Subinterval {
            lower: a2,
            upper: b2,
            result: right.result,
            abserr: right.abserr,
        });
        iteration += 1;

        let tolerance = epsabs.max(epsrel * area.abs());
        if errsum <= tolerance {
            break;
        }
        if roundoff_type1 >= 6 || roundoff_type2 >= 20 {
            return Err(QuadError::RoundoffDetected { estimate: area, abserr: errsum }.into());
        }
        if subinterval_too_small(a1, a2, b2) {
            return Err(QuadError::BadIntegrandBehaviour { x: a2 }.into());
        }
        if iteration >= limit {
            return Err(QuadError::MaxSubdivisions { limit, estimate: area, abserr: errsum }.into());
        }
    }

    Ok(QuadOutcome {
        value: workspace.sum_results(),
        abserr: errsum,
        intervals: workspace.len(),
        evaluations,
    })
}

/// Local Gauss–Kronrod estimate on one interval.
struct RuleEstimate {
    result: f64,
    abserr: f64,
    resabs: f64,
    resasc: f64,
}

fn apply_rule<F, E>(
    f: &mut F, lower: f64, upper: f64, rule: QuadRule, evaluations: &mut usize,
) -> Result<RuleEstimate, QuadFailure<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let (xgk, wgk, wg) = rule.tables();
    let n = xgk.len();

    let center = 0.5 * (lower + upper);
    let half_length = 0.5 * (upper - lower);
    let abs_half_length = half_length.abs();

    let mut eval = |x: f64| -> Result<f64, QuadFailure<E>> {
        *evaluations += 1;
        let value = f(x).map_err(QuadFailure::Integrand)?;
        if !value.is_finite() {
            return Err(QuadError::NonFiniteIntegrand { x, value }.into());
        }
        Ok(value)
    };

    let mut fv1 = [0.0_f64; 11];
    let mut fv2 = [0.0_f64; 11];

    let f_center = eval(center)?;
    let mut result_gauss = 0.0;
    let mut result_kronrod = f_center * wgk[n - 1];
    let mut result_abs = result_kronrod.abs();

    if n % 2 == 0 {
        result_gauss = f_center * wg[n / 2 - 1];
    }

    for j in 0..(n - 1) / 2 {
        let jtw = 2 * j + 1;
        let abscissa = half_length * xgk[jtw];
        let f1 = eval(center - abscissa)?;
        let f2 = eval(center + abscissa)?;
        fv1[jtw] = f1;
        fv2[jtw] = f2;
        result_gauss += wg[j] * (f1 + f2);
        result_kronrod += wgk[jtw] * (f1 + f2);
        result_abs += wgk[jtw] * (f1.abs() + f2.abs());
    }

    for j in 0..n / 2 {
        let jtwm1 = 2 * j;
        let abscissa = half_length * xgk[jtwm1];
        let f1 = eval(center - abscissa)?;
        let f2 = eval(center + abscissa)?;
        fv1[jtwm1] = f1;
        fv2[jtwm1] = f2;
        result_kronrod += wgk[jtwm1] * (f1 + f2);
        result_abs += wgk[jtwm1] * (f1.abs() + f2.abs());
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = wgk[n - 1] * (f_center - mean).abs();
    for j in 0..n - 1 {
        result_asc += wgk[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let err = (result_kronrod - result_gauss) * half_length;
    let result = result_kronrod * half_length;
    let resabs = result_abs * abs_half_length;
    let resasc = result_asc * abs_half_length;

    Ok(RuleEstimate { result, abserr: rescale_error(err, resabs, resasc), resabs, resasc })
}

fn rescale_error(err: f64, result_abs: f64, result_asc: f64) -> f64 {
    let mut err = err.abs();
    if result_asc != 0.0 && err != 0.0 {
        let scale = (200.0 * err / result_asc).powf(1.5);
        err = if scale < 1.0 { result_asc * scale } else { result_asc };
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        let min_err = 50.0 * f64::EPSILON * result_abs;
        if min_err > err {
            err = min_err;
        }
    }
    err
}

fn subinterval_too_small(a1: f64, a2: f64, b2: f64) -> bool {
    let tmp = (1.0 + 100.0 * f64::EPSILON) * (a2.abs() + 1000.0 * f64::MIN_POSITIVE);
    a1.abs() <= tmp && b2.abs() <= tmp
}

//! Harness runner: link specifications in, walk report out.
//!
//! # Pipeline
//!
//! ```text
//! specs → (single-link truncation) → resolve → derive max_size
//!   → RibbonEnvV1 + ActionSampler + ChaCha8Rng → run_walk
//!   → obstruction check (checks on) → export solved (exports on)
//! ```
//!
//! The runner owns orchestration only. Move legality, episode semantics and
//! the retry loop live in `ribbon_search`.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use ribbon_search::driver::run_walk;
use ribbon_search::env::{NamedLinkV1, RibbonEnvV1};
use ribbon_search::error::{EpisodeError, SearchError};
use ribbon_search::oracle::{
    DeterminantObstruction, DiagramOracle, GlobalOracle, ObstructionVerdictV1, SliceObstruction,
};
use ribbon_search::policy::WalkPolicyV1;
use ribbon_search::report::WalkReportV1;
use ribbon_search::sampler::{ActionSampler, DEFAULT_WEIGHTS};

use crate::export::{ExportError, JsonArtifactExporter, SolvedExporter};
use crate::input::{resolve_all, InputError, LinkSpec};

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfigV1 {
    pub specs: Vec<LinkSpec>,
    pub policy: WalkPolicyV1,
    /// Category weights `[start, attach, over, under, twist]`.
    pub weights: [f64; 5],
    pub seed: u64,
    /// Run the slice obstruction on a solved link. Forces single-link mode.
    pub use_checks: bool,
    /// Write solved-diagram artifacts to `output_dir`.
    pub save_solved: bool,
    pub output_dir: PathBuf,
}

impl Default for RunConfigV1 {
    fn default() -> Self {
        Self {
            specs: Vec::new(),
            policy: WalkPolicyV1::default(),
            weights: DEFAULT_WEIGHTS,
            seed: 0,
            use_checks: false,
            save_solved: false,
            output_dir: PathBuf::from("solved"),
        }
    }
}

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// A link specification could not be resolved.
    Input(InputError),
    /// The environment or sampler rejected the configuration.
    Search(SearchError),
    /// The walk misused the episode controller.
    Episode(EpisodeError),
    /// Writing a solved artifact failed.
    Export(ExportError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input error: {e}"),
            Self::Search(e) => write!(f, "search setup error: {e}"),
            Self::Episode(e) => write!(f, "episode error: {e}"),
            Self::Export(e) => write!(f, "export error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Episode(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

impl From<InputError> for RunError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<EpisodeError> for RunError {
    fn from(e: EpisodeError) -> Self {
        Self::Episode(e)
    }
}

impl From<ExportError> for RunError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutputV1 {
    /// Resolved links actually walked, in order.
    pub links: Vec<NamedLinkV1>,
    pub max_size: usize,
    pub report: WalkReportV1,
    /// Verdict for the solved link, when checks are on and one was solved.
    pub obstruction: Option<ObstructionVerdictV1>,
    /// Artifacts written for solved links.
    pub exported: Vec<PathBuf>,
}

/// Run with the built-in oracle, obstruction and JSON exporter.
///
/// # Errors
///
/// See [`run_with`].
pub fn run(config: &RunConfigV1) -> Result<RunOutputV1, RunError> {
    let exporter = JsonArtifactExporter::new(&config.output_dir);
    run_with(
        config,
        Box::new(GlobalOracle::default()),
        &DeterminantObstruction,
        &exporter,
    )
}

/// Run with injected capabilities.
///
/// # Errors
///
/// Returns [`RunError`] if an input does not resolve, the configuration is
/// rejected, or an export fails.
pub fn run_with(
    config: &RunConfigV1,
    oracle: Box<dyn DiagramOracle>,
    obstruction: &dyn SliceObstruction,
    exporter: &dyn SolvedExporter,
) -> Result<RunOutputV1, RunError> {
    let mut specs: &[LinkSpec] = &config.specs;
    if config.use_checks && specs.len() > 1 {
        warn!(
            link = %specs[0].label,
            dropped = specs.len() - 1,
            "checks run on a single link only; walking the first link"
        );
        specs = &specs[..1];
    }
    let links = resolve_all(specs)?;

    let mut policy = config.policy.clone();
    policy.single_link |= config.use_checks;
    let diagrams: Vec<_> = links.iter().map(|l| l.diagram.clone()).collect();
    let max_size = policy.resolve_max_size(&diagrams);
    policy.max_size = Some(max_size);

    let mut env = RibbonEnvV1::with_oracle(links.clone(), &policy, oracle)?;
    let sampler = ActionSampler::from_category_weights(&config.weights, &env.action_space())?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    info!(
        links = links.len(),
        max_size,
        max_bands = policy.max_bands,
        max_steps = policy.max_steps,
        max_tries = policy.max_tries,
        seed = config.seed,
        uniform = sampler.is_uniform(),
        "starting random walk"
    );

    let report = run_walk(&mut env, &sampler, &policy, &mut rng)?;

    let obstruction = if config.use_checks {
        report
            .links
            .iter()
            .find(|outcome| outcome.is_solved())
            .map(|outcome| {
                let verdict = obstruction.check(&links[outcome.index].diagram);
                match verdict {
                    ObstructionVerdictV1::Obstructed { determinant } => warn!(
                        link = %outcome.name,
                        determinant,
                        "determinant is not a square; the link cannot be ribbon"
                    ),
                    ObstructionVerdictV1::NoObstruction { determinant } => info!(
                        link = %outcome.name,
                        ?determinant,
                        "no slice obstruction found"
                    ),
                }
                verdict
            })
    } else {
        None
    };

    let mut exported = Vec::new();
    if config.save_solved {
        for outcome in report.links.iter().filter(|o| o.is_solved()) {
            let path = exporter.export(&links[outcome.index], outcome)?;
            info!(link = %outcome.name, path = %path.display(), "saved solved diagram");
            exported.push(path);
        }
    }

    Ok(RunOutputV1 {
        links,
        max_size,
        report,
        obstruction,
        exported,
    })
}

//! Procedural bonsai generation.
//!
//! Stages run in order over one owned [`Canvas`]: pot, trunk, roots,
//! branches, canopies. Each stage reads the geometry produced before it and
//! every random draw comes from the single generator passed in, so a fixed
//! seed always grows the same tree.

pub mod branch;
pub mod canopy;
pub mod pot;
pub mod raster;
pub mod roots;
pub mod trunk;

use crate::canvas::Canvas;
use crate::colors::ColorTable;
use crate::config::Style;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use branch::Branch;
use canopy::LeafCanopy;
use pot::Pot;
use roots::Root;
use trunk::Trunk;

pub const MIN_WIDTH: usize = 20;
pub const MIN_HEIGHT: usize = 10;

/// Recommended upper bound for a single generation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A generated tree: the finished canvas, its colour table and the geometry
/// every stage produced.
#[derive(Debug, Clone)]
pub struct Bonsai {
    pub canvas: Canvas,
    pub colors: &'static ColorTable,
    pub style: Style,
    pub pot: Pot,
    pub trunk: Trunk,
    pub roots: Vec<Root>,
    pub branches: Vec<Branch>,
    pub canopies: Vec<LeafCanopy>,
}

impl Bonsai {
    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    pub fn to_text(&self) -> String {
        self.canvas.to_text()
    }
}

pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(Error::InvalidDimensions {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    Ok(())
}

/// Configurable entry point for one generation.
#[derive(Debug, Clone)]
pub struct Generator {
    width: usize,
    height: usize,
    style: Option<Style>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Generator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            style: None,
            cancel: None,
        }
    }

    /// Pin the growth style instead of drawing one at random.
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Flag checked between stages; raising it aborts with [`Error::Cancelled`].
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Grow one tree.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Bonsai> {
        validate_dimensions(self.width, self.height)?;
        let (width, height) = (self.width, self.height);

        let style = match self.style {
            Some(style) => style,
            None => Style::random(rng),
        };
        tracing::debug!(width, height, %style, "growing bonsai");

        let mut canvas = Canvas::new(width, height);

        let pot = pot::build_pot(width, height);
        pot::rasterize_pot(&mut canvas, &pot, rng);
        tracing::debug!(?pot, "pot placed");
        self.check_cancelled()?;

        let trunk = trunk::build_trunk_waypoints(&pot, width, height, style, rng);
        trunk::rasterize_trunk(&mut canvas, &trunk);
        tracing::debug!(
            waypoints = trunk.waypoints.len(),
            length = trunk.length,
            "trunk grown"
        );
        self.check_cancelled()?;

        let roots = roots::build_roots(trunk.base(), rng);
        roots::rasterize_roots(&mut canvas, &roots, rng);
        tracing::debug!(roots = roots.len(), "roots spread");
        self.check_cancelled()?;

        let branches = branch::build_branches(&trunk, width, rng);
        for b in &branches {
            branch::rasterize_branch(&mut canvas, b);
        }
        tracing::debug!(branches = branches.len(), "branches grown");
        self.check_cancelled()?;

        let mut canopies: Vec<LeafCanopy> = branches
            .iter()
            .map(|b| canopy::build_branch_canopy(b, rng))
            .collect();
        canopies.push(canopy::build_apex_canopy(trunk.apex(), trunk.length, rng));
        for c in &canopies {
            canopy::rasterize_canopy(&mut canvas, c, rng);
        }
        tracing::debug!(canopies = canopies.len(), "canopies filled");

        Ok(Bonsai {
            canvas,
            colors: ColorTable::global(),
            style,
            pot,
            trunk,
            roots,
            branches,
            canopies,
        })
    }
}

/// Grow a tree with a random style.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Bonsai> {
    Generator::new(width, height).run(rng)
}

/// Grow a tree from `seed` on a worker thread, giving up after `timeout`.
///
/// On timeout the worker's cancel flag is raised so it stops at the next
/// stage boundary.
pub fn generate_with_timeout(
    width: usize,
    height: usize,
    seed: u64,
    style: Option<Style>,
    timeout: Duration,
) -> Result<Bonsai> {
    validate_dimensions(width, height)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let mut generator = Generator::new(width, height).cancel_flag(Arc::clone(&cancel));
    if let Some(style) = style {
        generator = generator.style(style);
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        // Receiver may be gone after a timeout.
        let _ = tx.send(generator.run(&mut rng));
    });

    await_worker(&rx, timeout, &cancel, seed)
}

/// Wait for the worker's result. A worker that drops its sender without
/// sending (a panic inside a stage) is reported as [`Error::WorkerFailed`].
fn await_worker<T>(rx: &mpsc::Receiver<Result<T>>, timeout: Duration, cancel: &AtomicBool, seed: u64) -> Result<T> {
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            tracing::warn!(?timeout, seed, "bonsai generation timed out");
            Err(Error::TimedOut(timeout))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            tracing::error!(seed, "bonsai worker exited without a result");
            Err(Error::WorkerFailed { seed })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_canvases() {
        let mut rng = StdRng::seed_from_u64(0);
        for (w, h) in [(0, 35), (90, 0), (19, 35), (90, 9)] {
            let err = generate(w, h, &mut rng).unwrap_err();
            assert!(matches!(err, Error::InvalidDimensions { .. }), "{}x{}", w, h);
        }
    }

    #[test]
    fn minimum_canvas_grows() {
        let mut rng = StdRng::seed_from_u64(0);
        let bonsai = generate(MIN_WIDTH, MIN_HEIGHT, &mut rng).unwrap();
        assert_eq!(bonsai.height(), MIN_HEIGHT);
        assert_eq!(bonsai.width(), MIN_WIDTH);
    }

    #[test]
    fn pinned_style_is_used() {
        let mut rng = StdRng::seed_from_u64(1);
        let bonsai = Generator::new(90, 35).style(Style::Wild).run(&mut rng).unwrap();
        assert_eq!(bonsai.style, Style::Wild);
    }

    #[test]
    fn raised_flag_cancels() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut rng = StdRng::seed_from_u64(1);
        let err = Generator::new(90, 35).cancel_flag(flag).run(&mut rng).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[test]
    fn canopy_per_branch_plus_apex() {
        let mut rng = StdRng::seed_from_u64(21);
        let bonsai = generate(90, 35, &mut rng).unwrap();
        assert_eq!(bonsai.canopies.len(), bonsai.branches.len() + 1);
        let apex = bonsai.trunk.apex();
        let last = bonsai.canopies.last().unwrap();
        assert_eq!(last.center_x, apex.x);
    }

    #[test]
    fn timeout_path_matches_direct_run() {
        let threaded = generate_with_timeout(90, 35, 42, Some(Style::Dense), DEFAULT_TIMEOUT).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let direct = Generator::new(90, 35).style(Style::Dense).run(&mut rng).unwrap();
        assert_eq!(threaded.canvas, direct.canvas);
    }

    #[test]
    fn dead_worker_is_not_an_io_error() {
        let (tx, rx) = mpsc::channel::<Result<()>>();
        thread::spawn(move || {
            let _tx = tx;
            panic!("stage blew up");
        })
        .join()
        .unwrap_err();

        let cancel = AtomicBool::new(false);
        let err = await_worker(&rx, DEFAULT_TIMEOUT, &cancel, 9).unwrap_err();
        assert!(matches!(err, Error::WorkerFailed { seed: 9 }), "{:?}", err);
        assert!(!cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn silent_worker_times_out_and_cancels() {
        let (_tx, rx) = mpsc::channel::<Result<()>>();
        let cancel = AtomicBool::new(false);
        let err = await_worker(&rx, Duration::from_millis(10), &cancel, 3).unwrap_err();
        assert!(matches!(err, Error::TimedOut(_)));
        assert!(cancel.load(Ordering::Relaxed));
    }
}

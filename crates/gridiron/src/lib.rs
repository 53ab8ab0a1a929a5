//! A genetic-algorithm lineup optimizer for daily fantasy sports.
//!
//! Feed it a pool of players (position, salary, projected points) and
//! it searches for the highest-projected lineup under the salary cap
//! and position map, or for a whole slate of mutually diverse lineups.
//!
//! ```no_run
//! use gridiron::*;
//!
//! let optimizer = Optimizer::builder()
//!     .rows(vec![
//!         PlayerRow::new("Mahomes", "QB", 8_200, 24.1),
//!         PlayerRow::new("CMC", "RB", 9_400, 22.8),
//!         // ... the rest of the slate
//!     ])
//!     .salary_cap(50_000)
//!     .target_lineups(10)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let outcome = optimizer.run().unwrap();
//! println!("best: {:?} ({} pts)", outcome.best_lineup, outcome.best_score);
//! ```

pub use gridiron_alters::*;
pub use gridiron_core::*;
pub use gridiron_engines::*;
pub use gridiron_error::*;
pub use gridiron_selectors::*;

//! vm_algo — the pure ranking engine. No filesystem, no crypto, no clock:
//! every function here is a total function of its preference lists (modulo
//! the validation errors in [`AlgoError`]).
//!
//! Four tallying methods are provided, each grounded in
//! `evote_ranking/algorithms.py`: [`tally::simple_majority`],
//! [`tally::instant_runoff`], [`tally::borda`], and [`tally::schulze`].

pub mod errors;
pub mod tally;

pub use errors::AlgoError;
pub use tally::borda::{borda, BordaMode};
pub use tally::instant_runoff::instant_runoff;
pub use tally::schulze::schulze;
pub use tally::simple_majority::simple_majority;

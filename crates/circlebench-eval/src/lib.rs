//! # circlebench-eval
//!
//! Deterministic scoring for generated SVG circle scenes.
//!
//! Given raw model output and a set of required overlap pairs, this crate
//! extracts the circles from the markup, detects which pairs of circles
//! actually overlap, and classifies every pair as correct, missed, or
//! hallucinated.
//!
//! ## Key Types
//!
//! - [`Circle`] - A labeled disk in 2-D space
//! - [`Pair`] - An unordered pair of circle labels
//! - [`EvalReport`] - The scored outcome of one evaluation
//!
//! Parsing and scoring are pure functions over immutable inputs; the same
//! markup and requirements always produce the same report.

mod circle;
mod evaluator;
mod overlap;
mod pair;
mod parser;
mod report;

pub use circle::Circle;
pub use evaluator::{evaluate, EvaluationInput};
pub use overlap::detect_overlaps;
pub use pair::Pair;
pub use parser::{extract_svg, parse_circles, ParsedScene, SvgParseError};
pub use report::EvalReport;

//! Patch-and-flash workflow for PIP tag firmware: per-tag id and
//! calibration constants are patched into a template image, then flashed
//! and verified through mspdebug. Binary patching, float encoding and
//! device programming are delegated to external tools.

pub mod api;
pub mod calibration;
pub mod operation;
pub mod operator;
pub mod patch;
pub mod scratch;
pub mod tools;

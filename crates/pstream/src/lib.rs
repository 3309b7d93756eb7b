//! PowerShell token-stream metrics CLI and library.
//!
//! The heavy lifting lives in `pstream-tokens` (artifact reading) and
//! `pstream-metrics` (the fillers); this crate is the collaborator surface:
//! it maps artifact files on disk to per-file analysis reports and prints
//! them. Producing the artifacts (running the out-of-process tokenizer) and
//! forwarding reports into a host platform are the caller's business.

pub mod commands;

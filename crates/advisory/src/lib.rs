//! Screening Advisory
//!
//! Turns a model verdict into the banner text and follow-up advice shown
//! to the user.

mod verdict;

pub use verdict::{format_confidence, BannerStyle, Verdict, VerdictKind, HEALTHY_LIFESTYLE_NOTE};

//! A contiguous growable array type whose reallocation factor is tiered by
//! element size: small elements over-allocate aggressively (fewer
//! reallocations), large elements grow conservatively (less wasted memory).

mod growth;
pub mod tiervec;
pub use tiervec::TierVec;

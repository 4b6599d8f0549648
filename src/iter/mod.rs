mod overlaps;
mod owned_iter;
mod ref_iter;

pub(crate) use overlaps::*;
pub(crate) use owned_iter::*;
pub(crate) use ref_iter::*;

//! Validated observer query parameters.

use crate::{Result, error::CrowdError};

/// The `(m, k)` half of an observer query.
///
/// `m` is the minimum path length separating two informants and `k` the
/// number of pairwise independent informants required.
///
/// # Examples
/// ```
/// use crowd_core::{CrowdError, ObserverParams};
///
/// let params = ObserverParams::new(2, 3)?;
/// assert_eq!((params.m(), params.k()), (2, 3));
///
/// assert_eq!(
///     ObserverParams::new(1, 1),
///     Err(CrowdError::InvalidParameter { m: 1, k: 1 }),
/// );
/// # Ok::<(), CrowdError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ObserverParams {
    m: u32,
    k: u32,
}

impl ObserverParams {
    /// Validates `m >= 1` and `k > 1`.
    ///
    /// # Errors
    /// Returns [`CrowdError::InvalidParameter`] otherwise.
    pub fn new(m: u32, k: u32) -> Result<Self> {
        if m < 1 || k <= 1 {
            return Err(CrowdError::InvalidParameter { m, k });
        }
        Ok(Self { m, k })
    }

    /// Returns the minimum independent path length.
    #[must_use]
    pub fn m(&self) -> u32 {
        self.m
    }

    /// Returns the minimum informant count.
    #[must_use]
    pub fn k(&self) -> u32 {
        self.k
    }

    pub(crate) fn informants(&self) -> usize {
        usize::try_from(self.k).unwrap_or(usize::MAX)
    }
}

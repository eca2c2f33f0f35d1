/// Growth factor applied on reallocation, keyed by element size in bytes.
///
/// Small elements amortize cheaply, so over-allocation trades memory for
/// fewer reallocations; large elements make over-allocation costly.
pub(crate) fn growth_factor(elem_size: usize) -> f64 {
    match elem_size {
        0..=8 => 10.0,
        9..=32 => 5.0,
        33..=128 => 2.0,
        _ => 1.5,
    }
}

/// Element capacity of the next buffer, given the current length.
///
/// The scaled count truncates toward zero and is floored at `len + 1`, so a
/// push always makes progress even when `len` is 0 or the factor rounds to
/// less than one extra slot. The factor applies to at least one element, so
/// the very first allocation already reserves a full size-class batch.
pub(crate) fn grown_capacity(len: usize, elem_size: usize) -> usize {
    let scaled = (len.max(1) as f64 * growth_factor(elem_size)) as usize;
    scaled.max(len + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_tiers() {
        assert_eq!(growth_factor(1), 10.0);
        assert_eq!(growth_factor(8), 10.0);
        assert_eq!(growth_factor(9), 5.0);
        assert_eq!(growth_factor(32), 5.0);
        assert_eq!(growth_factor(33), 2.0);
        assert_eq!(growth_factor(128), 2.0);
        assert_eq!(growth_factor(129), 1.5);
        assert_eq!(growth_factor(4096), 1.5);
    }

    #[test]
    fn first_allocation_reserves_a_batch() {
        assert_eq!(grown_capacity(0, 8), 10);
        assert_eq!(grown_capacity(0, 32), 5);
        assert_eq!(grown_capacity(0, 128), 2);
        assert_eq!(grown_capacity(0, 256), 1);
    }

    #[test]
    fn scaled_growth() {
        assert_eq!(grown_capacity(10, 8), 100);
        assert_eq!(grown_capacity(5, 32), 25);
        assert_eq!(grown_capacity(100, 128), 200);
        // 1.5 * 3 truncates to 4
        assert_eq!(grown_capacity(3, 256), 4);
    }

    #[test]
    fn floor_guarantees_progress() {
        // 1.5 * 1 truncates to 1, the floor bumps it to len + 1
        assert_eq!(grown_capacity(1, 256), 2);
    }
}

use crate::foundation::math::Fnv1a64;
use crate::grid::model::ColorGrid;

/// 128-bit content fingerprint of a sequence of grids (dimensions and colors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChainFingerprint {
    /// Hash of the default-seeded FNV-1a stream.
    pub hi: u64,
    /// Hash of the second, differently seeded stream.
    pub lo: u64,
}

impl std::fmt::Display for ChainFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

impl serde::Serialize for ChainFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Fingerprint `grids` in order. Equal sequences hash equal; the axis count is mixed in.
pub fn fingerprint_grids<'a, const N: usize>(
    grids: impl IntoIterator<Item = &'a ColorGrid<N>>,
) -> ChainFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    write_u8_pair(&mut a, &mut b, N as u8);
    let mut count = 0u64;
    for grid in grids {
        count += 1;
        for dim in grid.dims() {
            a.write_u32(dim);
            b.write_u32(dim);
        }
        for c in grid.cells() {
            write_u8_pair(&mut a, &mut b, c.r);
            write_u8_pair(&mut a, &mut b, c.g);
            write_u8_pair(&mut a, &mut b, c.b);
        }
    }
    a.write_u64(count);
    b.write_u64(count);

    ChainFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

#[cfg(test)]
#[path = "../../tests/unit/chain/fingerprint.rs"]
mod tests;

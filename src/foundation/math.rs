#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Channel `i` of `n` evenly spaced steps from `from` to `to`, rounded to nearest.
pub(crate) fn lerp_channel(from: u8, to: u8, i: usize, n: usize) -> u8 {
    if n <= 1 {
        return from;
    }
    let t = i as f64 / (n - 1) as f64;
    let v = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv_matches_reference_vectors() {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(b"");
        assert_eq!(h.finish(), 0xcbf2_9ce4_8422_2325);

        let mut h = Fnv1a64::new_default();
        h.write_bytes(b"a");
        assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn mul_div255_rounds() {
        assert_eq!(mul_div255_u16(255, 255), 255);
        assert_eq!(mul_div255_u16(128, 255), 128);
        assert_eq!(mul_div255_u16(0, 200), 0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp_channel(10, 250, 0, 256), 10);
        assert_eq!(lerp_channel(10, 250, 255, 256), 250);
        assert_eq!(lerp_channel(0, 255, 1, 3), 128);
        assert_eq!(lerp_channel(40, 90, 0, 1), 40);
    }
}

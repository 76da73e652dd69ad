//! Value objects: the XOR-distance metric and the ban duration newtype.

use crate::domain::entities::NodeId;

/// The 256-bit XOR distance between two node ids, ordered lexicographically
/// (as an unsigned big-endian integer) so that `closest()` can sort
/// peers by true ascending distance rather than merely by bucket index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance([u8; 32]);

impl Distance {
    pub fn between(a: &NodeId, b: &NodeId) -> Self {
        let mut out = [0u8; 32];
        for i in 0..32 {
            out[i] = a.as_bytes()[i] ^ b.as_bytes()[i];
        }
        Self(out)
    }

    /// The k-bucket index this distance falls into: the number of
    /// leading bits shared between the two ids, i.e. the position of the
    /// first set bit of the XOR value. Identical ids report bucket 256
    /// (one past the last real bucket — callers should special-case it).
    pub fn common_prefix_len(&self) -> usize {
        for (i, byte) in self.0.iter().enumerate() {
            if *byte != 0 {
                return i * 8 + byte.leading_zeros() as usize;
            }
        }
        256
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let id = NodeId::new([0xAB; 32]);
        let d = Distance::between(&id, &id);
        assert_eq!(d.as_bytes(), &[0u8; 32]);
        assert_eq!(d.common_prefix_len(), 256);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = NodeId::new([0b1010_0000; 32]);
        let b = NodeId::new([0b0101_0000; 32]);
        assert_eq!(Distance::between(&a, &b), Distance::between(&b, &a));
    }

    #[test]
    fn common_prefix_len_matches_leading_bit_position() {
        let local = NodeId::new([0u8; 32]);
        let mut remote = [0u8; 32];
        remote[0] = 0b1000_0000;
        assert_eq!(Distance::between(&local, &NodeId::new(remote)).common_prefix_len(), 0);

        let mut remote2 = [0u8; 32];
        remote2[1] = 0b1000_0000;
        assert_eq!(Distance::between(&local, &NodeId::new(remote2)).common_prefix_len(), 8);
    }

    #[test]
    fn ordering_is_ascending_lexicographic() {
        let target = NodeId::new([0u8; 32]);
        let near = NodeId::new({
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        });
        let far = NodeId::new({
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        });
        assert!(Distance::between(&target, &near) < Distance::between(&target, &far));
    }
}

//! Hashlock and Merkle primitives.
//!
//! Partial-fill orders commit to `parts_amount + 1` secrets with a Merkle
//! root over the ordered leaves `keccak(secret_i)`. Pairs are hashed in
//! lexicographic order at every level, so producer and verifier agree on
//! `(a, b)` and `(b, a)` by construction. A builder that sorts differently
//! would silently produce proofs the settlement side rejects.

use crate::error::MerkleError;
use alloy::primitives::{keccak256, B256};

/// Hashes a secret preimage into its 32-byte leaf/hashlock.
pub fn hash_secret(secret: &[u8]) -> B256 {
    keccak256(secret)
}

/// Hashes two nodes in lexicographic order: `keccak(min(a,b) || max(a,b))`.
pub fn hash_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

/// Folds `proof` from `leaf` upward and compares against `root`.
///
/// An empty proof degenerates to `leaf == root`, which is exactly the
/// single-fill case where the hashlock commits to one secret directly.
pub fn verify_proof(leaf: B256, proof: &[B256], root: B256) -> bool {
    let mut acc = leaf;
    for &sibling in proof {
        acc = hash_pair(acc, sibling);
    }
    acc == root
}

/// Merkle tree over an ordered set of secret leaves.
///
/// Built eagerly layer by layer; odd layers are padded with the zero hash,
/// matching what [`verify_proof`] reconstructs. Trees here are tiny (one
/// leaf per fill bucket, at most 256), so there is nothing to gain from a
/// compact or lazy representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretTree {
    /// `layers[0]` is the leaf layer; the last layer has exactly one node.
    layers: Vec<Vec<B256>>,
}

impl SecretTree {
    /// Builds a tree from pre-hashed leaves.
    pub fn new(leaves: Vec<B256>) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }
        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let prev = &layers[layers.len() - 1];
            let mut next = Vec::with_capacity(prev.len().div_ceil(2));
            for pair in prev.chunks(2) {
                let right = pair.get(1).copied().unwrap_or(B256::ZERO);
                next.push(hash_pair(pair[0], right));
            }
            layers.push(next);
        }
        Ok(Self { layers })
    }

    /// Builds a tree from raw secrets, hashing each into its leaf first.
    pub fn from_secrets<S: AsRef<[u8]>>(secrets: &[S]) -> Result<Self, MerkleError> {
        Self::new(secrets.iter().map(|s| hash_secret(s.as_ref())).collect())
    }

    /// The root all proofs verify against.
    pub fn root(&self) -> B256 {
        self.layers[self.layers.len() - 1][0]
    }

    /// The leaf at `index`, if in bounds.
    pub fn leaf(&self, index: usize) -> Option<B256> {
        self.layers[0].get(index).copied()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// Whether the tree is empty. Construction forbids it; kept for API
    /// symmetry.
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Generates the inclusion proof for the leaf at `index`.
    ///
    /// Single-leaf trees yield the empty proof.
    pub fn proof(&self, index: usize) -> Result<Vec<B256>, MerkleError> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfBounds { index, leaf_count: self.len() });
        }
        let mut proof = Vec::with_capacity(self.layers.len() - 1);
        let mut pos = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = pos ^ 1;
            proof.push(layer.get(sibling).copied().unwrap_or(B256::ZERO));
            pos /= 2;
        }
        Ok(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| format!("secret_{i:02}_padded_to_32_bytes_min!").into_bytes()).collect()
    }

    #[test]
    fn empty_tree_rejected() {
        assert_eq!(SecretTree::new(vec![]), Err(MerkleError::EmptyTree));
    }

    #[test]
    fn single_leaf_root_is_leaf() {
        let tree = SecretTree::from_secrets(&secrets(1)).unwrap();
        assert_eq!(tree.root(), tree.leaf(0).unwrap());
        assert_eq!(tree.proof(0).unwrap(), Vec::<B256>::new());
        assert!(verify_proof(tree.leaf(0).unwrap(), &[], tree.root()));
    }

    #[test]
    fn pair_hash_is_order_independent() {
        let a = hash_secret(b"a");
        let b = hash_secret(b"b");
        assert_eq!(hash_pair(a, b), hash_pair(b, a));
    }

    #[test]
    fn every_proof_verifies() {
        for n in [2usize, 3, 5, 8, 9] {
            let tree = SecretTree::from_secrets(&secrets(n)).unwrap();
            for i in 0..n {
                let proof = tree.proof(i).unwrap();
                assert!(
                    verify_proof(tree.leaf(i).unwrap(), &proof, tree.root()),
                    "leaf {i} of {n} failed"
                );
            }
        }
    }

    #[test]
    fn foreign_leaf_rejected() {
        let tree = SecretTree::from_secrets(&secrets(5)).unwrap();
        let proof = tree.proof(2).unwrap();
        assert!(!verify_proof(hash_secret(b"not in the tree"), &proof, tree.root()));
    }

    #[test]
    fn proof_for_wrong_index_rejected() {
        let tree = SecretTree::from_secrets(&secrets(5)).unwrap();
        let proof = tree.proof(1).unwrap();
        assert!(!verify_proof(tree.leaf(2).unwrap(), &proof, tree.root()));
    }

    #[test]
    fn out_of_bounds_index() {
        let tree = SecretTree::from_secrets(&secrets(3)).unwrap();
        assert_eq!(
            tree.proof(3),
            Err(MerkleError::IndexOutOfBounds { index: 3, leaf_count: 3 })
        );
    }
}

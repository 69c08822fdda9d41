// crates/ccp-core/src/commitment.rs
//
// Canonical commitment representations: the Modality enumeration, the
// structured commitment tuple, single commitments, and commitment sets.
//
// A commitment's identity is its canonical key. The original clause text is
// carried alongside the key because enforcement repair must reinsert clauses
// in a form the extractor recognizes, which the key (a canonical
// serialization) is not guaranteed to be.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// First 12 hex chars of the SHA-256 of the input.
///
/// The fixed-width digest used for commitment and signal identifiers.
pub fn short_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hash = hasher.finalize();
    hex::encode(hash)[..12].to_string()
}

/// Modality of a commitment clause, resolved from the modal cue lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// "must", "shall", "required", "ought".
    Obligation,
    /// "must not", "shall not", "may not", "cannot".
    Prohibition,
    /// "may".
    Permission,
    /// "means", "is defined as".
    Definition,
    /// Fallback when a clause is flagged as a commitment candidate by a
    /// modal keyword but no lexicon entry resolves unambiguously.
    Unmarked,
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Modality::Obligation => "OBLIGATION",
            Modality::Prohibition => "PROHIBITION",
            Modality::Permission => "PERMISSION",
            Modality::Definition => "DEFINITION",
            Modality::Unmarked => "UNMARKED",
        };
        write!(f, "{}", name)
    }
}

/// Structured commitment tuple used by the structured extraction mode.
///
/// Field declaration order is the canonical serialization order; identical
/// semantic tuples always serialize to identical keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentTuple {
    /// Clause subject, lower-cased; "unknown" when none was found.
    pub actor: String,
    /// Modality resolved from the cue lexicon.
    pub modality: Modality,
    /// Main verb after the cue, lower-cased.
    pub action: String,
    /// Remaining object text, token-canonicalized.
    pub object: String,
    /// Conditional clause captured after a conditional cue, lower-cased;
    /// empty when the clause is unconditional.
    pub condition: String,
}

impl CommitmentTuple {
    /// Deterministic canonical key: compact JSON with alphabetically sorted
    /// field names. Identical semantic tuples always produce identical keys,
    /// independent of extraction call order.
    pub fn canonical_key(&self) -> String {
        serde_json::json!({
            "action": self.action,
            "actor": self.actor,
            "condition": self.condition,
            "modality": self.modality.to_string(),
            "object": self.object,
        })
        .to_string()
    }
}

/// One canonicalized commitment extracted from a single clause.
///
/// Identity (equality, hashing, ordering) is by `key` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    /// Canonical identity: the stripped clause (simple mode) or the
    /// serialized tuple (structured mode).
    pub key: String,
    /// The original clause text, kept for enforcement repair.
    pub text: String,
}

impl Commitment {
    /// Create a commitment whose key and text are the same clause string
    /// (simple extraction mode).
    pub fn from_clause(clause: impl Into<String>) -> Self {
        let clause = clause.into();
        Self {
            key: clause.clone(),
            text: clause,
        }
    }

    /// Create a commitment with a canonical key distinct from the clause
    /// text (structured extraction mode).
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// Fixed-width digest of the canonical key, for storage and logging.
    pub fn digest(&self) -> String {
        short_digest(&self.key)
    }
}

impl PartialEq for Commitment {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Commitment {}

impl PartialOrd for Commitment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Commitment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl std::hash::Hash for Commitment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// A deduplicated set of commitments extracted from one text snapshot.
///
/// Keyed by canonical key; iteration is always in sorted key order so that
/// every consumer (metrics, repair, logging) sees a deterministic sequence.
/// Immutable once returned by an extraction call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitmentSet {
    inner: BTreeMap<String, Commitment>,
}

impl CommitmentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a commitment. Duplicate keys collapse to a single entry.
    pub fn insert(&mut self, commitment: Commitment) {
        self.inner.insert(commitment.key.clone(), commitment);
    }

    /// Number of distinct commitments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether a commitment with this canonical key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Canonical keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_str())
    }

    /// Commitments in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = &Commitment> {
        self.inner.values()
    }

    /// Commitments present in `self` but not in `other`, in sorted key order.
    pub fn difference<'a>(&'a self, other: &CommitmentSet) -> Vec<&'a Commitment> {
        self.inner
            .values()
            .filter(|c| !other.contains_key(&c.key))
            .collect()
    }

    /// Size of the key intersection with `other`.
    pub fn intersection_len(&self, other: &CommitmentSet) -> usize {
        self.inner
            .keys()
            .filter(|k| other.contains_key(k))
            .count()
    }

    /// Size of the key union with `other`.
    pub fn union_len(&self, other: &CommitmentSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    /// All commitments as a vector, in sorted key order.
    pub fn to_vec(&self) -> Vec<Commitment> {
        self.inner.values().cloned().collect()
    }
}

impl FromIterator<Commitment> for CommitmentSet {
    fn from_iter<I: IntoIterator<Item = Commitment>>(iter: I) -> Self {
        let mut set = CommitmentSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

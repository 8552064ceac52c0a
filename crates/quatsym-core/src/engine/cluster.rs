use crate::core::models::record::{ChainRecord, TraceAtom};
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};

/// Residue correspondence between a cluster's reference frame and one member.
///
/// `alignment1[n]` indexes the representative trace and `alignment2[n]` the
/// member trace; both lists have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueAlignment {
    pub alignment1: Vec<usize>,
    pub alignment2: Vec<usize>,
}

impl ResidueAlignment {
    /// The identity correspondence `0..n-1` on both sides.
    pub fn identity(n: usize) -> Self {
        Self {
            alignment1: (0..n).collect(),
            alignment2: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.alignment1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignment1.is_empty()
    }
}

/// The canonical member of a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRepresentative {
    sequence_key: String,
    atoms: Vec<TraceAtom>,
    alignment: ResidueAlignment,
}

impl ClusterRepresentative {
    pub fn from_record(record: &ChainRecord) -> Self {
        Self {
            sequence_key: record.sequence_key().to_string(),
            atoms: record.atoms().to_vec(),
            alignment: ResidueAlignment::identity(record.len()),
        }
    }

    pub fn sequence_key(&self) -> &str {
        &self.sequence_key
    }

    pub fn atoms(&self) -> &[TraceAtom] {
        &self.atoms
    }

    pub fn alignment1(&self) -> &[usize] {
        &self.alignment.alignment1
    }

    pub fn alignment2(&self) -> &[usize] {
        &self.alignment.alignment2
    }

    /// Exact equality of sequence keys: any change in residue numbering or
    /// identity is a mismatch.
    pub fn is_match(&self, record: &ChainRecord) -> bool {
        self.sequence_key == record.sequence_key()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMember {
    pub record: ChainRecord,
    pub alignment: ResidueAlignment,
}

/// A group of chains judged to share one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceCluster {
    representative: ClusterRepresentative,
    members: Vec<ClusterMember>,
}

impl SequenceCluster {
    /// Starts a cluster whose representative and only member is `record`.
    pub fn seeded_by(record: &ChainRecord) -> Self {
        let representative = ClusterRepresentative::from_record(record);
        let alignment = representative.alignment.clone();
        Self {
            representative,
            members: vec![ClusterMember {
                record: record.clone(),
                alignment,
            }],
        }
    }

    pub(crate) fn add_member(&mut self, record: ChainRecord, alignment: ResidueAlignment) {
        self.members.push(ClusterMember { record, alignment });
    }

    pub fn representative(&self) -> &ClusterRepresentative {
        &self.representative
    }

    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn chain_ids(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.record.chain_id().to_string())
            .collect()
    }

    pub fn model_numbers(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.record.model_number()).collect()
    }

    pub fn structure_ids(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.record.structure_id()).collect()
    }

    /// Reference positions aligned in every member, ascending.
    pub fn aligned_positions(&self) -> Vec<usize> {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            return Vec::new();
        };
        let mut common: HashSet<usize> = first.alignment.alignment1.iter().copied().collect();
        for member in members {
            let positions: HashSet<usize> = member.alignment.alignment1.iter().copied().collect();
            common.retain(|p| positions.contains(p));
        }
        let mut positions: Vec<usize> = common.into_iter().collect();
        positions.sort_unstable();
        positions
    }

    /// Number of residues aligned across all members.
    pub fn aligned_length(&self) -> usize {
        self.aligned_positions().len()
    }

    /// One trace per member restricted to the shared aligned positions, so all
    /// traces of a cluster have the same length and residue correspondence.
    pub fn aligned_traces(&self) -> Vec<Vec<TraceAtom>> {
        let positions = self.aligned_positions();
        self.members
            .iter()
            .map(|member| {
                let to_member: HashMap<usize, usize> = member
                    .alignment
                    .alignment1
                    .iter()
                    .copied()
                    .zip(member.alignment.alignment2.iter().copied())
                    .collect();
                positions
                    .iter()
                    .filter_map(|p| to_member.get(p))
                    .filter_map(|&i| member.record.atoms().get(i).cloned())
                    .collect()
            })
            .collect()
    }

    pub fn aligned_coordinates(&self) -> Vec<Vec<Point3<f64>>> {
        self.aligned_traces()
            .into_iter()
            .map(|trace| trace.into_iter().map(|a| a.position).collect())
            .collect()
    }
}

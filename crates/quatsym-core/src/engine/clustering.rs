use super::cluster::SequenceCluster;
use super::matching::ClusterMatcher;
use crate::core::models::record::ChainRecord;
use tracing::{debug, instrument, trace};

/// Groups chain records into clusters, preserving first-occurrence order.
///
/// Each record joins the first existing cluster (in cluster order) whose
/// representative `matcher` accepts; otherwise it seeds a new cluster. Without
/// a matcher every record becomes its own cluster. Members keep input order.
#[instrument(skip_all, name = "sequence_clustering", fields(num_chains = records.len()))]
pub fn cluster_chains(
    records: &[ChainRecord],
    matcher: Option<&dyn ClusterMatcher>,
) -> Vec<SequenceCluster> {
    let mut clusters: Vec<SequenceCluster> = Vec::new();

    for record in records {
        let joined = matcher.and_then(|matcher| {
            clusters.iter().enumerate().find_map(|(index, cluster)| {
                matcher
                    .matches(cluster.representative(), record)
                    .map(|alignment| (index, alignment))
            })
        });

        match joined {
            Some((index, alignment)) => {
                trace!(chain = record.chain_id(), cluster = index, "Chain joins existing cluster.");
                clusters[index].add_member(record.clone(), alignment);
            }
            None => clusters.push(SequenceCluster::seeded_by(record)),
        }
    }

    debug!(num_clusters = clusters.len(), "Sequence clustering complete.");
    clusters
}

/// Stable sort by member count, largest first; ties broken by aligned length,
/// longest first.
pub fn sort_clusters_by_size(clusters: &mut [SequenceCluster]) {
    clusters.sort_by_cached_key(|c| {
        (
            std::cmp::Reverse(c.member_count()),
            std::cmp::Reverse(c.aligned_length()),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::TraceAtom;
    use crate::engine::matching::{ExactSequenceMatcher, TolerantSequenceMatcher};
    use nalgebra::Point3;

    fn record(chain: &str, residues: &[(isize, &str)]) -> ChainRecord {
        let atoms = residues
            .iter()
            .map(|&(n, name)| TraceAtom::new(Point3::origin(), n, name, chain))
            .collect();
        ChainRecord::new(atoms, chain, 1, 0, String::new())
    }

    const ALPHA: &[(isize, &str)] = &[(1, "MET"), (2, "ALA"), (3, "SER")];
    const BETA: &[(isize, &str)] = &[(1, "MET"), (2, "GLY")];

    fn chain_ids(clusters: &[SequenceCluster]) -> Vec<Vec<String>> {
        clusters.iter().map(|c| c.chain_ids()).collect()
    }

    #[test]
    fn empty_input_gives_no_clusters() {
        assert!(cluster_chains(&[], None).is_empty());
        assert!(cluster_chains(&[], Some(&ExactSequenceMatcher)).is_empty());
    }

    #[test]
    fn without_matcher_every_chain_is_a_singleton() {
        let records = [record("A", ALPHA), record("B", ALPHA), record("C", BETA)];
        let clusters = cluster_chains(&records, None);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(|c| c.member_count() == 1));
        assert_eq!(
            chain_ids(&clusters),
            vec![vec!["A".to_string()], vec!["B".to_string()], vec!["C".to_string()]]
        );
    }

    #[test]
    fn exact_matcher_groups_identical_sequences_in_first_occurrence_order() {
        let records = [
            record("A", BETA),
            record("B", ALPHA),
            record("C", BETA),
            record("D", ALPHA),
            record("E", ALPHA),
        ];
        let clusters = cluster_chains(&records, Some(&ExactSequenceMatcher));
        assert_eq!(
            chain_ids(&clusters),
            vec![
                vec!["A".to_string(), "C".to_string()],
                vec!["B".to_string(), "D".to_string(), "E".to_string()],
            ]
        );
    }

    #[test]
    fn clustering_is_deterministic() {
        let records = [record("A", ALPHA), record("B", BETA), record("C", ALPHA)];
        let first = cluster_chains(&records, Some(&ExactSequenceMatcher));
        let second = cluster_chains(&records, Some(&ExactSequenceMatcher));
        assert_eq!(first, second);
    }

    #[test]
    fn chain_joins_the_first_matching_cluster() {
        // With a permissive threshold C matches both A and B; it must join A.
        let records = [
            record("A", &[(1, "MET"), (2, "ALA")]),
            record("B", &[(1, "MET"), (2, "GLY")]),
            record("C", &[(1, "MET"), (2, "SER")]),
        ];
        let tolerant = TolerantSequenceMatcher::new(0.5).unwrap();
        let clusters = cluster_chains(&records, Some(&tolerant));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].chain_ids(), vec!["A", "B", "C"]);
        assert_eq!(clusters[0].aligned_length(), 1);
    }

    #[test]
    fn sort_by_size_orders_largest_first_and_is_stable() {
        let records = [
            record("A", BETA),
            record("B", ALPHA),
            record("C", ALPHA),
            record("D", &[(9, "TRP")]),
        ];
        let mut clusters = cluster_chains(&records, Some(&ExactSequenceMatcher));
        sort_clusters_by_size(&mut clusters);
        assert_eq!(
            chain_ids(&clusters),
            vec![
                vec!["B".to_string(), "C".to_string()],
                vec!["A".to_string()],
                vec!["D".to_string()],
            ]
        );
    }
}

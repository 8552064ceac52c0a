use nalgebra::Point3;

/// One trace atom of an extracted chain (typically the C-alpha of a residue).
#[derive(Debug, Clone, PartialEq)]
pub struct TraceAtom {
    pub position: Point3<f64>,
    pub residue_number: isize,
    pub residue_name: String,
    pub chain_id: String,
}

impl TraceAtom {
    pub fn new(
        position: Point3<f64>,
        residue_number: isize,
        residue_name: &str,
        chain_id: &str,
    ) -> Self {
        Self {
            position,
            residue_number,
            residue_name: residue_name.to_string(),
            chain_id: chain_id.to_string(),
        }
    }

    /// The `<number><name>` token this atom contributes to a sequence key.
    pub fn sequence_token(&self) -> String {
        format!("{}{}", self.residue_number, self.residue_name)
    }
}

/// Builds the canonical sequence key of a trace: the concatenation of the
/// residue-number + residue-name tokens of every atom, in trace order.
///
/// Two traces share a key only if they agree on both residue numbering and
/// residue identity at every position.
pub fn sequence_key(atoms: &[TraceAtom]) -> String {
    atoms.iter().map(TraceAtom::sequence_token).collect()
}

/// One polymer chain extracted from one structural model.
///
/// Records are immutable once built; the sequence key is derived from the
/// atoms at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRecord {
    atoms: Vec<TraceAtom>,
    chain_id: String,
    model_number: usize,
    structure_id: usize,
    sequence: String,
    sequence_key: String,
}

impl ChainRecord {
    /// Creates a record. `sequence` is the one-letter residue sequence reported
    /// by the extractor; it is informational and does not take part in matching.
    pub fn new(
        atoms: Vec<TraceAtom>,
        chain_id: &str,
        model_number: usize,
        structure_id: usize,
        sequence: String,
    ) -> Self {
        let sequence_key = sequence_key(&atoms);
        Self {
            atoms,
            chain_id: chain_id.to_string(),
            model_number,
            structure_id,
            sequence,
            sequence_key,
        }
    }

    pub fn atoms(&self) -> &[TraceAtom] {
        &self.atoms
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn model_number(&self) -> usize {
        self.model_number
    }

    pub fn structure_id(&self) -> usize {
        self.structure_id
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn sequence_key(&self) -> &str {
        &self.sequence_key
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn coordinates(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(residues: &[(isize, &str)]) -> Vec<TraceAtom> {
        residues
            .iter()
            .enumerate()
            .map(|(i, &(number, name))| {
                TraceAtom::new(Point3::new(i as f64, 0.0, 0.0), number, name, "A")
            })
            .collect()
    }

    #[test]
    fn sequence_key_concatenates_number_and_name_tokens() {
        let atoms = trace(&[(1, "MET"), (2, "ALA"), (-3, "GLY")]);
        assert_eq!(sequence_key(&atoms), "1MET2ALA-3GLY");
        assert_eq!(atoms[2].sequence_token(), "-3GLY");
        let tokens: Vec<String> = atoms.iter().map(TraceAtom::sequence_token).collect();
        assert_eq!(sequence_key(&atoms), tokens.concat());
    }

    #[test]
    fn sequence_key_of_empty_trace_is_empty() {
        assert_eq!(sequence_key(&[]), "");
    }

    #[test]
    fn renumbering_changes_the_key() {
        let a = trace(&[(1, "MET"), (2, "ALA")]);
        let b = trace(&[(2, "MET"), (3, "ALA")]);
        assert_ne!(sequence_key(&a), sequence_key(&b));
    }

    #[test]
    fn record_derives_key_and_exposes_identity() {
        let record = ChainRecord::new(
            trace(&[(1, "MET"), (2, "LYS")]),
            "B",
            3,
            1,
            "MK".to_string(),
        );
        assert_eq!(record.sequence_key(), "1MET2LYS");
        assert_eq!(record.chain_id(), "B");
        assert_eq!(record.model_number(), 3);
        assert_eq!(record.structure_id(), 1);
        assert_eq!(record.sequence(), "MK");
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
        assert_eq!(record.coordinates()[1], Point3::new(1.0, 0.0, 0.0));
    }
}

use slotmap::new_key_type;

// Stable arena keys into a `MolecularSystem`.
new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}

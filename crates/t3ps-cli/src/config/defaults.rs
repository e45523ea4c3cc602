use t3ps::core::dihedrals::numbering::ReferenceNumbering;

/// Values used when neither the config file nor the command line sets them.
pub struct DefaultsConfig {
    pub numbering: ReferenceNumbering,
    /// Offset assumed for `scheme = "offset"` when `offset` is omitted.
    pub offset: usize,
    pub precision: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            numbering: ReferenceNumbering::Identity,
            offset: 1,
            precision: 2,
        }
    }
}

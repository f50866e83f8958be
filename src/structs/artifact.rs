/// One named unit of source content submitted for analysis. Owned by exactly
/// one analysis task; never shared between concurrent tasks.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Relative name, possibly a path inside an archive.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}
